use svz_parser::{parse_member, parse_source, NodeData, NodeIndex, SyntaxKind, SyntaxTree};

fn source_tree(source: &str) -> SyntaxTree {
    let tree = parse_source("test.sv", source);
    assert!(
        tree.diagnostics().is_empty(),
        "unexpected diagnostics for {source:?}: {:?}",
        tree.diagnostics()
    );
    tree
}

fn kind(tree: &SyntaxTree, index: NodeIndex) -> SyntaxKind {
    tree.arena().get(index).kind
}

fn unit_members(tree: &SyntaxTree) -> Vec<NodeIndex> {
    match &tree.arena().get(tree.root()).data {
        NodeData::CompilationUnit(u) => u.members.clone(),
        other => panic!("expected compilation unit, got {other:?}"),
    }
}

fn module_members(tree: &SyntaxTree, module: NodeIndex) -> Vec<NodeIndex> {
    match &tree.arena().get(module).data {
        NodeData::ModuleDeclaration(m) => m.members.clone(),
        other => panic!("expected module, got {other:?}"),
    }
}

#[test]
fn empty_module() {
    let tree = source_tree("module m; endmodule");
    let members = unit_members(&tree);
    assert_eq!(members.len(), 1);
    assert_eq!(kind(&tree, members[0]), SyntaxKind::ModuleDeclaration);
}

#[test]
fn module_with_ansi_ports_and_parameters() {
    let tree = source_tree(
        "module counter #(parameter int WIDTH = 8, DEPTH = 4)\n\
         (input logic clk, input logic rst_n, output logic [7:0] count);\n\
         endmodule : counter",
    );
    let module = unit_members(&tree)[0];
    match &tree.arena().get(module).data {
        NodeData::ModuleDeclaration(m) => {
            assert!(m.end_name.is_some());
            match &tree.arena().get(m.header).data {
                NodeData::ModuleHeader(h) => {
                    assert!(h.parameter_ports.is_some());
                    let ports = h.ports.expect("port list");
                    assert_eq!(kind(&tree, ports), SyntaxKind::AnsiPortList);
                }
                other => panic!("expected header, got {other:?}"),
            }
        }
        other => panic!("expected module, got {other:?}"),
    }
}

#[test]
fn module_with_non_ansi_ports() {
    let tree = source_tree(
        "module top(a, b, y);\n\
         input a, b;\n\
         output y;\n\
         wire a, b, y;\n\
         endmodule",
    );
    let module = unit_members(&tree)[0];
    let members = module_members(&tree, module);
    match &tree.arena().get(module).data {
        NodeData::ModuleDeclaration(m) => match &tree.arena().get(m.header).data {
            NodeData::ModuleHeader(h) => {
                assert_eq!(kind(&tree, h.ports.unwrap()), SyntaxKind::NonAnsiPortList);
            }
            other => panic!("expected header, got {other:?}"),
        },
        other => panic!("expected module, got {other:?}"),
    }
    assert_eq!(kind(&tree, members[0]), SyntaxKind::PortDeclaration);
    assert_eq!(kind(&tree, members[2]), SyntaxKind::NetDeclaration);
}

#[test]
fn member_disambiguation_between_declaration_and_instantiation() {
    let tree = source_tree(
        "module m;\n\
         fifo_t entry;\n\
         fifo #(.DEPTH(4)) u_fifo (.clk(clk), .*);\n\
         wire w;\n\
         endmodule",
    );
    let members = module_members(&tree, unit_members(&tree)[0]);
    assert_eq!(kind(&tree, members[0]), SyntaxKind::DataDeclaration);
    assert_eq!(kind(&tree, members[1]), SyntaxKind::HierarchyInstantiation);
    assert_eq!(kind(&tree, members[2]), SyntaxKind::NetDeclaration);
}

#[test]
fn procedural_blocks_and_continuous_assign() {
    let tree = source_tree(
        "module m;\n\
         assign #5 y = a & b;\n\
         always_ff @(posedge clk) q <= d;\n\
         initial begin x = 0; end\n\
         final $display(\"done\");\n\
         endmodule",
    );
    let members = module_members(&tree, unit_members(&tree)[0]);
    assert_eq!(kind(&tree, members[0]), SyntaxKind::ContinuousAssign);
    assert_eq!(kind(&tree, members[1]), SyntaxKind::AlwaysFfBlock);
    assert_eq!(kind(&tree, members[2]), SyntaxKind::InitialBlock);
    assert_eq!(kind(&tree, members[3]), SyntaxKind::FinalBlock);
}

#[test]
fn generate_constructs() {
    let tree = source_tree(
        "module m;\n\
         generate\n\
         for (genvar i = 0; i < 4; i = i + 1) begin : lane\n\
         assign y[i] = a[i];\n\
         end\n\
         if (USE_FAST) fast u(); else slow u();\n\
         endgenerate\n\
         endmodule",
    );
    let members = module_members(&tree, unit_members(&tree)[0]);
    assert_eq!(kind(&tree, members[0]), SyntaxKind::GenerateRegion);
    match &tree.arena().get(members[0]).data {
        NodeData::GenerateRegion(r) => {
            assert_eq!(kind(&tree, r.members[0]), SyntaxKind::LoopGenerate);
            assert_eq!(kind(&tree, r.members[1]), SyntaxKind::IfGenerate);
        }
        other => panic!("expected generate region, got {other:?}"),
    }
}

#[test]
fn package_with_typedef_import_and_parameters() {
    let tree = source_tree(
        "package pkg;\n\
         import other::*;\n\
         typedef logic [7:0] byte_t;\n\
         localparam int LIMIT = 16;\n\
         parameter DEPTH = 4;\n\
         endpackage",
    );
    let pkg = unit_members(&tree)[0];
    assert_eq!(kind(&tree, pkg), SyntaxKind::PackageDeclaration);
    let members = module_members(&tree, pkg);
    assert_eq!(kind(&tree, members[0]), SyntaxKind::PackageImportDeclaration);
    assert_eq!(kind(&tree, members[1]), SyntaxKind::TypedefDeclaration);
    assert_eq!(kind(&tree, members[2]), SyntaxKind::ParameterDeclaration);
    assert_eq!(kind(&tree, members[3]), SyntaxKind::ParameterDeclaration);
}

#[test]
fn function_and_task_declarations() {
    let tree = source_tree(
        "module m;\n\
         function automatic int add(input int a, input int b);\n\
         return a + b;\n\
         endfunction : add\n\
         task run(input int n);\n\
         repeat (n) step();\n\
         endtask\n\
         endmodule",
    );
    let members = module_members(&tree, unit_members(&tree)[0]);
    assert_eq!(kind(&tree, members[0]), SyntaxKind::FunctionDeclaration);
    assert_eq!(kind(&tree, members[1]), SyntaxKind::TaskDeclaration);
}

#[test]
fn function_with_implicit_return_type() {
    let tree = source_tree(
        "module m;\n\
         function compute;\n\
         compute = 1;\n\
         endfunction\n\
         endmodule",
    );
    let members = module_members(&tree, unit_members(&tree)[0]);
    match &tree.arena().get(members[0]).data {
        NodeData::FunctionDeclaration(f) => match &tree.arena().get(f.prototype).data {
            NodeData::FunctionPrototype(p) => assert!(p.return_type.is_none()),
            other => panic!("expected prototype, got {other:?}"),
        },
        other => panic!("expected function, got {other:?}"),
    }
}

#[test]
fn class_with_constraints_and_methods() {
    let tree = source_tree(
        "class packet extends base_packet;\n\
         rand bit [7:0] len;\n\
         constraint legal { len > 0; len < 64 -> short_mode == 1; unique { a, b }; }\n\
         virtual function void show();\n\
         endfunction\n\
         endclass : packet",
    );
    let class = unit_members(&tree)[0];
    assert_eq!(kind(&tree, class), SyntaxKind::ClassDeclaration);
    match &tree.arena().get(class).data {
        NodeData::ClassDeclaration(c) => {
            assert!(c.extends_clause.is_some());
            assert_eq!(kind(&tree, c.members[0]), SyntaxKind::ClassPropertyDeclaration);
            assert_eq!(kind(&tree, c.members[1]), SyntaxKind::ConstraintDeclaration);
            assert_eq!(kind(&tree, c.members[2]), SyntaxKind::ClassMethodDeclaration);
        }
        other => panic!("expected class, got {other:?}"),
    }
}

#[test]
fn constraint_items_have_expected_kinds() {
    let tree = source_tree(
        "class c;\n\
         constraint rules {\n\
         mode inside {1, 2};\n\
         mode == 2 -> { len < 10; }\n\
         if (fast) { len == 1; } else { len > 1; }\n\
         unique { x, y, z };\n\
         }\n\
         endclass",
    );
    let class = unit_members(&tree)[0];
    let constraint = match &tree.arena().get(class).data {
        NodeData::ClassDeclaration(c) => c.members[0],
        other => panic!("expected class, got {other:?}"),
    };
    let block = match &tree.arena().get(constraint).data {
        NodeData::ConstraintDeclaration(c) => c.block,
        other => panic!("expected constraint, got {other:?}"),
    };
    match &tree.arena().get(block).data {
        NodeData::ConstraintBlock(b) => {
            assert_eq!(kind(&tree, b.items[0]), SyntaxKind::ExpressionConstraint);
            assert_eq!(kind(&tree, b.items[1]), SyntaxKind::ImplicationConstraint);
            assert_eq!(kind(&tree, b.items[2]), SyntaxKind::ConditionalConstraint);
            assert_eq!(kind(&tree, b.items[3]), SyntaxKind::UniquenessConstraint);
        }
        other => panic!("expected constraint block, got {other:?}"),
    }
}

#[test]
fn interface_and_program_declarations() {
    let tree = source_tree(
        "interface bus_if; logic valid; endinterface\n\
         program test_prog; initial run(); endprogram",
    );
    let members = unit_members(&tree);
    assert_eq!(kind(&tree, members[0]), SyntaxKind::InterfaceDeclaration);
    assert_eq!(kind(&tree, members[1]), SyntaxKind::ProgramDeclaration);
}

#[test]
fn timeunit_and_timeprecision_declarations() {
    let tree = source_tree("module m; timeunit 1ns / 1ps; timeprecision 1ps; endmodule");
    let module = unit_members(&tree)[0];
    let members = module_members(&tree, module);
    assert_eq!(members.len(), 2);
    match &tree.arena().get(members[0]).data {
        NodeData::TimeUnitsDeclaration(t) => assert!(t.divider.is_some()),
        other => panic!("expected timeunits declaration, got {other:?}"),
    }
    match &tree.arena().get(members[1]).data {
        NodeData::TimeUnitsDeclaration(t) => assert!(t.divider.is_none()),
        other => panic!("expected timeunits declaration, got {other:?}"),
    }
}

#[test]
fn single_member_entry_point() {
    let tree = parse_member("test.sv", "genvar i, j;");
    assert!(tree.diagnostics().is_empty());
    assert_eq!(tree.arena().get(tree.root()).kind, SyntaxKind::GenvarDeclaration);
}

#[test]
fn source_round_trips_through_spans() {
    let source = "module m;\n  // state\n  logic [3:0] q;\nendmodule\n";
    let tree = parse_source("test.sv", source);
    assert!(tree.diagnostics().is_empty());
    let root = tree.root_node();
    assert_eq!(&source[root.pos as usize..root.end as usize], source);
}
