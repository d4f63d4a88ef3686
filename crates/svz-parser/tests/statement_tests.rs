use svz_parser::{parse_statement, NodeData, NodeIndex, SyntaxKind, SyntaxTree};

fn stmt(source: &str) -> SyntaxTree {
    let tree = parse_statement("test.sv", source);
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

#[test]
fn if_else_chain() {
    let tree = stmt("if (a) x = 1; else if (b) x = 2; else x = 3;");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::ConditionalStatement);
    match &tree.arena().get(tree.root()).data {
        NodeData::ConditionalStatement(c) => {
            assert_eq!(kind(&tree, c.predicate), SyntaxKind::ConditionalPredicate);
            let else_clause = c.else_clause.expect("else clause");
            assert_eq!(kind(&tree, else_clause), SyntaxKind::ElseClause);
        }
        other => panic!("expected conditional statement, got {other:?}"),
    }
}

#[test]
fn pattern_matching_predicate() {
    let tree = stmt("if (data matches 5 &&& en) x = 1;");
    match &tree.arena().get(tree.root()).data {
        NodeData::ConditionalStatement(c) => {
            assert_eq!(kind(&tree, c.predicate), SyntaxKind::ConditionalPredicate);
        }
        other => panic!("expected conditional statement, got {other:?}"),
    }
}

#[test]
fn nonblocking_assignment_in_statement_context() {
    let tree = stmt("q <= d;");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::ExpressionStatement);
    match &tree.arena().get(tree.root()).data {
        NodeData::ExpressionStatement(s) => {
            assert_eq!(kind(&tree, s.expression), SyntaxKind::NonblockingAssignmentExpression);
        }
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn case_statement_with_default() {
    let tree = stmt("unique case (sel) 0: y = a; 1, 2: y = b; default: y = c; endcase");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::CaseStatement);
    match &tree.arena().get(tree.root()).data {
        NodeData::CaseStatement(c) => {
            assert!(c.unique_or_priority.is_some());
            assert_eq!(c.items.len(), 3);
            assert_eq!(kind(&tree, c.items[2]), SyntaxKind::DefaultCaseItem);
        }
        other => panic!("expected case statement, got {other:?}"),
    }
}

#[test]
fn for_loop_with_declaration_initializer() {
    let tree = stmt("for (int i = 0; i < 8; i++) sum += i;");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::ForLoopStatement);
    match &tree.arena().get(tree.root()).data {
        NodeData::ForLoop(f) => {
            assert_eq!(f.initializers.items.len(), 1);
            assert_eq!(
                kind(&tree, f.initializers.items[0]),
                SyntaxKind::ForVariableDeclaration
            );
            assert!(f.condition.is_some());
        }
        other => panic!("expected for loop, got {other:?}"),
    }
}

#[test]
fn foreach_loop_with_skipped_index() {
    let tree = stmt("foreach (mem[i, , j]) mem[i][j] = 0;");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::ForeachLoopStatement);
}

#[test]
fn fork_join_variants() {
    let tree = stmt("fork : workers a(); b(); join_any");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::ParallelBlockStatement);
    match &tree.arena().get(tree.root()).data {
        NodeData::Block(b) => {
            assert!(b.block_name.is_some());
            assert_eq!(b.items.len(), 2);
        }
        other => panic!("expected block, got {other:?}"),
    }
}

#[test]
fn sequential_block_with_local_declaration() {
    let tree = stmt("begin int tmp = x; y = tmp; end");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::SequentialBlockStatement);
    match &tree.arena().get(tree.root()).data {
        NodeData::Block(b) => {
            assert_eq!(kind(&tree, b.items[0]), SyntaxKind::DataDeclaration);
            assert_eq!(kind(&tree, b.items[1]), SyntaxKind::ExpressionStatement);
        }
        other => panic!("expected block, got {other:?}"),
    }
}

#[test]
fn timing_controls() {
    let tree = stmt("#10 x = 1;");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::TimingControlStatement);

    let tree = stmt("@(posedge clk iff en) q <= d;");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::TimingControlStatement);
    match &tree.arena().get(tree.root()).data {
        NodeData::TimingStatement(t) => {
            assert_eq!(kind(&tree, t.timing_control), SyntaxKind::EventControl);
        }
        other => panic!("expected timing statement, got {other:?}"),
    }

    let tree = stmt("@* y = a + b;");
    match &tree.arena().get(tree.root()).data {
        NodeData::TimingStatement(t) => {
            assert_eq!(kind(&tree, t.timing_control), SyntaxKind::ImplicitEventControl);
        }
        other => panic!("expected timing statement, got {other:?}"),
    }
}

#[test]
fn event_expression_or_list() {
    let tree = stmt("@(posedge clk or negedge rst_n) q <= d;");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::TimingControlStatement);
}

#[test]
fn wait_and_process_control() {
    let tree = stmt("wait (done) ;");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::WaitStatement);
    let tree = stmt("wait fork;");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::WaitForkStatement);
    let tree = stmt("disable fork;");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::DisableForkStatement);
    let tree = stmt("wait_order (a, b, c) else fail();");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::WaitOrderStatement);
}

#[test]
fn immediate_assertion_with_action_block() {
    let tree = stmt("assert (x == y) pass(); else fail();");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::ImmediateAssertStatement);
}

#[test]
fn procedural_force_and_release() {
    let tree = stmt("force a = 1;");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::ProceduralForceStatement);
    let tree = stmt("release a;");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::ProceduralReleaseStatement);
}

#[test]
fn replicated_assignment_pattern_on_right_hand_side() {
    let tree = stmt("x = '{3{y}};");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::ExpressionStatement);
}

#[test]
fn labeled_statement() {
    let tree = stmt("step_one: x = 1;");
    match &tree.arena().get(tree.root()).data {
        NodeData::ExpressionStatement(s) => assert!(s.label.is_some()),
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn event_trigger_and_jump_statements() {
    let tree = stmt("-> ev;");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::BlockingEventTriggerStatement);
    let tree = stmt("break;");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::BreakStatement);
    let tree = stmt("return x + 1;");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::ReturnStatement);
}

#[test]
fn deep_nesting_is_reported_and_terminates() {
    let depth = 300;
    let mut source = String::from("x = ");
    for _ in 0..depth {
        source.push('(');
    }
    source.push('1');
    for _ in 0..depth {
        source.push(')');
    }
    source.push(';');
    let tree = parse_statement("test.sv", &source);
    let nesting = tree
        .diagnostics()
        .iter()
        .filter(|d| d.code == svz_common::diagnostics::diagnostic_codes::MAX_NESTING_DEPTH_EXCEEDED)
        .count();
    assert!(nesting >= 1);
}
