use svz_common::diagnostics::diagnostic_codes;
use svz_parser::{parse_source, parse_statement, NodeData, SyntaxKind};

#[test]
fn junk_member_tokens_are_reported_and_skipped() {
    let tree = parse_source("test.sv", "module m; 1bad; endmodule");
    assert!(!tree.diagnostics().is_empty());
    // the module still closes properly
    match &tree.arena().get(tree.root()).data {
        NodeData::CompilationUnit(u) => {
            assert_eq!(u.members.len(), 1);
            assert_eq!(tree.arena().get(u.members[0]).kind, SyntaxKind::ModuleDeclaration);
        }
        other => panic!("expected compilation unit, got {other:?}"),
    }
}

#[test]
fn diagnostics_are_sorted_by_position() {
    let tree = parse_source("test.sv", "module m; ?? logic a endmodule");
    let diagnostics = tree.diagnostics();
    assert!(diagnostics.len() >= 2);
    assert!(diagnostics.windows(2).all(|w| w[0].start <= w[1].start));
}

#[test]
fn missing_semicolon_synthesizes_token() {
    let tree = parse_source("test.sv", "module m; logic a endmodule");
    let diagnostics = tree.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, diagnostic_codes::EXPECTED_TOKEN);
    assert!(diagnostics[0].message_text.contains(';'));
    match &tree.arena().get(tree.root()).data {
        NodeData::CompilationUnit(u) => {
            let module = u.members[0];
            match &tree.arena().get(module).data {
                NodeData::ModuleDeclaration(m) => {
                    assert_eq!(
                        tree.arena().get(m.members[0]).kind,
                        SyntaxKind::DataDeclaration
                    );
                    assert!(!m.end_keyword.missing);
                }
                other => panic!("expected module, got {other:?}"),
            }
        }
        other => panic!("expected compilation unit, got {other:?}"),
    }
}

#[test]
fn unterminated_input_still_produces_a_tree() {
    let tree = parse_source("test.sv", "module m; initial begin x = 1;");
    assert!(!tree.diagnostics().is_empty());
    match &tree.arena().get(tree.root()).data {
        NodeData::CompilationUnit(u) => assert_eq!(u.members.len(), 1),
        other => panic!("expected compilation unit, got {other:?}"),
    }
}

#[test]
fn statement_recovery_consumes_unrecognized_token() {
    let tree = parse_statement("test.sv", "endmodule");
    assert!(!tree.diagnostics().is_empty());
    assert_eq!(
        tree.diagnostics()[0].code,
        diagnostic_codes::EXPECTED_STATEMENT
    );
}

#[test]
fn empty_source_parses_to_empty_unit() {
    let tree = parse_source("test.sv", "");
    assert!(tree.diagnostics().is_empty());
    match &tree.arena().get(tree.root()).data {
        NodeData::CompilationUnit(u) => assert!(u.members.is_empty()),
        other => panic!("expected compilation unit, got {other:?}"),
    }
}

#[test]
fn comment_only_source_is_covered_by_root_span() {
    let source = "// just a comment\n";
    let tree = parse_source("test.sv", source);
    assert!(tree.diagnostics().is_empty());
    let root = tree.root_node();
    assert_eq!(root.pos, 0);
    assert_eq!(root.end as usize, source.len());
}

#[test]
fn malformed_expression_keeps_statement_structure() {
    let tree = parse_statement("test.sv", "x = * 2;");
    assert!(!tree.diagnostics().is_empty());
    assert_eq!(tree.arena().get(tree.root()).kind, SyntaxKind::ExpressionStatement);
}

#[test]
fn diagnostics_serialize_for_tooling() {
    let tree = parse_source("test.sv", "module m; logic a endmodule");
    let rendered = serde_json::to_value(tree.diagnostics()).unwrap();
    let first = &rendered[0];
    assert_eq!(first["file"], "test.sv");
    assert_eq!(first["code"], diagnostic_codes::EXPECTED_TOKEN);
    assert!(first["message_text"].as_str().unwrap().contains(';'));
}

#[test]
fn bad_input_round_trips_through_spans() {
    let source = "module m; logic [ ; endmodule\n";
    let tree = parse_source("test.sv", source);
    assert!(!tree.diagnostics().is_empty());
    let root = tree.root_node();
    assert_eq!(&source[root.pos as usize..root.end as usize], source);
}
