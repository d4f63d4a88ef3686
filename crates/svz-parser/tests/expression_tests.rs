use svz_parser::{parse_expression, NodeData, NodeIndex, SyntaxKind, SyntaxTree};

fn expr(source: &str) -> SyntaxTree {
    let tree = parse_expression("test.sv", source);
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

fn binary_children(tree: &SyntaxTree, index: NodeIndex) -> (NodeIndex, NodeIndex) {
    match &tree.arena().get(index).data {
        NodeData::Binary(b) => (b.left, b.right),
        other => panic!("expected binary node, got {other:?}"),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let tree = expr("a + b * c");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::AddExpression);
    let (left, right) = binary_children(&tree, tree.root());
    assert_eq!(kind(&tree, left), SyntaxKind::IdentifierName);
    assert_eq!(kind(&tree, right), SyntaxKind::MultiplyExpression);
}

#[test]
fn shift_binds_looser_than_addition() {
    let tree = expr("a << b + c");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::ShiftLeftExpression);
    let (_, right) = binary_children(&tree, tree.root());
    assert_eq!(kind(&tree, right), SyntaxKind::AddExpression);
}

#[test]
fn power_is_right_associative() {
    let tree = expr("a ** b ** c");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::PowerExpression);
    let (left, right) = binary_children(&tree, tree.root());
    assert_eq!(kind(&tree, left), SyntaxKind::IdentifierName);
    assert_eq!(kind(&tree, right), SyntaxKind::PowerExpression);
}

#[test]
fn conditional_is_right_associative() {
    let tree = expr("a ? b : c ? d : e");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::ConditionalExpression);
    match &tree.arena().get(tree.root()).data {
        NodeData::Conditional(c) => {
            assert_eq!(kind(&tree, c.when_false), SyntaxKind::ConditionalExpression);
        }
        other => panic!("expected conditional, got {other:?}"),
    }
}

#[test]
fn less_than_equals_is_relational_without_procedural_context() {
    let tree = expr("a <= b");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::LessThanEqualExpression);
}

#[test]
fn assignment_is_right_associative_and_loosest() {
    let tree = expr("a = b = c + 1");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::AssignmentExpression);
    let (_, right) = binary_children(&tree, tree.root());
    assert_eq!(kind(&tree, right), SyntaxKind::AssignmentExpression);
}

#[test]
fn unary_binds_tighter_than_binary() {
    let tree = expr("!a && b");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::LogicalAndExpression);
    let (left, _) = binary_children(&tree, tree.root());
    assert_eq!(kind(&tree, left), SyntaxKind::UnaryLogicalNotExpression);
}

#[test]
fn inside_expression_with_ranges() {
    let tree = expr("a inside {1, [2:5], x}");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::InsideExpression);
}

#[test]
fn member_access_and_selects_chain() {
    let tree = expr("top.sub.arr[3][7:0]");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::ElementSelectExpression);
}

#[test]
fn call_with_named_arguments() {
    let tree = expr("f(.a(1), .b(x + y))");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::InvocationExpression);
}

#[test]
fn concatenation_forms() {
    let concat = expr("{a, b, c}");
    assert_eq!(kind(&concat, concat.root()), SyntaxKind::ConcatenationExpression);
    let rep = expr("{3{a, b}}");
    assert_eq!(kind(&rep, rep.root()), SyntaxKind::MultipleConcatenationExpression);
    let stream = expr("{<< 8 {a, b}}");
    assert_eq!(kind(&stream, stream.root()), SyntaxKind::StreamingConcatenationExpression);
    let empty = expr("{}");
    assert_eq!(kind(&empty, empty.root()), SyntaxKind::EmptyQueueExpression);
}

#[test]
fn assignment_pattern_with_replication() {
    let tree = expr("'{3{y}}");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::AssignmentPatternExpression);
    match &tree.arena().get(tree.root()).data {
        NodeData::AssignmentPattern(p) => {
            assert_eq!(p.items.items.len(), 1);
            assert_eq!(kind(&tree, p.items.items[0]), SyntaxKind::ReplicatedPatternItem);
        }
        other => panic!("expected assignment pattern, got {other:?}"),
    }
}

#[test]
fn cast_and_scoped_names() {
    let cast = expr("int'(x)");
    assert_eq!(kind(&cast, cast.root()), SyntaxKind::CastExpression);
    let scoped = expr("pkg::item");
    assert_eq!(kind(&scoped, scoped.root()), SyntaxKind::ScopedName);
}

#[test]
fn min_typ_max_in_parentheses() {
    let tree = expr("(1 : 2 : 3)");
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::ParenthesizedExpression);
    match &tree.arena().get(tree.root()).data {
        NodeData::Parenthesized(p) => {
            assert_eq!(kind(&tree, p.expression), SyntaxKind::MinTypMaxExpression);
        }
        other => panic!("expected parenthesized, got {other:?}"),
    }
}

#[test]
fn new_expressions() {
    let arr = expr("new [16]");
    assert_eq!(kind(&arr, arr.root()), SyntaxKind::NewArrayExpression);
    let cls = expr("new (1, 2)");
    assert_eq!(kind(&cls, cls.root()), SyntaxKind::NewClassExpression);
}

#[test]
fn root_span_covers_whole_input() {
    let source = "  a + /* gap */ b * c ";
    let tree = parse_expression("test.sv", source);
    let root = tree.root_node();
    assert_eq!(root.pos, 0);
    // trailing trivia belongs to the end-of-file token, not the expression
    assert_eq!(&source[root.pos as usize..root.end as usize], "  a + /* gap */ b * c");
}

#[test]
fn missing_operand_yields_diagnostic_and_placeholder() {
    let tree = parse_expression("test.sv", "a + ");
    assert_eq!(tree.diagnostics().len(), 1);
    assert_eq!(kind(&tree, tree.root()), SyntaxKind::AddExpression);
    let (_, right) = binary_children(&tree, tree.root());
    assert_eq!(kind(&tree, right), SyntaxKind::BadExpression);
}
