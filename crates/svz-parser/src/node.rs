//! Concrete syntax tree node definitions.
//!
//! Every grammar production gets a `SyntaxKind` tag; node payloads are a
//! closed tagged-variant (`NodeData`) of per-family data structs. Several
//! kinds share one data shape (all binary operators use `BinaryExprData`,
//! all procedural blocks use `ProceduralBlockData`, and so on) with the
//! kind tag carrying the distinction.
//!
//! Children are non-owning `NodeIndex` handles into the arena plus inline
//! `Token`s; child order in each struct matches source order. A node's
//! `pos` includes the leading trivia of its first token, so the root of a
//! well-formed parse spans the entire source text.

use serde::Serialize;
use svz_scanner::Token;

/// Handle to a node in the [`crate::node_arena::NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct NodeIndex(pub u32);

/// A comma-separated (or otherwise delimited) list that preserves its
/// separator tokens in source order: `items[0] separators[0] items[1] ...`.
#[derive(Clone, Debug, Default)]
pub struct SeparatedList {
    pub items: Vec<NodeIndex>,
    pub separators: Vec<Token>,
}

impl SeparatedList {
    pub fn new() -> SeparatedList {
        SeparatedList::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One tag per grammar rule family. Set once at node construction and
/// never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SyntaxKind {
    // Names and literal expressions
    IdentifierName,
    SystemName,
    ThisHandle,
    SuperHandle,
    ScopedName,
    IntegerLiteralExpression,
    UnbasedUnsizedLiteralExpression,
    RealLiteralExpression,
    TimeLiteralExpression,
    StringLiteralExpression,
    NullLiteralExpression,
    WildcardLiteralExpression,
    DefaultPatternKey,

    // Selects and member access
    MemberAccessExpression,
    ElementSelectExpression,
    BitSelect,
    SimpleRangeSelect,
    AscendingRangeSelect,
    DescendingRangeSelect,

    // Unary expressions
    UnaryPlusExpression,
    UnaryMinusExpression,
    UnaryLogicalNotExpression,
    UnaryBitwiseNotExpression,
    UnaryBitwiseAndExpression,
    UnaryBitwiseNandExpression,
    UnaryBitwiseOrExpression,
    UnaryBitwiseNorExpression,
    UnaryBitwiseXorExpression,
    UnaryBitwiseXnorExpression,
    UnaryPreincrementExpression,
    UnaryPredecrementExpression,
    PostincrementExpression,
    PostdecrementExpression,

    // Binary expressions
    AddExpression,
    SubtractExpression,
    MultiplyExpression,
    DivideExpression,
    ModExpression,
    PowerExpression,
    ShiftLeftExpression,
    ShiftRightExpression,
    ArithmeticShiftLeftExpression,
    ArithmeticShiftRightExpression,
    LessThanExpression,
    LessThanEqualExpression,
    GreaterThanExpression,
    GreaterThanEqualExpression,
    EqualityExpression,
    InequalityExpression,
    CaseEqualityExpression,
    CaseInequalityExpression,
    WildcardEqualityExpression,
    WildcardInequalityExpression,
    BinaryAndExpression,
    BinaryOrExpression,
    BinaryXorExpression,
    BinaryXnorExpression,
    LogicalAndExpression,
    LogicalOrExpression,
    LogicalImplicationExpression,
    LogicalEquivalenceExpression,

    // Assignment expressions
    AssignmentExpression,
    AddAssignmentExpression,
    SubtractAssignmentExpression,
    MultiplyAssignmentExpression,
    DivideAssignmentExpression,
    ModAssignmentExpression,
    AndAssignmentExpression,
    OrAssignmentExpression,
    XorAssignmentExpression,
    LogicalLeftShiftAssignmentExpression,
    LogicalRightShiftAssignmentExpression,
    ArithmeticLeftShiftAssignmentExpression,
    ArithmeticRightShiftAssignmentExpression,
    NonblockingAssignmentExpression,

    // Conditional expressions and patterns
    ConditionalExpression,
    ConditionalPredicate,
    ConditionalPattern,
    WildcardPattern,
    VariablePattern,
    ParenthesizedPattern,
    ExpressionPattern,

    // Other expressions
    ParenthesizedExpression,
    MinTypMaxExpression,
    ConcatenationExpression,
    MultipleConcatenationExpression,
    StreamingConcatenationExpression,
    EmptyQueueExpression,
    InvocationExpression,
    ArgumentList,
    OrderedArgument,
    NamedArgument,
    CastExpression,
    NewClassExpression,
    NewArrayExpression,
    InsideExpression,
    OpenRangeList,
    ValueRangeExpression,
    AssignmentPatternExpression,
    AssignmentPatternItem,
    ReplicatedPatternItem,
    BadExpression,

    // Timing controls and event expressions
    DelayControl,
    EventControl,
    ImplicitEventControl,
    SignalEventExpression,
    BinaryEventExpression,
    ParenthesizedEventExpression,
    IffClause,

    // Shared small clauses
    NamedLabel,
    NamedBlockClause,
    ElseClause,
    EqualsValueClause,
    Declarator,
    RangeDimension,
    ExpressionDimension,
    UnsizedDimension,
    WildcardDimension,
    QueueDimension,
    AttributeInstance,
    AttributeSpec,

    // Statements
    EmptyStatement,
    ConditionalStatement,
    CaseStatement,
    RandCaseStatement,
    StandardCaseItem,
    DefaultCaseItem,
    ForLoopStatement,
    ForVariableDeclaration,
    ForeachLoopStatement,
    WhileStatement,
    RepeatStatement,
    ForeverStatement,
    DoWhileStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    DisableStatement,
    DisableForkStatement,
    ProceduralAssignStatement,
    ProceduralForceStatement,
    ProceduralDeassignStatement,
    ProceduralReleaseStatement,
    ImmediateAssertStatement,
    ImmediateAssumeStatement,
    ImmediateCoverStatement,
    ActionBlock,
    TimingControlStatement,
    BlockingEventTriggerStatement,
    WaitStatement,
    WaitForkStatement,
    WaitOrderStatement,
    SequentialBlockStatement,
    ParallelBlockStatement,
    ExpressionStatement,

    // Members and declarations
    CompilationUnit,
    ModuleDeclaration,
    InterfaceDeclaration,
    ProgramDeclaration,
    PackageDeclaration,
    ModuleHeader,
    ParameterPortList,
    ParameterDeclaration,
    AnsiPortList,
    NonAnsiPortList,
    AnsiPort,
    ImplicitNonAnsiPort,
    ExplicitNonAnsiPort,
    PortDeclaration,
    DataDeclaration,
    NetDeclaration,
    TypedefDeclaration,
    PackageImportDeclaration,
    PackageImportItem,
    GenvarDeclaration,
    TimeUnitsDeclaration,
    ContinuousAssign,
    InitialBlock,
    FinalBlock,
    AlwaysBlock,
    AlwaysCombBlock,
    AlwaysFfBlock,
    AlwaysLatchBlock,
    GenerateRegion,
    LoopGenerate,
    IfGenerate,
    CaseGenerate,
    GenerateBlock,
    HierarchyInstantiation,
    ParameterValueAssignment,
    HierarchicalInstance,
    OrderedPortConnection,
    NamedPortConnection,
    WildcardPortConnection,
    FunctionDeclaration,
    TaskDeclaration,
    FunctionPrototype,
    ClassDeclaration,
    ExtendsClause,
    ImplementsClause,
    ClassPropertyDeclaration,
    ClassMethodDeclaration,
    ConstraintDeclaration,
    ConstraintBlock,
    ConstraintSet,
    ExpressionConstraint,
    ImplicationConstraint,
    ConditionalConstraint,
    UniquenessConstraint,
    EmptyMember,

    // Data types
    IntegerType,
    KeywordType,
    StructType,
    UnionType,
    StructUnionMember,
    EnumType,
    NamedType,
    ImplicitType,
}

/// One syntax node: a kind tag, a trivia-inclusive span, and the payload.
#[derive(Clone, Debug)]
pub struct SyntaxNode {
    pub kind: SyntaxKind,
    pub pos: u32,
    pub end: u32,
    pub data: NodeData,
}

// ============================================================================
// Data payloads, grouped by shape family
// ============================================================================

/// Single-token nodes: identifier names, literals, keyword types.
#[derive(Clone, Debug)]
pub struct TokenData {
    pub token: Token,
}

/// `left . right` / `left :: right`; also postfix member access.
#[derive(Clone, Debug)]
pub struct ScopedNameData {
    pub left: NodeIndex,
    pub separator: Token,
    pub right: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct UnaryExprData {
    pub operator_token: Token,
    pub operand: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: Token,
    pub right: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ConditionalExprData {
    pub predicate: NodeIndex,
    pub question: Token,
    pub when_true: NodeIndex,
    pub colon: Token,
    pub when_false: NodeIndex,
}

/// `expr [matches pattern] (&&& expr [matches pattern])*`
#[derive(Clone, Debug)]
pub struct ConditionalPredicateData {
    pub conditions: SeparatedList,
}

#[derive(Clone, Debug)]
pub struct ConditionalPatternData {
    pub expression: NodeIndex,
    pub matches_keyword: Option<Token>,
    pub pattern: Option<NodeIndex>,
}

/// `.*`, `.name`, `(pattern)`, or an expression pattern; unused fields stay
/// `None` and the kind tag says which form this is.
#[derive(Clone, Debug)]
pub struct PatternData {
    pub dot: Option<Token>,
    pub name: Option<Token>,
    pub open_paren: Option<Token>,
    pub inner: Option<NodeIndex>,
    pub close_paren: Option<Token>,
}

#[derive(Clone, Debug)]
pub struct ParenthesizedData {
    pub open_paren: Token,
    pub expression: NodeIndex,
    pub close_paren: Token,
}

#[derive(Clone, Debug)]
pub struct MinTypMaxData {
    pub min: NodeIndex,
    pub colon1: Token,
    pub typ: NodeIndex,
    pub colon2: Token,
    pub max: NodeIndex,
}

/// Brace-delimited separated list: concatenations and open range lists.
#[derive(Clone, Debug)]
pub struct BracedListData {
    pub open_brace: Token,
    pub elements: SeparatedList,
    pub close_brace: Token,
}

#[derive(Clone, Debug)]
pub struct MultipleConcatData {
    pub open_brace: Token,
    pub count: NodeIndex,
    pub concatenation: NodeIndex,
    pub close_brace: Token,
}

#[derive(Clone, Debug)]
pub struct StreamingConcatData {
    pub open_brace: Token,
    pub operator_token: Token,
    pub slice_size: Option<NodeIndex>,
    pub inner_open: Token,
    pub expressions: SeparatedList,
    pub inner_close: Token,
    pub close_brace: Token,
}

#[derive(Clone, Debug)]
pub struct EmptyQueueData {
    pub open_brace: Token,
    pub close_brace: Token,
}

#[derive(Clone, Debug)]
pub struct ElementSelectData {
    pub value: NodeIndex,
    pub open_bracket: Token,
    pub selector: Option<NodeIndex>,
    pub close_bracket: Token,
}

#[derive(Clone, Debug)]
pub struct BitSelectData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct RangeSelectData {
    pub left: NodeIndex,
    pub range_token: Token,
    pub right: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct InvocationData {
    pub left: NodeIndex,
    pub arguments: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ArgumentListData {
    pub open_paren: Token,
    pub arguments: SeparatedList,
    pub close_paren: Token,
}

/// Ordered arguments only use `expression`; named arguments use all fields.
#[derive(Clone, Debug)]
pub struct ArgumentData {
    pub dot: Option<Token>,
    pub name: Option<Token>,
    pub open_paren: Option<Token>,
    pub expression: Option<NodeIndex>,
    pub close_paren: Option<Token>,
}

/// `left'(inner)` where `left` is a data type or a size expression.
#[derive(Clone, Debug)]
pub struct CastData {
    pub left: NodeIndex,
    pub apostrophe: Token,
    pub open_paren: Token,
    pub inner: NodeIndex,
    pub close_paren: Token,
}

#[derive(Clone, Debug)]
pub struct NewExprData {
    pub new_keyword: Token,
    pub open_bracket: Option<Token>,
    pub size: Option<NodeIndex>,
    pub close_bracket: Option<Token>,
    pub arguments: Option<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct InsideExprData {
    pub expression: NodeIndex,
    pub inside_keyword: Token,
    pub ranges: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ValueRangeData {
    pub open_bracket: Token,
    pub left: NodeIndex,
    pub colon: Token,
    pub right: NodeIndex,
    pub close_bracket: Token,
}

#[derive(Clone, Debug)]
pub struct AssignmentPatternData {
    pub type_node: Option<NodeIndex>,
    pub open: Token,
    pub items: SeparatedList,
    pub close_brace: Token,
}

#[derive(Clone, Debug)]
pub struct AssignmentPatternItemData {
    pub key: NodeIndex,
    pub colon: Token,
    pub value: NodeIndex,
}

/// `count { expr, ... }` replication inside an assignment pattern.
#[derive(Clone, Debug)]
pub struct ReplicatedPatternItemData {
    pub count: NodeIndex,
    pub concatenation: NodeIndex,
}

/// Placeholder synthesized when no expression/statement could be parsed.
#[derive(Clone, Debug)]
pub struct BadData {
    pub token: Option<Token>,
}

// ============================================================================
// Timing controls and event expressions
// ============================================================================

#[derive(Clone, Debug)]
pub struct DelayControlData {
    pub hash: Token,
    pub delay: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct EventControlData {
    pub at: Token,
    pub event: NodeIndex,
}

/// `@*` or `@(*)`.
#[derive(Clone, Debug)]
pub struct ImplicitEventData {
    pub at: Token,
    pub tokens: Vec<Token>,
}

#[derive(Clone, Debug)]
pub struct SignalEventData {
    pub edge: Option<Token>,
    pub expression: NodeIndex,
    pub iff_clause: Option<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct BinaryEventData {
    pub left: NodeIndex,
    pub or_token: Token,
    pub right: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct IffClauseData {
    pub iff_keyword: Token,
    pub expression: NodeIndex,
}

// ============================================================================
// Shared small clauses
// ============================================================================

#[derive(Clone, Debug)]
pub struct NamedLabelData {
    pub name: Token,
    pub colon: Token,
}

/// `: name` after begin/end/endmodule/join keywords.
#[derive(Clone, Debug)]
pub struct NamedBlockClauseData {
    pub colon: Token,
    pub name: Token,
}

/// `else item` for statements, constraints, and generate constructs.
#[derive(Clone, Debug)]
pub struct ElseClauseData {
    pub else_keyword: Token,
    pub item: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct EqualsValueData {
    pub equals: Token,
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct DeclaratorData {
    pub name: Token,
    pub dimensions: Vec<NodeIndex>,
    pub initializer: Option<NodeIndex>,
}

/// All dimension forms; the kind tag says which fields are populated:
/// `[a:b]` range, `[a]` expression, `[]` unsized, `[*]` wildcard,
/// `[$]` / `[$:n]` queue.
#[derive(Clone, Debug)]
pub struct DimensionData {
    pub open_bracket: Token,
    pub left: Option<NodeIndex>,
    pub marker: Option<Token>,
    pub colon: Option<Token>,
    pub right: Option<NodeIndex>,
    pub close_bracket: Token,
}

#[derive(Clone, Debug)]
pub struct AttributeInstanceData {
    pub open: Token,
    pub specs: SeparatedList,
    pub close: Token,
}

#[derive(Clone, Debug)]
pub struct AttributeSpecData {
    pub name: Token,
    pub value: Option<NodeIndex>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Clone, Debug)]
pub struct EmptyStatementData {
    pub label: Option<NodeIndex>,
    pub attributes: Vec<NodeIndex>,
    pub semicolon: Token,
}

#[derive(Clone, Debug)]
pub struct ConditionalStatementData {
    pub label: Option<NodeIndex>,
    pub attributes: Vec<NodeIndex>,
    pub unique_or_priority: Option<Token>,
    pub if_keyword: Token,
    pub open_paren: Token,
    pub predicate: NodeIndex,
    pub close_paren: Token,
    pub statement: NodeIndex,
    pub else_clause: Option<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct CaseStatementData {
    pub label: Option<NodeIndex>,
    pub attributes: Vec<NodeIndex>,
    pub unique_or_priority: Option<Token>,
    pub case_keyword: Token,
    pub open_paren: Option<Token>,
    pub expression: Option<NodeIndex>,
    pub close_paren: Option<Token>,
    pub items: Vec<NodeIndex>,
    pub end_keyword: Token,
}

/// Standard items use `expressions`; default items use `default_keyword`.
#[derive(Clone, Debug)]
pub struct CaseItemData {
    pub expressions: SeparatedList,
    pub default_keyword: Option<Token>,
    pub colon: Option<Token>,
    pub item: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ForLoopData {
    pub label: Option<NodeIndex>,
    pub attributes: Vec<NodeIndex>,
    pub for_keyword: Token,
    pub open_paren: Token,
    pub initializers: SeparatedList,
    pub semi1: Token,
    pub condition: Option<NodeIndex>,
    pub semi2: Token,
    pub steps: SeparatedList,
    pub close_paren: Token,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ForVariableDeclData {
    pub type_node: NodeIndex,
    pub declarator: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ForeachLoopData {
    pub label: Option<NodeIndex>,
    pub attributes: Vec<NodeIndex>,
    pub keyword: Token,
    pub open_paren: Token,
    pub array_name: NodeIndex,
    pub open_bracket: Token,
    pub loop_variables: SeparatedList,
    pub close_bracket: Token,
    pub close_paren: Token,
    pub statement: NodeIndex,
}

/// while/repeat (with parenthesized expression) and forever (bare).
#[derive(Clone, Debug)]
pub struct LoopStatementData {
    pub label: Option<NodeIndex>,
    pub attributes: Vec<NodeIndex>,
    pub keyword: Token,
    pub open_paren: Option<Token>,
    pub expression: Option<NodeIndex>,
    pub close_paren: Option<Token>,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct DoWhileData {
    pub label: Option<NodeIndex>,
    pub attributes: Vec<NodeIndex>,
    pub do_keyword: Token,
    pub statement: NodeIndex,
    pub while_keyword: Token,
    pub open_paren: Token,
    pub expression: NodeIndex,
    pub close_paren: Token,
    pub semicolon: Token,
}

#[derive(Clone, Debug)]
pub struct ReturnStatementData {
    pub label: Option<NodeIndex>,
    pub attributes: Vec<NodeIndex>,
    pub keyword: Token,
    pub expression: Option<NodeIndex>,
    pub semicolon: Token,
}

/// break/continue.
#[derive(Clone, Debug)]
pub struct JumpStatementData {
    pub label: Option<NodeIndex>,
    pub attributes: Vec<NodeIndex>,
    pub keyword: Token,
    pub semicolon: Token,
}

#[derive(Clone, Debug)]
pub struct DisableStatementData {
    pub label: Option<NodeIndex>,
    pub attributes: Vec<NodeIndex>,
    pub keyword: Token,
    pub fork_keyword: Option<Token>,
    pub name: Option<NodeIndex>,
    pub semicolon: Token,
}

/// assign/force/deassign/release; the kind tag distinguishes.
#[derive(Clone, Debug)]
pub struct ProceduralAssignData {
    pub label: Option<NodeIndex>,
    pub attributes: Vec<NodeIndex>,
    pub keyword: Token,
    pub expression: NodeIndex,
    pub semicolon: Token,
}

#[derive(Clone, Debug)]
pub struct AssertionStatementData {
    pub label: Option<NodeIndex>,
    pub attributes: Vec<NodeIndex>,
    pub keyword: Token,
    pub open_paren: Token,
    pub expression: NodeIndex,
    pub close_paren: Token,
    pub action: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ActionBlockData {
    pub statement: Option<NodeIndex>,
    pub else_clause: Option<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct TimingStatementData {
    pub label: Option<NodeIndex>,
    pub attributes: Vec<NodeIndex>,
    pub timing_control: NodeIndex,
    pub statement: NodeIndex,
}

/// `-> event_name;`
#[derive(Clone, Debug)]
pub struct EventTriggerData {
    pub label: Option<NodeIndex>,
    pub attributes: Vec<NodeIndex>,
    pub arrow: Token,
    pub name: NodeIndex,
    pub semicolon: Token,
}

#[derive(Clone, Debug)]
pub struct WaitStatementData {
    pub label: Option<NodeIndex>,
    pub attributes: Vec<NodeIndex>,
    pub keyword: Token,
    pub open_paren: Token,
    pub expression: NodeIndex,
    pub close_paren: Token,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct WaitForkData {
    pub label: Option<NodeIndex>,
    pub attributes: Vec<NodeIndex>,
    pub wait_keyword: Token,
    pub fork_keyword: Token,
    pub semicolon: Token,
}

#[derive(Clone, Debug)]
pub struct WaitOrderData {
    pub label: Option<NodeIndex>,
    pub attributes: Vec<NodeIndex>,
    pub keyword: Token,
    pub open_paren: Token,
    pub names: SeparatedList,
    pub close_paren: Token,
    pub action: NodeIndex,
}

/// begin/end and fork/join blocks; the kind tag distinguishes.
#[derive(Clone, Debug)]
pub struct BlockStatementData {
    pub label: Option<NodeIndex>,
    pub attributes: Vec<NodeIndex>,
    pub begin_keyword: Token,
    pub block_name: Option<NodeIndex>,
    pub items: Vec<NodeIndex>,
    pub end_keyword: Token,
    pub end_name: Option<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct ExpressionStatementData {
    pub label: Option<NodeIndex>,
    pub attributes: Vec<NodeIndex>,
    pub expression: NodeIndex,
    pub semicolon: Token,
}

// ============================================================================
// Members and declarations
// ============================================================================

#[derive(Clone, Debug)]
pub struct CompilationUnitData {
    pub members: Vec<NodeIndex>,
    pub end_of_file: Token,
}

/// module/interface/program/package declarations share this shape; package
/// headers simply carry no port lists.
#[derive(Clone, Debug)]
pub struct ModuleDeclarationData {
    pub attributes: Vec<NodeIndex>,
    pub header: NodeIndex,
    pub members: Vec<NodeIndex>,
    pub end_keyword: Token,
    pub end_name: Option<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct ModuleHeaderData {
    pub keyword: Token,
    pub lifetime: Option<Token>,
    pub name: Token,
    pub parameter_ports: Option<NodeIndex>,
    pub ports: Option<NodeIndex>,
    pub semicolon: Token,
}

#[derive(Clone, Debug)]
pub struct ParameterPortListData {
    pub hash: Token,
    pub open_paren: Token,
    pub declarations: SeparatedList,
    pub close_paren: Token,
}

#[derive(Clone, Debug)]
pub struct ParameterDeclarationData {
    pub attributes: Vec<NodeIndex>,
    pub keyword: Option<Token>,
    pub type_node: NodeIndex,
    pub declarators: SeparatedList,
    pub semicolon: Option<Token>,
}

#[derive(Clone, Debug)]
pub struct PortListData {
    pub open_paren: Token,
    pub ports: SeparatedList,
    pub close_paren: Token,
}

#[derive(Clone, Debug)]
pub struct AnsiPortData {
    pub direction: Option<Token>,
    pub net_or_var: Option<Token>,
    pub type_node: NodeIndex,
    pub name: Token,
    pub dimensions: Vec<NodeIndex>,
    pub initializer: Option<NodeIndex>,
}

/// Implicit ports use `expression`; explicit `.name(expr)` ports use the
/// rest.
#[derive(Clone, Debug)]
pub struct NonAnsiPortData {
    pub expression: Option<NodeIndex>,
    pub dot: Option<Token>,
    pub name: Option<Token>,
    pub open_paren: Option<Token>,
    pub inner: Option<NodeIndex>,
    pub close_paren: Option<Token>,
}

#[derive(Clone, Debug)]
pub struct PortDeclarationData {
    pub attributes: Vec<NodeIndex>,
    pub direction: Token,
    pub net_or_var: Option<Token>,
    pub type_node: NodeIndex,
    pub declarators: SeparatedList,
    pub semicolon: Token,
}

#[derive(Clone, Debug)]
pub struct DataDeclarationData {
    pub attributes: Vec<NodeIndex>,
    pub modifiers: Vec<Token>,
    pub type_node: NodeIndex,
    pub declarators: SeparatedList,
    pub semicolon: Token,
}

#[derive(Clone, Debug)]
pub struct NetDeclarationData {
    pub attributes: Vec<NodeIndex>,
    pub net_type: Token,
    pub type_node: NodeIndex,
    pub declarators: SeparatedList,
    pub semicolon: Token,
}

#[derive(Clone, Debug)]
pub struct TypedefData {
    pub attributes: Vec<NodeIndex>,
    pub keyword: Token,
    pub type_node: NodeIndex,
    pub name: Token,
    pub dimensions: Vec<NodeIndex>,
    pub semicolon: Token,
}

#[derive(Clone, Debug)]
pub struct PackageImportData {
    pub attributes: Vec<NodeIndex>,
    pub keyword: Token,
    pub items: SeparatedList,
    pub semicolon: Token,
}

/// `pkg::name` or `pkg::*`.
#[derive(Clone, Debug)]
pub struct PackageImportItemData {
    pub package: Token,
    pub double_colon: Token,
    pub item: Token,
}

#[derive(Clone, Debug)]
pub struct GenvarDeclarationData {
    pub attributes: Vec<NodeIndex>,
    pub keyword: Token,
    pub identifiers: SeparatedList,
    pub semicolon: Token,
}

/// `timeunit 1ns / 1ps;` or `timeprecision 1ps;`.
#[derive(Clone, Debug)]
pub struct TimeUnitsDeclarationData {
    pub attributes: Vec<NodeIndex>,
    pub keyword: Token,
    pub time: Token,
    pub slash: Option<Token>,
    pub divider: Option<Token>,
    pub semicolon: Token,
}

#[derive(Clone, Debug)]
pub struct ContinuousAssignData {
    pub attributes: Vec<NodeIndex>,
    pub keyword: Token,
    pub delay: Option<NodeIndex>,
    pub assignments: SeparatedList,
    pub semicolon: Token,
}

/// initial/final/always-family blocks; the kind tag distinguishes.
#[derive(Clone, Debug)]
pub struct ProceduralBlockData {
    pub attributes: Vec<NodeIndex>,
    pub keyword: Token,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct GenerateRegionData {
    pub attributes: Vec<NodeIndex>,
    pub keyword: Token,
    pub members: Vec<NodeIndex>,
    pub end_keyword: Token,
}

#[derive(Clone, Debug)]
pub struct LoopGenerateData {
    pub attributes: Vec<NodeIndex>,
    pub for_keyword: Token,
    pub open_paren: Token,
    pub genvar_keyword: Option<Token>,
    pub identifier: Token,
    pub equals: Token,
    pub initial_expr: NodeIndex,
    pub semi1: Token,
    pub condition: NodeIndex,
    pub semi2: Token,
    pub iteration_expr: NodeIndex,
    pub close_paren: Token,
    pub block: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct IfGenerateData {
    pub attributes: Vec<NodeIndex>,
    pub if_keyword: Token,
    pub open_paren: Token,
    pub condition: NodeIndex,
    pub close_paren: Token,
    pub block: NodeIndex,
    pub else_clause: Option<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct CaseGenerateData {
    pub attributes: Vec<NodeIndex>,
    pub keyword: Token,
    pub open_paren: Token,
    pub condition: NodeIndex,
    pub close_paren: Token,
    pub items: Vec<NodeIndex>,
    pub end_keyword: Token,
}

#[derive(Clone, Debug)]
pub struct GenerateBlockData {
    pub begin_keyword: Token,
    pub block_name: Option<NodeIndex>,
    pub members: Vec<NodeIndex>,
    pub end_keyword: Token,
    pub end_name: Option<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct HierarchyInstantiationData {
    pub attributes: Vec<NodeIndex>,
    pub type_name: Token,
    pub parameters: Option<NodeIndex>,
    pub instances: SeparatedList,
    pub semicolon: Token,
}

#[derive(Clone, Debug)]
pub struct ParamValueAssignData {
    pub hash: Token,
    pub arguments: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct HierarchicalInstanceData {
    pub name: Token,
    pub dimensions: Vec<NodeIndex>,
    pub open_paren: Token,
    pub connections: SeparatedList,
    pub close_paren: Token,
}

/// Ordered connections use `expression`; named use `dot`/`name`/parens;
/// wildcard uses `dot_star`.
#[derive(Clone, Debug)]
pub struct PortConnectionData {
    pub expression: Option<NodeIndex>,
    pub dot: Option<Token>,
    pub name: Option<Token>,
    pub open_paren: Option<Token>,
    pub inner: Option<NodeIndex>,
    pub close_paren: Option<Token>,
    pub dot_star: Option<Token>,
}

#[derive(Clone, Debug)]
pub struct FunctionDeclarationData {
    pub attributes: Vec<NodeIndex>,
    pub prototype: NodeIndex,
    pub items: Vec<NodeIndex>,
    pub end_keyword: Token,
    pub end_name: Option<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct FunctionPrototypeData {
    pub keyword: Token,
    pub lifetime: Option<Token>,
    pub return_type: Option<NodeIndex>,
    pub name: NodeIndex,
    pub ports: Option<NodeIndex>,
    pub semicolon: Token,
}

#[derive(Clone, Debug)]
pub struct ClassDeclarationData {
    pub attributes: Vec<NodeIndex>,
    pub virtual_keyword: Option<Token>,
    pub class_keyword: Token,
    pub lifetime: Option<Token>,
    pub name: Token,
    pub parameter_ports: Option<NodeIndex>,
    pub extends_clause: Option<NodeIndex>,
    pub implements_clause: Option<NodeIndex>,
    pub semicolon: Token,
    pub members: Vec<NodeIndex>,
    pub end_keyword: Token,
    pub end_name: Option<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct ExtendsClauseData {
    pub keyword: Token,
    pub base_name: NodeIndex,
    pub arguments: Option<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct ImplementsClauseData {
    pub keyword: Token,
    pub names: SeparatedList,
}

#[derive(Clone, Debug)]
pub struct ClassPropertyData {
    pub qualifiers: Vec<Token>,
    pub declaration: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ClassMethodData {
    pub qualifiers: Vec<Token>,
    pub declaration: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ConstraintDeclarationData {
    pub qualifiers: Vec<Token>,
    pub keyword: Token,
    pub name: Token,
    pub block: NodeIndex,
}

/// Constraint blocks and nested `{ }` constraint sets.
#[derive(Clone, Debug)]
pub struct ConstraintBlockData {
    pub open_brace: Token,
    pub items: Vec<NodeIndex>,
    pub close_brace: Token,
}

#[derive(Clone, Debug)]
pub struct ExpressionConstraintData {
    pub expression: NodeIndex,
    pub semicolon: Token,
}

#[derive(Clone, Debug)]
pub struct ImplicationConstraintData {
    pub left: NodeIndex,
    pub arrow: Token,
    pub constraints: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ConditionalConstraintData {
    pub if_keyword: Token,
    pub open_paren: Token,
    pub condition: NodeIndex,
    pub close_paren: Token,
    pub constraints: NodeIndex,
    pub else_clause: Option<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct UniquenessConstraintData {
    pub keyword: Token,
    pub ranges: NodeIndex,
    pub semicolon: Token,
}

#[derive(Clone, Debug)]
pub struct EmptyMemberData {
    pub attributes: Vec<NodeIndex>,
    pub semicolon: Token,
}

// ============================================================================
// Data types
// ============================================================================

#[derive(Clone, Debug)]
pub struct IntegerTypeData {
    pub keyword: Token,
    pub signing: Option<Token>,
    pub dimensions: Vec<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct StructUnionTypeData {
    pub keyword: Token,
    pub packed: Option<Token>,
    pub signing: Option<Token>,
    pub open_brace: Token,
    pub members: Vec<NodeIndex>,
    pub close_brace: Token,
    pub dimensions: Vec<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct StructUnionMemberData {
    pub type_node: NodeIndex,
    pub declarators: SeparatedList,
    pub semicolon: Token,
}

#[derive(Clone, Debug)]
pub struct EnumTypeData {
    pub keyword: Token,
    pub base_type: Option<NodeIndex>,
    pub open_brace: Token,
    pub members: SeparatedList,
    pub close_brace: Token,
    pub dimensions: Vec<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct NamedTypeData {
    pub name: NodeIndex,
}

/// Implicit types may still carry signing and packed dimensions
/// (`input signed [3:0] x`); a fully empty implicit type is zero-width.
#[derive(Clone, Debug)]
pub struct ImplicitTypeData {
    pub signing: Option<Token>,
    pub dimensions: Vec<NodeIndex>,
}

// ============================================================================
// The closed payload enum
// ============================================================================

#[derive(Clone, Debug)]
pub enum NodeData {
    Token(TokenData),
    ScopedName(ScopedNameData),
    Unary(UnaryExprData),
    Binary(BinaryExprData),
    Conditional(ConditionalExprData),
    CondPredicate(ConditionalPredicateData),
    CondPattern(ConditionalPatternData),
    Pattern(PatternData),
    Parenthesized(ParenthesizedData),
    MinTypMax(MinTypMaxData),
    BracedList(BracedListData),
    MultipleConcat(MultipleConcatData),
    Streaming(StreamingConcatData),
    EmptyQueue(EmptyQueueData),
    ElementSelect(ElementSelectData),
    BitSelect(BitSelectData),
    RangeSelect(RangeSelectData),
    Invocation(InvocationData),
    ArgumentList(ArgumentListData),
    Argument(ArgumentData),
    Cast(CastData),
    New(NewExprData),
    Inside(InsideExprData),
    ValueRange(ValueRangeData),
    AssignmentPattern(AssignmentPatternData),
    AssignmentPatternItem(AssignmentPatternItemData),
    ReplicatedPatternItem(ReplicatedPatternItemData),
    Bad(BadData),
    DelayControl(DelayControlData),
    EventControl(EventControlData),
    ImplicitEvent(ImplicitEventData),
    SignalEvent(SignalEventData),
    BinaryEvent(BinaryEventData),
    IffClause(IffClauseData),
    NamedLabel(NamedLabelData),
    NamedBlockClause(NamedBlockClauseData),
    ElseClause(ElseClauseData),
    EqualsValue(EqualsValueData),
    Declarator(DeclaratorData),
    Dimension(DimensionData),
    AttributeInstance(AttributeInstanceData),
    AttributeSpec(AttributeSpecData),
    EmptyStatement(EmptyStatementData),
    ConditionalStatement(ConditionalStatementData),
    CaseStatement(CaseStatementData),
    CaseItem(CaseItemData),
    ForLoop(ForLoopData),
    ForVariableDecl(ForVariableDeclData),
    ForeachLoop(ForeachLoopData),
    Loop(LoopStatementData),
    DoWhile(DoWhileData),
    Return(ReturnStatementData),
    Jump(JumpStatementData),
    Disable(DisableStatementData),
    ProceduralAssign(ProceduralAssignData),
    Assertion(AssertionStatementData),
    ActionBlock(ActionBlockData),
    TimingStatement(TimingStatementData),
    EventTrigger(EventTriggerData),
    Wait(WaitStatementData),
    WaitFork(WaitForkData),
    WaitOrder(WaitOrderData),
    Block(BlockStatementData),
    ExpressionStatement(ExpressionStatementData),
    CompilationUnit(CompilationUnitData),
    ModuleDeclaration(ModuleDeclarationData),
    ModuleHeader(ModuleHeaderData),
    ParameterPortList(ParameterPortListData),
    ParameterDeclaration(ParameterDeclarationData),
    PortList(PortListData),
    AnsiPort(AnsiPortData),
    NonAnsiPort(NonAnsiPortData),
    PortDeclaration(PortDeclarationData),
    DataDeclaration(DataDeclarationData),
    NetDeclaration(NetDeclarationData),
    Typedef(TypedefData),
    PackageImport(PackageImportData),
    PackageImportItem(PackageImportItemData),
    GenvarDeclaration(GenvarDeclarationData),
    TimeUnitsDeclaration(TimeUnitsDeclarationData),
    ContinuousAssign(ContinuousAssignData),
    ProceduralBlock(ProceduralBlockData),
    GenerateRegion(GenerateRegionData),
    LoopGenerate(LoopGenerateData),
    IfGenerate(IfGenerateData),
    CaseGenerate(CaseGenerateData),
    GenerateBlock(GenerateBlockData),
    HierarchyInstantiation(HierarchyInstantiationData),
    ParamValueAssign(ParamValueAssignData),
    HierarchicalInstance(HierarchicalInstanceData),
    PortConnection(PortConnectionData),
    FunctionDeclaration(FunctionDeclarationData),
    FunctionPrototype(FunctionPrototypeData),
    ClassDeclaration(ClassDeclarationData),
    ExtendsClause(ExtendsClauseData),
    ImplementsClause(ImplementsClauseData),
    ClassProperty(ClassPropertyData),
    ClassMethod(ClassMethodData),
    ConstraintDeclaration(ConstraintDeclarationData),
    ConstraintBlock(ConstraintBlockData),
    ExpressionConstraint(ExpressionConstraintData),
    ImplicationConstraint(ImplicationConstraintData),
    ConditionalConstraint(ConditionalConstraintData),
    UniquenessConstraint(UniquenessConstraintData),
    EmptyMember(EmptyMemberData),
    IntegerType(IntegerTypeData),
    KeywordType(TokenData),
    StructUnionType(StructUnionTypeData),
    StructUnionMember(StructUnionMemberData),
    EnumType(EnumTypeData),
    NamedType(NamedTypeData),
    ImplicitType(ImplicitTypeData),
}
