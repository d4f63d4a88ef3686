//! Token kinds for the SystemVerilog lexer.
//!
//! `TokenKind` is a closed enumeration: every lexical category the parser
//! can observe has a variant here, including `EndOfFile` and `Unknown`.
//! The parser treats unexpected end-of-file as an ordinary token kind,
//! never as an exceptional control-flow event.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Unknown,
    EndOfFile,

    // Identifiers and literals
    Identifier,
    SystemIdentifier,
    IntegerLiteral,
    UnbasedUnsizedLiteral,
    RealLiteral,
    TimeLiteral,
    StringLiteral,

    // Punctuation
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    ApostropheOpenBrace,
    OpenParenStar,
    StarCloseParen,
    Semicolon,
    Colon,
    DoubleColon,
    Comma,
    Dot,
    DotStar,
    Question,
    Hash,
    At,
    Dollar,
    Apostrophe,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    DoubleStar,
    Equals,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    AndEqual,
    OrEqual,
    XorEqual,
    LeftShiftEqual,
    RightShiftEqual,
    TripleLeftShiftEqual,
    TripleRightShiftEqual,
    DoubleEquals,
    ExclamationEquals,
    TripleEquals,
    ExclamationDoubleEquals,
    DoubleEqualsQuestion,
    ExclamationEqualsQuestion,
    LessThan,
    LessThanEquals,
    GreaterThan,
    GreaterThanEquals,
    LeftShift,
    RightShift,
    TripleLeftShift,
    TripleRightShift,
    And,
    DoubleAnd,
    TripleAnd,
    Or,
    DoubleOr,
    Xor,
    XorTilde,
    TildeXor,
    Tilde,
    TildeAnd,
    TildeOr,
    Exclamation,
    DoublePlus,
    DoubleMinus,
    MinusArrow,
    LessThanMinusArrow,
    PlusColon,
    MinusColon,

    // Keywords - declarations and scopes
    ModuleKeyword,
    MacromoduleKeyword,
    EndModuleKeyword,
    InterfaceKeyword,
    EndInterfaceKeyword,
    ProgramKeyword,
    EndProgramKeyword,
    PackageKeyword,
    EndPackageKeyword,
    ClassKeyword,
    EndClassKeyword,
    VirtualKeyword,
    ExtendsKeyword,
    ImplementsKeyword,
    FunctionKeyword,
    EndFunctionKeyword,
    TaskKeyword,
    EndTaskKeyword,
    BeginKeyword,
    EndKeyword,
    ForkKeyword,
    JoinKeyword,
    JoinAnyKeyword,
    JoinNoneKeyword,
    GenerateKeyword,
    EndGenerateKeyword,
    GenvarKeyword,
    TypedefKeyword,
    ImportKeyword,
    ParameterKeyword,
    LocalParamKeyword,
    ConstraintKeyword,
    TimeUnitKeyword,
    TimePrecisionKeyword,

    // Keywords - statements
    IfKeyword,
    ElseKeyword,
    CaseKeyword,
    CaseXKeyword,
    CaseZKeyword,
    EndCaseKeyword,
    RandCaseKeyword,
    DefaultKeyword,
    ForKeyword,
    ForeachKeyword,
    ForeverKeyword,
    RepeatKeyword,
    WhileKeyword,
    DoKeyword,
    ReturnKeyword,
    BreakKeyword,
    ContinueKeyword,
    DisableKeyword,
    AssignKeyword,
    DeassignKeyword,
    ForceKeyword,
    ReleaseKeyword,
    InitialKeyword,
    FinalKeyword,
    AlwaysKeyword,
    AlwaysCombKeyword,
    AlwaysFfKeyword,
    AlwaysLatchKeyword,
    WaitKeyword,
    WaitOrderKeyword,
    AssertKeyword,
    AssumeKeyword,
    CoverKeyword,
    UniqueKeyword,
    Unique0Keyword,
    PriorityKeyword,

    // Keywords - expressions
    MatchesKeyword,
    InsideKeyword,
    NewKeyword,
    ThisKeyword,
    SuperKeyword,
    NullKeyword,

    // Keywords - types and qualifiers
    EnumKeyword,
    StructKeyword,
    UnionKeyword,
    PackedKeyword,
    SignedKeyword,
    UnsignedKeyword,
    ConstKeyword,
    VarKeyword,
    StaticKeyword,
    AutomaticKeyword,
    LocalKeyword,
    ProtectedKeyword,
    RandKeyword,
    RandCKeyword,
    PureKeyword,
    InputKeyword,
    OutputKeyword,
    InOutKeyword,
    RefKeyword,
    VoidKeyword,

    // Keywords - net types
    WireKeyword,
    WAndKeyword,
    WOrKeyword,
    TriKeyword,
    TriAndKeyword,
    TriOrKeyword,
    Tri0Keyword,
    Tri1Keyword,
    TriRegKeyword,
    UWireKeyword,
    Supply0Keyword,
    Supply1Keyword,

    // Keywords - data types
    BitKeyword,
    LogicKeyword,
    RegKeyword,
    ByteKeyword,
    ShortIntKeyword,
    IntKeyword,
    LongIntKeyword,
    IntegerKeyword,
    TimeKeyword,
    RealKeyword,
    ShortRealKeyword,
    RealTimeKeyword,
    StringKeyword,
    CHandleKeyword,
    EventKeyword,

    // Keywords - timing
    PosEdgeKeyword,
    NegEdgeKeyword,
    EdgeKeyword,
    OrKeyword,
    IffKeyword,
}

impl TokenKind {
    /// Human-readable text for diagnostics ("expected ';'").
    pub fn display_text(self) -> &'static str {
        use TokenKind::*;
        match self {
            Unknown => "<unknown>",
            EndOfFile => "end of file",
            Identifier => "identifier",
            SystemIdentifier => "system identifier",
            IntegerLiteral => "integer literal",
            UnbasedUnsizedLiteral => "unbased unsized literal",
            RealLiteral => "real literal",
            TimeLiteral => "time literal",
            StringLiteral => "string literal",
            OpenParen => "(",
            CloseParen => ")",
            OpenBracket => "[",
            CloseBracket => "]",
            OpenBrace => "{",
            CloseBrace => "}",
            ApostropheOpenBrace => "'{",
            OpenParenStar => "(*",
            StarCloseParen => "*)",
            Semicolon => ";",
            Colon => ":",
            DoubleColon => "::",
            Comma => ",",
            Dot => ".",
            DotStar => ".*",
            Question => "?",
            Hash => "#",
            At => "@",
            Dollar => "$",
            Apostrophe => "'",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            DoubleStar => "**",
            Equals => "=",
            PlusEqual => "+=",
            MinusEqual => "-=",
            StarEqual => "*=",
            SlashEqual => "/=",
            PercentEqual => "%=",
            AndEqual => "&=",
            OrEqual => "|=",
            XorEqual => "^=",
            LeftShiftEqual => "<<=",
            RightShiftEqual => ">>=",
            TripleLeftShiftEqual => "<<<=",
            TripleRightShiftEqual => ">>>=",
            DoubleEquals => "==",
            ExclamationEquals => "!=",
            TripleEquals => "===",
            ExclamationDoubleEquals => "!==",
            DoubleEqualsQuestion => "==?",
            ExclamationEqualsQuestion => "!=?",
            LessThan => "<",
            LessThanEquals => "<=",
            GreaterThan => ">",
            GreaterThanEquals => ">=",
            LeftShift => "<<",
            RightShift => ">>",
            TripleLeftShift => "<<<",
            TripleRightShift => ">>>",
            And => "&",
            DoubleAnd => "&&",
            TripleAnd => "&&&",
            Or => "|",
            DoubleOr => "||",
            Xor => "^",
            XorTilde => "^~",
            TildeXor => "~^",
            Tilde => "~",
            TildeAnd => "~&",
            TildeOr => "~|",
            Exclamation => "!",
            DoublePlus => "++",
            DoubleMinus => "--",
            MinusArrow => "->",
            LessThanMinusArrow => "<->",
            PlusColon => "+:",
            MinusColon => "-:",
            ModuleKeyword => "module",
            MacromoduleKeyword => "macromodule",
            EndModuleKeyword => "endmodule",
            InterfaceKeyword => "interface",
            EndInterfaceKeyword => "endinterface",
            ProgramKeyword => "program",
            EndProgramKeyword => "endprogram",
            PackageKeyword => "package",
            EndPackageKeyword => "endpackage",
            ClassKeyword => "class",
            EndClassKeyword => "endclass",
            VirtualKeyword => "virtual",
            ExtendsKeyword => "extends",
            ImplementsKeyword => "implements",
            FunctionKeyword => "function",
            EndFunctionKeyword => "endfunction",
            TaskKeyword => "task",
            EndTaskKeyword => "endtask",
            BeginKeyword => "begin",
            EndKeyword => "end",
            ForkKeyword => "fork",
            JoinKeyword => "join",
            JoinAnyKeyword => "join_any",
            JoinNoneKeyword => "join_none",
            GenerateKeyword => "generate",
            EndGenerateKeyword => "endgenerate",
            GenvarKeyword => "genvar",
            TypedefKeyword => "typedef",
            ImportKeyword => "import",
            ParameterKeyword => "parameter",
            LocalParamKeyword => "localparam",
            ConstraintKeyword => "constraint",
            TimeUnitKeyword => "timeunit",
            TimePrecisionKeyword => "timeprecision",
            IfKeyword => "if",
            ElseKeyword => "else",
            CaseKeyword => "case",
            CaseXKeyword => "casex",
            CaseZKeyword => "casez",
            EndCaseKeyword => "endcase",
            RandCaseKeyword => "randcase",
            DefaultKeyword => "default",
            ForKeyword => "for",
            ForeachKeyword => "foreach",
            ForeverKeyword => "forever",
            RepeatKeyword => "repeat",
            WhileKeyword => "while",
            DoKeyword => "do",
            ReturnKeyword => "return",
            BreakKeyword => "break",
            ContinueKeyword => "continue",
            DisableKeyword => "disable",
            AssignKeyword => "assign",
            DeassignKeyword => "deassign",
            ForceKeyword => "force",
            ReleaseKeyword => "release",
            InitialKeyword => "initial",
            FinalKeyword => "final",
            AlwaysKeyword => "always",
            AlwaysCombKeyword => "always_comb",
            AlwaysFfKeyword => "always_ff",
            AlwaysLatchKeyword => "always_latch",
            WaitKeyword => "wait",
            WaitOrderKeyword => "wait_order",
            AssertKeyword => "assert",
            AssumeKeyword => "assume",
            CoverKeyword => "cover",
            UniqueKeyword => "unique",
            Unique0Keyword => "unique0",
            PriorityKeyword => "priority",
            MatchesKeyword => "matches",
            InsideKeyword => "inside",
            NewKeyword => "new",
            ThisKeyword => "this",
            SuperKeyword => "super",
            NullKeyword => "null",
            EnumKeyword => "enum",
            StructKeyword => "struct",
            UnionKeyword => "union",
            PackedKeyword => "packed",
            SignedKeyword => "signed",
            UnsignedKeyword => "unsigned",
            ConstKeyword => "const",
            VarKeyword => "var",
            StaticKeyword => "static",
            AutomaticKeyword => "automatic",
            LocalKeyword => "local",
            ProtectedKeyword => "protected",
            RandKeyword => "rand",
            RandCKeyword => "randc",
            PureKeyword => "pure",
            InputKeyword => "input",
            OutputKeyword => "output",
            InOutKeyword => "inout",
            RefKeyword => "ref",
            VoidKeyword => "void",
            WireKeyword => "wire",
            WAndKeyword => "wand",
            WOrKeyword => "wor",
            TriKeyword => "tri",
            TriAndKeyword => "triand",
            TriOrKeyword => "trior",
            Tri0Keyword => "tri0",
            Tri1Keyword => "tri1",
            TriRegKeyword => "trireg",
            UWireKeyword => "uwire",
            Supply0Keyword => "supply0",
            Supply1Keyword => "supply1",
            BitKeyword => "bit",
            LogicKeyword => "logic",
            RegKeyword => "reg",
            ByteKeyword => "byte",
            ShortIntKeyword => "shortint",
            IntKeyword => "int",
            LongIntKeyword => "longint",
            IntegerKeyword => "integer",
            TimeKeyword => "time",
            RealKeyword => "real",
            ShortRealKeyword => "shortreal",
            RealTimeKeyword => "realtime",
            StringKeyword => "string",
            CHandleKeyword => "chandle",
            EventKeyword => "event",
            PosEdgeKeyword => "posedge",
            NegEdgeKeyword => "negedge",
            EdgeKeyword => "edge",
            OrKeyword => "or",
            IffKeyword => "iff",
        }
    }
}

/// Keyword lookup table, built once and never mutated.
pub static KEYWORDS: Lazy<FxHashMap<&'static str, TokenKind>> = Lazy::new(|| {
    use TokenKind::*;
    let mut map = FxHashMap::default();
    for kind in [
        ModuleKeyword,
        MacromoduleKeyword,
        EndModuleKeyword,
        InterfaceKeyword,
        EndInterfaceKeyword,
        ProgramKeyword,
        EndProgramKeyword,
        PackageKeyword,
        EndPackageKeyword,
        ClassKeyword,
        EndClassKeyword,
        VirtualKeyword,
        ExtendsKeyword,
        ImplementsKeyword,
        FunctionKeyword,
        EndFunctionKeyword,
        TaskKeyword,
        EndTaskKeyword,
        BeginKeyword,
        EndKeyword,
        ForkKeyword,
        JoinKeyword,
        JoinAnyKeyword,
        JoinNoneKeyword,
        GenerateKeyword,
        EndGenerateKeyword,
        GenvarKeyword,
        TypedefKeyword,
        ImportKeyword,
        ParameterKeyword,
        LocalParamKeyword,
        ConstraintKeyword,
        TimeUnitKeyword,
        TimePrecisionKeyword,
        IfKeyword,
        ElseKeyword,
        CaseKeyword,
        CaseXKeyword,
        CaseZKeyword,
        EndCaseKeyword,
        RandCaseKeyword,
        DefaultKeyword,
        ForKeyword,
        ForeachKeyword,
        ForeverKeyword,
        RepeatKeyword,
        WhileKeyword,
        DoKeyword,
        ReturnKeyword,
        BreakKeyword,
        ContinueKeyword,
        DisableKeyword,
        AssignKeyword,
        DeassignKeyword,
        ForceKeyword,
        ReleaseKeyword,
        InitialKeyword,
        FinalKeyword,
        AlwaysKeyword,
        AlwaysCombKeyword,
        AlwaysFfKeyword,
        AlwaysLatchKeyword,
        WaitKeyword,
        WaitOrderKeyword,
        AssertKeyword,
        AssumeKeyword,
        CoverKeyword,
        UniqueKeyword,
        Unique0Keyword,
        PriorityKeyword,
        MatchesKeyword,
        InsideKeyword,
        NewKeyword,
        ThisKeyword,
        SuperKeyword,
        NullKeyword,
        EnumKeyword,
        StructKeyword,
        UnionKeyword,
        PackedKeyword,
        SignedKeyword,
        UnsignedKeyword,
        ConstKeyword,
        VarKeyword,
        StaticKeyword,
        AutomaticKeyword,
        LocalKeyword,
        ProtectedKeyword,
        RandKeyword,
        RandCKeyword,
        PureKeyword,
        InputKeyword,
        OutputKeyword,
        InOutKeyword,
        RefKeyword,
        VoidKeyword,
        WireKeyword,
        WAndKeyword,
        WOrKeyword,
        TriKeyword,
        TriAndKeyword,
        TriOrKeyword,
        Tri0Keyword,
        Tri1Keyword,
        TriRegKeyword,
        UWireKeyword,
        Supply0Keyword,
        Supply1Keyword,
        BitKeyword,
        LogicKeyword,
        RegKeyword,
        ByteKeyword,
        ShortIntKeyword,
        IntKeyword,
        LongIntKeyword,
        IntegerKeyword,
        TimeKeyword,
        RealKeyword,
        ShortRealKeyword,
        RealTimeKeyword,
        StringKeyword,
        CHandleKeyword,
        EventKeyword,
        PosEdgeKeyword,
        NegEdgeKeyword,
        EdgeKeyword,
        OrKeyword,
        IffKeyword,
    ] {
        map.insert(kind.display_text(), kind);
    }
    map
});
