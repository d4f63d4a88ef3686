//! Precedence-climbing expression parser.
//!
//! Binary operators carry a numeric precedence; higher binds tighter.
//! `parse_sub_expression` only consumes operators whose precedence is at
//! least `min_precedence`, which lets callers cut the grammar off early
//! (constraint items stop below `->` so implication stays visible to the
//! constraint parser).

use bitflags::bitflags;
use svz_common::diagnostics::diagnostic_codes;
use svz_scanner::TokenKind;

use crate::node::{
    ArgumentData, ArgumentListData, AssignmentPatternData, AssignmentPatternItemData,
    BracedListData, CastData, ConditionalExprData, ConditionalPatternData,
    ConditionalPredicateData, ElementSelectData, BitSelectData, EmptyQueueData, InsideExprData,
    InvocationData, MinTypMaxData, MultipleConcatData, NewExprData, NodeData, NodeIndex,
    ParenthesizedData, PatternData, RangeSelectData, ReplicatedPatternItemData, ScopedNameData,
    SeparatedList,
    StreamingConcatData, SyntaxKind, TokenData, UnaryExprData, ValueRangeData,
};

use super::Parser;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(crate) struct ExpressionOptions: u32 {
        /// Allow `matches` clauses in conditional predicates.
        const ALLOW_PATTERN_MATCH = 1 << 0;
        /// At the top level of a procedural statement `<=` is a
        /// nonblocking assignment, not a relational operator. Cleared for
        /// every subexpression.
        const PROCEDURAL_ASSIGNMENT = 1 << 1;
    }
}

/// Precedence of `?:`; also the ceiling for constraint-item expressions.
pub(crate) const CONDITIONAL_PRECEDENCE: u8 = 3;
const INSIDE_PRECEDENCE: u8 = 10;
const UNARY_PRECEDENCE: u8 = 15;

fn unary_kind(kind: TokenKind) -> Option<SyntaxKind> {
    use TokenKind::*;
    Some(match kind {
        Plus => SyntaxKind::UnaryPlusExpression,
        Minus => SyntaxKind::UnaryMinusExpression,
        Exclamation => SyntaxKind::UnaryLogicalNotExpression,
        Tilde => SyntaxKind::UnaryBitwiseNotExpression,
        And => SyntaxKind::UnaryBitwiseAndExpression,
        TildeAnd => SyntaxKind::UnaryBitwiseNandExpression,
        Or => SyntaxKind::UnaryBitwiseOrExpression,
        TildeOr => SyntaxKind::UnaryBitwiseNorExpression,
        Xor => SyntaxKind::UnaryBitwiseXorExpression,
        XorTilde | TildeXor => SyntaxKind::UnaryBitwiseXnorExpression,
        DoublePlus => SyntaxKind::UnaryPreincrementExpression,
        DoubleMinus => SyntaxKind::UnaryPredecrementExpression,
        _ => return None,
    })
}

/// Kind, precedence, and right-associativity for a binary operator token.
fn binary_op_info(
    kind: TokenKind,
    options: ExpressionOptions,
) -> Option<(SyntaxKind, u8, bool)> {
    use TokenKind::*;
    Some(match kind {
        Equals => (SyntaxKind::AssignmentExpression, 1, true),
        PlusEqual => (SyntaxKind::AddAssignmentExpression, 1, true),
        MinusEqual => (SyntaxKind::SubtractAssignmentExpression, 1, true),
        StarEqual => (SyntaxKind::MultiplyAssignmentExpression, 1, true),
        SlashEqual => (SyntaxKind::DivideAssignmentExpression, 1, true),
        PercentEqual => (SyntaxKind::ModAssignmentExpression, 1, true),
        AndEqual => (SyntaxKind::AndAssignmentExpression, 1, true),
        OrEqual => (SyntaxKind::OrAssignmentExpression, 1, true),
        XorEqual => (SyntaxKind::XorAssignmentExpression, 1, true),
        LeftShiftEqual => (SyntaxKind::LogicalLeftShiftAssignmentExpression, 1, true),
        RightShiftEqual => (SyntaxKind::LogicalRightShiftAssignmentExpression, 1, true),
        TripleLeftShiftEqual => (SyntaxKind::ArithmeticLeftShiftAssignmentExpression, 1, true),
        TripleRightShiftEqual => {
            (SyntaxKind::ArithmeticRightShiftAssignmentExpression, 1, true)
        }
        MinusArrow => (SyntaxKind::LogicalImplicationExpression, 2, true),
        LessThanMinusArrow => (SyntaxKind::LogicalEquivalenceExpression, 2, true),
        DoubleOr => (SyntaxKind::LogicalOrExpression, 4, false),
        DoubleAnd => (SyntaxKind::LogicalAndExpression, 5, false),
        Or => (SyntaxKind::BinaryOrExpression, 6, false),
        Xor => (SyntaxKind::BinaryXorExpression, 7, false),
        XorTilde | TildeXor => (SyntaxKind::BinaryXnorExpression, 7, false),
        And => (SyntaxKind::BinaryAndExpression, 8, false),
        DoubleEquals => (SyntaxKind::EqualityExpression, 9, false),
        ExclamationEquals => (SyntaxKind::InequalityExpression, 9, false),
        TripleEquals => (SyntaxKind::CaseEqualityExpression, 9, false),
        ExclamationDoubleEquals => (SyntaxKind::CaseInequalityExpression, 9, false),
        DoubleEqualsQuestion => (SyntaxKind::WildcardEqualityExpression, 9, false),
        ExclamationEqualsQuestion => (SyntaxKind::WildcardInequalityExpression, 9, false),
        LessThan => (SyntaxKind::LessThanExpression, 10, false),
        GreaterThan => (SyntaxKind::GreaterThanExpression, 10, false),
        GreaterThanEquals => (SyntaxKind::GreaterThanEqualExpression, 10, false),
        LessThanEquals => {
            if options.contains(ExpressionOptions::PROCEDURAL_ASSIGNMENT) {
                (SyntaxKind::NonblockingAssignmentExpression, 1, true)
            } else {
                (SyntaxKind::LessThanEqualExpression, 10, false)
            }
        }
        LeftShift => (SyntaxKind::ShiftLeftExpression, 11, false),
        RightShift => (SyntaxKind::ShiftRightExpression, 11, false),
        TripleLeftShift => (SyntaxKind::ArithmeticShiftLeftExpression, 11, false),
        TripleRightShift => (SyntaxKind::ArithmeticShiftRightExpression, 11, false),
        Plus => (SyntaxKind::AddExpression, 12, false),
        Minus => (SyntaxKind::SubtractExpression, 12, false),
        Star => (SyntaxKind::MultiplyExpression, 13, false),
        Slash => (SyntaxKind::DivideExpression, 13, false),
        Percent => (SyntaxKind::ModExpression, 13, false),
        DoubleStar => (SyntaxKind::PowerExpression, 14, true),
        _ => return None,
    })
}

/// Whether a token can begin an expression; used by statement and list
/// recovery to decide between "parse it" and "skip it".
pub(crate) fn is_possible_expression(kind: TokenKind) -> bool {
    use TokenKind::*;
    matches!(
        kind,
        Identifier
            | SystemIdentifier
            | IntegerLiteral
            | UnbasedUnsizedLiteral
            | RealLiteral
            | TimeLiteral
            | StringLiteral
            | NullKeyword
            | ThisKeyword
            | SuperKeyword
            | NewKeyword
            | Dollar
            | OpenParen
            | OpenBrace
            | ApostropheOpenBrace
            | Plus
            | Minus
            | Exclamation
            | Tilde
            | And
            | TildeAnd
            | Or
            | TildeOr
            | Xor
            | XorTilde
            | TildeXor
            | DoublePlus
            | DoubleMinus
            | BitKeyword
            | LogicKeyword
            | RegKeyword
            | ByteKeyword
            | ShortIntKeyword
            | IntKeyword
            | LongIntKeyword
            | IntegerKeyword
            | TimeKeyword
            | RealKeyword
            | ShortRealKeyword
            | RealTimeKeyword
            | StringKeyword
            | SignedKeyword
            | UnsignedKeyword
            | VoidKeyword
    )
}

impl Parser<'_> {
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        self.parse_sub_expression(ExpressionOptions::empty(), 0)
    }

    pub(crate) fn parse_sub_expression(
        &mut self,
        options: ExpressionOptions,
        min_precedence: u8,
    ) -> NodeIndex {
        if !self.enter_nested() {
            self.exit_nested();
            return self.bad_expression();
        }
        let result = self.parse_sub_expression_inner(options, min_precedence);
        self.exit_nested();
        result
    }

    fn parse_sub_expression_inner(
        &mut self,
        options: ExpressionOptions,
        min_precedence: u8,
    ) -> NodeIndex {
        let inner_options = options & !ExpressionOptions::PROCEDURAL_ASSIGNMENT;
        let pos = self.node_pos();

        let mut left = if let Some(kind) = unary_kind(self.tokens.current_kind()) {
            let operator_token = self.tokens.consume();
            let operand = self.parse_sub_expression(inner_options, UNARY_PRECEDENCE);
            self.finish(kind, pos, NodeData::Unary(UnaryExprData { operator_token, operand }))
        } else {
            let primary = self.parse_primary_expression(inner_options);
            self.parse_postfix_expression(primary, pos)
        };

        loop {
            let op = self.tokens.current_kind();

            if (op == TokenKind::Question
                || (options.contains(ExpressionOptions::ALLOW_PATTERN_MATCH)
                    && matches!(op, TokenKind::MatchesKeyword | TokenKind::TripleAnd)))
                && min_precedence <= CONDITIONAL_PRECEDENCE
            {
                left = self.parse_conditional_tail(left, inner_options, options, pos);
                continue;
            }

            if op == TokenKind::InsideKeyword && min_precedence <= INSIDE_PRECEDENCE {
                let inside_keyword = self.tokens.consume();
                let ranges = self.parse_open_range_list();
                left = self.finish(
                    SyntaxKind::InsideExpression,
                    pos,
                    NodeData::Inside(InsideExprData {
                        expression: left,
                        inside_keyword,
                        ranges,
                    }),
                );
                continue;
            }

            let Some((kind, precedence, right_assoc)) = binary_op_info(op, options) else {
                break;
            };
            if precedence < min_precedence {
                break;
            }

            let operator_token = self.tokens.consume();
            let next_min = if right_assoc { precedence } else { precedence + 1 };
            let right = self.parse_sub_expression(inner_options, next_min);
            left = self.finish(
                kind,
                pos,
                NodeData::Binary(crate::node::BinaryExprData { left, operator_token, right }),
            );
        }

        left
    }

    /// `[matches pattern] [&&& cond]* [? expr : expr]` after a parsed
    /// condition expression. The predicate gets its own node even for the
    /// plain one-condition form; without a following `?` the predicate
    /// itself is the result, which is what `if` conditions consume.
    fn parse_conditional_tail(
        &mut self,
        first: NodeIndex,
        inner_options: ExpressionOptions,
        options: ExpressionOptions,
        pos: u32,
    ) -> NodeIndex {
        let allow_matches = options.contains(ExpressionOptions::ALLOW_PATTERN_MATCH);
        let mut conditions = SeparatedList::new();
        let first_cond = self.finish_conditional_pattern(first, allow_matches);
        conditions.items.push(first_cond);
        while let Some(sep) = self.consume_if(TokenKind::TripleAnd) {
            conditions.separators.push(sep);
            let cpos = self.node_pos();
            let expression = self.parse_sub_expression(inner_options, CONDITIONAL_PRECEDENCE + 1);
            let cond = self.finish_conditional_pattern_at(expression, cpos, allow_matches);
            conditions.items.push(cond);
        }
        let predicate = self.finish(
            SyntaxKind::ConditionalPredicate,
            pos,
            NodeData::CondPredicate(ConditionalPredicateData { conditions }),
        );

        if self.tokens.current_kind() != TokenKind::Question {
            return predicate;
        }
        let question = self.tokens.consume();
        let when_true = self.parse_sub_expression(inner_options, 0);
        let colon = self.expect(TokenKind::Colon);
        let when_false = self.parse_sub_expression(inner_options, CONDITIONAL_PRECEDENCE);
        self.finish(
            SyntaxKind::ConditionalExpression,
            pos,
            NodeData::Conditional(ConditionalExprData {
                predicate,
                question,
                when_true,
                colon,
                when_false,
            }),
        )
    }

    fn finish_conditional_pattern(&mut self, expression: NodeIndex, allow_matches: bool) -> NodeIndex {
        let pos = self.arena.get(expression).pos;
        self.finish_conditional_pattern_at(expression, pos, allow_matches)
    }

    fn finish_conditional_pattern_at(
        &mut self,
        expression: NodeIndex,
        pos: u32,
        allow_matches: bool,
    ) -> NodeIndex {
        let (matches_keyword, pattern) = if allow_matches {
            match self.consume_if(TokenKind::MatchesKeyword) {
                Some(kw) => {
                    let pattern = self.parse_pattern();
                    (Some(kw), Some(pattern))
                }
                None => (None, None),
            }
        } else {
            (None, None)
        };
        self.finish(
            SyntaxKind::ConditionalPattern,
            pos,
            NodeData::CondPattern(ConditionalPatternData { expression, matches_keyword, pattern }),
        )
    }

    pub(crate) fn parse_pattern(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        match self.tokens.current_kind() {
            TokenKind::DotStar => {
                let dot = self.tokens.consume();
                self.finish(
                    SyntaxKind::WildcardPattern,
                    pos,
                    NodeData::Pattern(PatternData {
                        dot: Some(dot),
                        name: None,
                        open_paren: None,
                        inner: None,
                        close_paren: None,
                    }),
                )
            }
            TokenKind::Dot => {
                let dot = self.tokens.consume();
                let name = self.expect_identifier();
                self.finish(
                    SyntaxKind::VariablePattern,
                    pos,
                    NodeData::Pattern(PatternData {
                        dot: Some(dot),
                        name: Some(name),
                        open_paren: None,
                        inner: None,
                        close_paren: None,
                    }),
                )
            }
            TokenKind::OpenParen => {
                let open_paren = self.tokens.consume();
                let inner = self.parse_pattern();
                let close_paren = self.expect(TokenKind::CloseParen);
                self.finish(
                    SyntaxKind::ParenthesizedPattern,
                    pos,
                    NodeData::Pattern(PatternData {
                        dot: None,
                        name: None,
                        open_paren: Some(open_paren),
                        inner: Some(inner),
                        close_paren: Some(close_paren),
                    }),
                )
            }
            kind if is_possible_expression(kind) => {
                let inner = self.parse_sub_expression(
                    ExpressionOptions::empty(),
                    CONDITIONAL_PRECEDENCE + 1,
                );
                self.finish(
                    SyntaxKind::ExpressionPattern,
                    pos,
                    NodeData::Pattern(PatternData {
                        dot: None,
                        name: None,
                        open_paren: None,
                        inner: Some(inner),
                        close_paren: None,
                    }),
                )
            }
            _ => {
                self.error_at_current(diagnostic_codes::EXPECTED_PATTERN, &[]);
                let bad = self.bad_expression();
                self.finish(
                    SyntaxKind::ExpressionPattern,
                    pos,
                    NodeData::Pattern(PatternData {
                        dot: None,
                        name: None,
                        open_paren: None,
                        inner: Some(bad),
                        close_paren: None,
                    }),
                )
            }
        }
    }

    // ------------------------------------------------------------------
    // Primary and postfix expressions
    // ------------------------------------------------------------------

    fn parse_primary_expression(&mut self, options: ExpressionOptions) -> NodeIndex {
        use TokenKind::*;
        let pos = self.node_pos();
        match self.tokens.current_kind() {
            IntegerLiteral => self.token_expression(SyntaxKind::IntegerLiteralExpression),
            UnbasedUnsizedLiteral => {
                self.token_expression(SyntaxKind::UnbasedUnsizedLiteralExpression)
            }
            RealLiteral => self.token_expression(SyntaxKind::RealLiteralExpression),
            TimeLiteral => self.token_expression(SyntaxKind::TimeLiteralExpression),
            StringLiteral => self.token_expression(SyntaxKind::StringLiteralExpression),
            NullKeyword => self.token_expression(SyntaxKind::NullLiteralExpression),
            Dollar => self.token_expression(SyntaxKind::WildcardLiteralExpression),
            Identifier | SystemIdentifier | ThisKeyword | SuperKeyword => self.parse_name(),
            OpenParen => {
                let open_paren = self.tokens.consume();
                let mut inner = self.parse_sub_expression(options, 0);
                if self.tokens.current_kind() == Colon {
                    inner = self.parse_min_typ_max_tail(inner);
                }
                let close_paren = self.expect(CloseParen);
                self.finish(
                    SyntaxKind::ParenthesizedExpression,
                    pos,
                    NodeData::Parenthesized(ParenthesizedData {
                        open_paren,
                        expression: inner,
                        close_paren,
                    }),
                )
            }
            OpenBrace => self.parse_concatenation(options),
            ApostropheOpenBrace => self.parse_assignment_pattern(None, pos),
            NewKeyword => self.parse_new_expression(),
            BitKeyword | LogicKeyword | RegKeyword | ByteKeyword | ShortIntKeyword | IntKeyword
            | LongIntKeyword | IntegerKeyword | TimeKeyword | RealKeyword | ShortRealKeyword
            | RealTimeKeyword | StringKeyword | VoidKeyword => self.parse_data_type(false),
            SignedKeyword | UnsignedKeyword => self.token_expression(SyntaxKind::KeywordType),
            _ => {
                self.error_at_current(diagnostic_codes::EXPECTED_EXPRESSION, &[]);
                self.bad_expression()
            }
        }
    }

    fn token_expression(&mut self, kind: SyntaxKind) -> NodeIndex {
        let pos = self.node_pos();
        let token = self.tokens.consume();
        if kind == SyntaxKind::KeywordType {
            self.finish(kind, pos, NodeData::KeywordType(TokenData { token }))
        } else {
            self.finish(kind, pos, NodeData::Token(TokenData { token }))
        }
    }

    /// `min : typ : max` after the first expression inside parentheses.
    fn parse_min_typ_max_tail(&mut self, min: NodeIndex) -> NodeIndex {
        let pos = self.arena.get(min).pos;
        let colon1 = self.expect(TokenKind::Colon);
        let typ = self.parse_sub_expression(ExpressionOptions::empty(), 0);
        let colon2 = self.expect(TokenKind::Colon);
        let max = self.parse_sub_expression(ExpressionOptions::empty(), 0);
        self.finish(
            SyntaxKind::MinTypMaxExpression,
            pos,
            NodeData::MinTypMax(MinTypMaxData { min, colon1, typ, colon2, max }),
        )
    }

    /// A name with optional `::` scoping. Member access and selects are
    /// postfix forms, handled separately.
    pub(crate) fn parse_name(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let mut left = self.parse_name_segment();
        while self.tokens.current_kind() == TokenKind::DoubleColon {
            let separator = self.tokens.consume();
            let right = self.parse_name_segment();
            left = self.finish(
                SyntaxKind::ScopedName,
                pos,
                NodeData::ScopedName(ScopedNameData { left, separator, right }),
            );
        }
        left
    }

    fn parse_name_segment(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let (kind, token) = match self.tokens.current_kind() {
            TokenKind::Identifier => (SyntaxKind::IdentifierName, self.tokens.consume()),
            TokenKind::SystemIdentifier => (SyntaxKind::SystemName, self.tokens.consume()),
            TokenKind::ThisKeyword => (SyntaxKind::ThisHandle, self.tokens.consume()),
            TokenKind::SuperKeyword => (SyntaxKind::SuperHandle, self.tokens.consume()),
            TokenKind::NewKeyword => (SyntaxKind::IdentifierName, self.tokens.consume()),
            _ => {
                self.error_at_current(diagnostic_codes::EXPECTED_IDENTIFIER, &[]);
                let token =
                    svz_scanner::Token::missing(TokenKind::Identifier, self.tokens.prev_token_end());
                (SyntaxKind::IdentifierName, token)
            }
        };
        self.finish(kind, pos, NodeData::Token(TokenData { token }))
    }

    fn parse_postfix_expression(&mut self, mut left: NodeIndex, pos: u32) -> NodeIndex {
        loop {
            match self.tokens.current_kind() {
                TokenKind::OpenBracket => {
                    left = self.parse_element_select(left, pos);
                }
                TokenKind::Dot => {
                    let separator = self.tokens.consume();
                    let right = self.parse_name_segment();
                    left = self.finish(
                        SyntaxKind::MemberAccessExpression,
                        pos,
                        NodeData::ScopedName(ScopedNameData { left, separator, right }),
                    );
                }
                TokenKind::DoubleColon => {
                    let separator = self.tokens.consume();
                    let right = self.parse_name_segment();
                    left = self.finish(
                        SyntaxKind::ScopedName,
                        pos,
                        NodeData::ScopedName(ScopedNameData { left, separator, right }),
                    );
                }
                TokenKind::OpenParen => {
                    let arguments = self.parse_argument_list();
                    left = self.finish(
                        SyntaxKind::InvocationExpression,
                        pos,
                        NodeData::Invocation(InvocationData { left, arguments }),
                    );
                }
                TokenKind::DoublePlus => {
                    let operator_token = self.tokens.consume();
                    left = self.finish(
                        SyntaxKind::PostincrementExpression,
                        pos,
                        NodeData::Unary(UnaryExprData { operator_token, operand: left }),
                    );
                }
                TokenKind::DoubleMinus => {
                    let operator_token = self.tokens.consume();
                    left = self.finish(
                        SyntaxKind::PostdecrementExpression,
                        pos,
                        NodeData::Unary(UnaryExprData { operator_token, operand: left }),
                    );
                }
                TokenKind::Apostrophe if self.tokens.peek_kind(1) == TokenKind::OpenParen => {
                    let apostrophe = self.tokens.consume();
                    let open_paren = self.tokens.consume();
                    let inner = self.parse_sub_expression(ExpressionOptions::empty(), 0);
                    let close_paren = self.expect(TokenKind::CloseParen);
                    left = self.finish(
                        SyntaxKind::CastExpression,
                        pos,
                        NodeData::Cast(CastData { left, apostrophe, open_paren, inner, close_paren }),
                    );
                }
                TokenKind::ApostropheOpenBrace => {
                    left = self.parse_assignment_pattern(Some(left), pos);
                }
                _ => break,
            }
        }
        left
    }

    fn parse_element_select(&mut self, value: NodeIndex, pos: u32) -> NodeIndex {
        let open_bracket = self.expect(TokenKind::OpenBracket);
        let selector = if self.tokens.current_kind() == TokenKind::CloseBracket {
            None
        } else {
            Some(self.parse_selector())
        };
        let close_bracket = self.expect(TokenKind::CloseBracket);
        self.finish(
            SyntaxKind::ElementSelectExpression,
            pos,
            NodeData::ElementSelect(ElementSelectData {
                value,
                open_bracket,
                selector,
                close_bracket,
            }),
        )
    }

    fn parse_selector(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let left = self.parse_expression();
        let kind = match self.tokens.current_kind() {
            TokenKind::Colon => SyntaxKind::SimpleRangeSelect,
            TokenKind::PlusColon => SyntaxKind::AscendingRangeSelect,
            TokenKind::MinusColon => SyntaxKind::DescendingRangeSelect,
            _ => {
                return self.finish(
                    SyntaxKind::BitSelect,
                    pos,
                    NodeData::BitSelect(BitSelectData { expression: left }),
                );
            }
        };
        let range_token = self.tokens.consume();
        let right = self.parse_expression();
        self.finish(kind, pos, NodeData::RangeSelect(RangeSelectData { left, range_token, right }))
    }

    pub(crate) fn parse_argument_list(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let open_paren = self.expect(TokenKind::OpenParen);
        let arguments = if self.tokens.current_kind() == TokenKind::CloseParen {
            SeparatedList::new()
        } else {
            self.parse_comma_list(|p| p.parse_argument())
        };
        let close_paren = self.expect(TokenKind::CloseParen);
        self.finish(
            SyntaxKind::ArgumentList,
            pos,
            NodeData::ArgumentList(ArgumentListData { open_paren, arguments, close_paren }),
        )
    }

    fn parse_argument(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        if self.tokens.current_kind() == TokenKind::Dot {
            let dot = self.tokens.consume();
            let name = self.expect_identifier();
            let open_paren = self.expect(TokenKind::OpenParen);
            let expression = if self.tokens.current_kind() == TokenKind::CloseParen {
                None
            } else {
                Some(self.parse_expression())
            };
            let close_paren = self.expect(TokenKind::CloseParen);
            return self.finish(
                SyntaxKind::NamedArgument,
                pos,
                NodeData::Argument(ArgumentData {
                    dot: Some(dot),
                    name: Some(name),
                    open_paren: Some(open_paren),
                    expression,
                    close_paren: Some(close_paren),
                }),
            );
        }
        let expression = if matches!(
            self.tokens.current_kind(),
            TokenKind::Comma | TokenKind::CloseParen
        ) {
            // empty positional slot
            None
        } else {
            Some(self.parse_expression())
        };
        self.finish(
            SyntaxKind::OrderedArgument,
            pos,
            NodeData::Argument(ArgumentData {
                dot: None,
                name: None,
                open_paren: None,
                expression,
                close_paren: None,
            }),
        )
    }

    // ------------------------------------------------------------------
    // Braced forms
    // ------------------------------------------------------------------

    /// `{}`, `{a, b}`, `{n{...}}`, and `{<< size {a, b}}`.
    fn parse_concatenation(&mut self, options: ExpressionOptions) -> NodeIndex {
        use TokenKind::*;
        let pos = self.node_pos();
        let open_brace = self.expect(OpenBrace);
        match self.tokens.current_kind() {
            CloseBrace => {
                let close_brace = self.tokens.consume();
                self.finish(
                    SyntaxKind::EmptyQueueExpression,
                    pos,
                    NodeData::EmptyQueue(EmptyQueueData { open_brace, close_brace }),
                )
            }
            LeftShift | RightShift | TripleLeftShift | TripleRightShift => {
                let operator_token = self.tokens.consume();
                let slice_size = if self.tokens.current_kind() == OpenBrace {
                    None
                } else {
                    Some(self.parse_sub_expression(ExpressionOptions::empty(), 0))
                };
                let inner_open = self.expect(OpenBrace);
                let expressions = self.parse_comma_list(|p| p.parse_expression());
                let inner_close = self.expect(CloseBrace);
                let close_brace = self.expect(CloseBrace);
                self.finish(
                    SyntaxKind::StreamingConcatenationExpression,
                    pos,
                    NodeData::Streaming(StreamingConcatData {
                        open_brace,
                        operator_token,
                        slice_size,
                        inner_open,
                        expressions,
                        inner_close,
                        close_brace,
                    }),
                )
            }
            _ => {
                let first = self.parse_sub_expression(options, 0);
                if self.tokens.current_kind() == OpenBrace {
                    let concatenation = self.parse_concatenation(options);
                    let close_brace = self.expect(CloseBrace);
                    self.finish(
                        SyntaxKind::MultipleConcatenationExpression,
                        pos,
                        NodeData::MultipleConcat(MultipleConcatData {
                            open_brace,
                            count: first,
                            concatenation,
                            close_brace,
                        }),
                    )
                } else {
                    let mut elements = SeparatedList::new();
                    elements.items.push(first);
                    while let Some(comma) = self.consume_if(Comma) {
                        elements.separators.push(comma);
                        elements.items.push(self.parse_expression());
                    }
                    let close_brace = self.expect(CloseBrace);
                    self.finish(
                        SyntaxKind::ConcatenationExpression,
                        pos,
                        NodeData::BracedList(BracedListData { open_brace, elements, close_brace }),
                    )
                }
            }
        }
    }

    /// `'{ item, ... }`, optionally preceded by a type.
    fn parse_assignment_pattern(&mut self, type_node: Option<NodeIndex>, pos: u32) -> NodeIndex {
        let open = self.expect(TokenKind::ApostropheOpenBrace);
        let items = if self.tokens.current_kind() == TokenKind::CloseBrace {
            SeparatedList::new()
        } else {
            self.parse_comma_list(|p| p.parse_assignment_pattern_item())
        };
        let close_brace = self.expect(TokenKind::CloseBrace);
        self.finish(
            SyntaxKind::AssignmentPatternExpression,
            pos,
            NodeData::AssignmentPattern(AssignmentPatternData { type_node, open, items, close_brace }),
        )
    }

    fn parse_assignment_pattern_item(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let key = if self.tokens.current_kind() == TokenKind::DefaultKeyword
            && self.tokens.peek_kind(1) == TokenKind::Colon
        {
            self.token_expression(SyntaxKind::DefaultPatternKey)
        } else {
            self.parse_expression()
        };
        match self.consume_if(TokenKind::Colon) {
            Some(colon) => {
                let value = self.parse_expression();
                self.finish(
                    SyntaxKind::AssignmentPatternItem,
                    pos,
                    NodeData::AssignmentPatternItem(AssignmentPatternItemData { key, colon, value }),
                )
            }
            // `count { expr, ... }` replicates the braced elements
            None if self.tokens.current_kind() == TokenKind::OpenBrace => {
                let concatenation = self.parse_concatenation(ExpressionOptions::empty());
                self.finish(
                    SyntaxKind::ReplicatedPatternItem,
                    pos,
                    NodeData::ReplicatedPatternItem(ReplicatedPatternItemData {
                        count: key,
                        concatenation,
                    }),
                )
            }
            None => key,
        }
    }

    /// `new`, `new [size]`, `new (args)`.
    fn parse_new_expression(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let new_keyword = self.expect(TokenKind::NewKeyword);
        if self.tokens.current_kind() == TokenKind::OpenBracket {
            let open_bracket = self.tokens.consume();
            let size = self.parse_expression();
            let close_bracket = self.expect(TokenKind::CloseBracket);
            return self.finish(
                SyntaxKind::NewArrayExpression,
                pos,
                NodeData::New(NewExprData {
                    new_keyword,
                    open_bracket: Some(open_bracket),
                    size: Some(size),
                    close_bracket: Some(close_bracket),
                    arguments: None,
                }),
            );
        }
        let arguments = if self.tokens.current_kind() == TokenKind::OpenParen {
            Some(self.parse_argument_list())
        } else {
            None
        };
        self.finish(
            SyntaxKind::NewClassExpression,
            pos,
            NodeData::New(NewExprData {
                new_keyword,
                open_bracket: None,
                size: None,
                close_bracket: None,
                arguments,
            }),
        )
    }

    /// `{ value_range, ... }` for `inside` and uniqueness constraints.
    pub(crate) fn parse_open_range_list(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let open_brace = self.expect(TokenKind::OpenBrace);
        let elements = if self.tokens.current_kind() == TokenKind::CloseBrace {
            SeparatedList::new()
        } else {
            self.parse_comma_list(|p| p.parse_value_range())
        };
        let close_brace = self.expect(TokenKind::CloseBrace);
        self.finish(
            SyntaxKind::OpenRangeList,
            pos,
            NodeData::BracedList(BracedListData { open_brace, elements, close_brace }),
        )
    }

    fn parse_value_range(&mut self) -> NodeIndex {
        if self.tokens.current_kind() != TokenKind::OpenBracket {
            return self.parse_expression();
        }
        let pos = self.node_pos();
        let open_bracket = self.tokens.consume();
        let left = self.parse_expression();
        let colon = self.expect(TokenKind::Colon);
        let right = self.parse_expression();
        let close_bracket = self.expect(TokenKind::CloseBracket);
        self.finish(
            SyntaxKind::ValueRangeExpression,
            pos,
            NodeData::ValueRange(ValueRangeData { open_bracket, left, colon, right, close_bracket }),
        )
    }
}
