//! Recursive-descent parser over the replayable token stream.
//!
//! Parsing is total: every routine returns a node, errors go to the
//! diagnostics list, and recovery either synthesizes a zero-width missing
//! token or consumes at least one real token so list loops always make
//! progress. Grammar decisions that need unbounded lookahead go through
//! the side-effect-free classifiers in `lookahead`.

mod expressions;
mod lookahead;
mod members;
mod statements;
mod types;

pub(crate) use expressions::ExpressionOptions;

use svz_common::diagnostics::{
    Diagnostic, diagnostic_codes, format_message, get_message_template,
};
use svz_common::limits::MAX_PARSER_RECURSION_DEPTH;
use svz_scanner::{Token, TokenKind};

use crate::node::{
    AttributeInstanceData, AttributeSpecData, BadData, DeclaratorData, DimensionData,
    EqualsValueData, NamedBlockClauseData, NodeData, NodeIndex, SeparatedList, SyntaxKind,
};
use crate::node_arena::NodeArena;
use crate::token_stream::TokenStream;

pub(crate) struct Parser<'a> {
    pub(crate) tokens: TokenStream,
    file_name: &'a str,
    pub(crate) arena: NodeArena,
    pub(crate) diagnostics: Vec<Diagnostic>,
    recursion_depth: u32,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(file_name: &'a str, tokens: Vec<Token>) -> Parser<'a> {
        let estimate = tokens.len();
        Parser {
            tokens: TokenStream::new(tokens),
            file_name,
            arena: NodeArena::with_estimate(estimate),
            diagnostics: Vec::new(),
            recursion_depth: 0,
        }
    }

    pub(crate) fn into_parts(self) -> (NodeArena, Vec<Diagnostic>) {
        (self.arena, self.diagnostics)
    }

    // ------------------------------------------------------------------
    // Core helpers
    // ------------------------------------------------------------------

    /// Start offset for a node beginning at the current token, including
    /// its leading trivia.
    pub(crate) fn node_pos(&self) -> u32 {
        self.tokens.current().full_start
    }

    /// Allocate a node ending at the last consumed token.
    pub(crate) fn finish(&mut self, kind: SyntaxKind, pos: u32, data: NodeData) -> NodeIndex {
        let end = self.tokens.prev_token_end().max(pos);
        self.arena.alloc(kind, pos, end, data)
    }

    pub(crate) fn error(&mut self, start: u32, length: u32, code: u32, args: &[&str]) {
        let template = get_message_template(code).unwrap_or("syntax error");
        self.diagnostics.push(Diagnostic::error(
            self.file_name.to_string(),
            start,
            length,
            format_message(template, args),
            code,
        ));
    }

    pub(crate) fn error_at_current(&mut self, code: u32, args: &[&str]) {
        let token = self.tokens.current();
        let length = (token.end.saturating_sub(token.pos)).max(1);
        self.error(token.pos, length, code, args);
    }

    /// Consume the current token if it has the expected kind; otherwise
    /// report a diagnostic and synthesize a zero-width missing token so
    /// the caller can keep building its node.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Token {
        if self.tokens.current_kind() == kind {
            self.tokens.consume()
        } else {
            self.error_at_current(diagnostic_codes::EXPECTED_TOKEN, &[kind.display_text()]);
            Token::missing(kind, self.tokens.prev_token_end())
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Token {
        if self.tokens.current_kind() == TokenKind::Identifier {
            self.tokens.consume()
        } else {
            self.error_at_current(diagnostic_codes::EXPECTED_IDENTIFIER, &[]);
            Token::missing(TokenKind::Identifier, self.tokens.prev_token_end())
        }
    }

    pub(crate) fn consume_if(&mut self, kind: TokenKind) -> Option<Token> {
        if self.tokens.current_kind() == kind {
            Some(self.tokens.consume())
        } else {
            None
        }
    }

    /// Track recursion depth for nested expressions and statements. The
    /// diagnostic fires once, at the crossing; callers bail out with a
    /// placeholder node while the guard is tripped.
    pub(crate) fn enter_nested(&mut self) -> bool {
        self.recursion_depth += 1;
        if self.recursion_depth == MAX_PARSER_RECURSION_DEPTH + 1 {
            self.error_at_current(diagnostic_codes::MAX_NESTING_DEPTH_EXCEEDED, &[]);
        }
        self.recursion_depth <= MAX_PARSER_RECURSION_DEPTH
    }

    pub(crate) fn exit_nested(&mut self) {
        self.recursion_depth -= 1;
    }

    /// Zero-width placeholder expression at the current position.
    pub(crate) fn bad_expression(&mut self) -> NodeIndex {
        let p = self.tokens.prev_token_end();
        self.arena
            .alloc(SyntaxKind::BadExpression, p, p, NodeData::Bad(BadData { token: None }))
    }

    /// Placeholder expression that swallows one real token, for recovery
    /// paths that must make progress.
    pub(crate) fn bad_expression_consuming(&mut self) -> NodeIndex {
        let token = self.tokens.consume();
        self.arena.alloc(
            SyntaxKind::BadExpression,
            token.full_start,
            token.end.max(token.full_start),
            NodeData::Bad(BadData { token: Some(token) }),
        )
    }

    /// Parse `item (, item)*`. The item callback does not have to consume
    /// a token on error; the loop still terminates because it only
    /// continues past a real comma.
    pub(crate) fn parse_comma_list<F>(&mut self, mut item: F) -> SeparatedList
    where
        F: FnMut(&mut Self) -> NodeIndex,
    {
        let mut list = SeparatedList::new();
        loop {
            list.items.push(item(self));
            match self.consume_if(TokenKind::Comma) {
                Some(comma) => list.separators.push(comma),
                None => break,
            }
        }
        list
    }

    // ------------------------------------------------------------------
    // Small shared productions
    // ------------------------------------------------------------------

    /// Zero or more `(* name [= expr] , ... *)` instances.
    pub(crate) fn parse_attributes(&mut self) -> Vec<NodeIndex> {
        let mut result = Vec::new();
        while self.tokens.current_kind() == TokenKind::OpenParenStar {
            let pos = self.node_pos();
            let open = self.tokens.consume();
            let specs = self.parse_comma_list(|p| p.parse_attribute_spec());
            let close = self.expect(TokenKind::StarCloseParen);
            result.push(self.finish(
                SyntaxKind::AttributeInstance,
                pos,
                NodeData::AttributeInstance(AttributeInstanceData { open, specs, close }),
            ));
        }
        result
    }

    fn parse_attribute_spec(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let name = self.expect_identifier();
        let value = self.parse_equals_value_opt();
        self.finish(
            SyntaxKind::AttributeSpec,
            pos,
            NodeData::AttributeSpec(AttributeSpecData { name, value }),
        )
    }

    /// `= expression`, if present.
    pub(crate) fn parse_equals_value_opt(&mut self) -> Option<NodeIndex> {
        let equals = self.consume_if(TokenKind::Equals)?;
        let pos = equals.full_start;
        let expression = self.parse_expression();
        Some(self.finish(
            SyntaxKind::EqualsValueClause,
            pos,
            NodeData::EqualsValue(EqualsValueData { equals, expression }),
        ))
    }

    /// `: name` after end keywords, if present.
    pub(crate) fn parse_named_block_clause_opt(&mut self) -> Option<NodeIndex> {
        let colon = self.consume_if(TokenKind::Colon)?;
        let pos = colon.full_start;
        let name = self.expect_identifier();
        Some(self.finish(
            SyntaxKind::NamedBlockClause,
            pos,
            NodeData::NamedBlockClause(NamedBlockClauseData { colon, name }),
        ))
    }

    /// `name {dimension} [= expr]`.
    pub(crate) fn parse_declarator(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let name = self.expect_identifier();
        let dimensions = self.parse_dimension_list();
        let initializer = self.parse_equals_value_opt();
        self.finish(
            SyntaxKind::Declarator,
            pos,
            NodeData::Declarator(DeclaratorData { name, dimensions, initializer }),
        )
    }

    pub(crate) fn parse_declarator_list(&mut self) -> SeparatedList {
        self.parse_comma_list(|p| p.parse_declarator())
    }

    // ------------------------------------------------------------------
    // Dimensions
    // ------------------------------------------------------------------

    pub(crate) fn parse_dimension_list(&mut self) -> Vec<NodeIndex> {
        let mut dimensions = Vec::new();
        while self.tokens.current_kind() == TokenKind::OpenBracket {
            dimensions.push(self.parse_dimension());
        }
        dimensions
    }

    /// One `[...]` dimension: `[a:b]`, `[a]`, `[]`, `[*]`, `[$]`, `[$:n]`.
    pub(crate) fn parse_dimension(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let open_bracket = self.expect(TokenKind::OpenBracket);
        let (kind, left, marker, colon, right) = match self.tokens.current_kind() {
            TokenKind::CloseBracket => (SyntaxKind::UnsizedDimension, None, None, None, None),
            TokenKind::Star if self.tokens.peek_kind(1) == TokenKind::CloseBracket => {
                let star = self.tokens.consume();
                (SyntaxKind::WildcardDimension, None, Some(star), None, None)
            }
            TokenKind::Dollar => {
                let dollar = self.tokens.consume();
                let colon = self.consume_if(TokenKind::Colon);
                let right = colon.map(|_| self.parse_expression());
                (SyntaxKind::QueueDimension, None, Some(dollar), colon, right)
            }
            _ => {
                let left = self.parse_expression();
                match self.consume_if(TokenKind::Colon) {
                    Some(colon) => {
                        let right = self.parse_expression();
                        (SyntaxKind::RangeDimension, Some(left), None, Some(colon), Some(right))
                    }
                    None => (SyntaxKind::ExpressionDimension, Some(left), None, None, None),
                }
            }
        };
        let close_bracket = self.expect(TokenKind::CloseBracket);
        self.finish(
            kind,
            pos,
            NodeData::Dimension(DimensionData {
                open_bracket,
                left,
                marker,
                colon,
                right,
                close_bracket,
            }),
        )
    }
}
