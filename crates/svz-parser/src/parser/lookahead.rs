//! Side-effect-free classifiers for the grammar decisions that need
//! unbounded lookahead. Each routine marks the stream, scans forward,
//! and always rewinds; no diagnostics and no nodes are produced here.

use svz_scanner::TokenKind;

use super::Parser;

impl Parser<'_> {
    /// True when the current `Identifier` begins a module or interface
    /// instantiation: `type [#(...)] name {[...]} (`.
    pub(crate) fn is_hierarchy_instantiation(&mut self) -> bool {
        debug_assert_eq!(self.tokens.current_kind(), TokenKind::Identifier);
        let marker = self.tokens.mark();
        let result = self.scan_hierarchy_instantiation();
        self.tokens.rewind(marker);
        result
    }

    fn scan_hierarchy_instantiation(&mut self) -> bool {
        self.tokens.consume();
        if self.tokens.current_kind() == TokenKind::Hash {
            self.tokens.consume();
            if !self.scan_balanced(TokenKind::OpenParen, TokenKind::CloseParen) {
                return false;
            }
        }
        if self.tokens.current_kind() != TokenKind::Identifier {
            return false;
        }
        self.tokens.consume();
        if !self.scan_dimension_list() {
            return false;
        }
        self.tokens.current_kind() == TokenKind::OpenParen
    }

    /// True when the current `Identifier` begins a variable declaration
    /// rather than an expression statement: a (possibly scoped) type name,
    /// optional parameter assignment and dimensions, then another
    /// identifier.
    pub(crate) fn is_variable_declaration(&mut self) -> bool {
        debug_assert_eq!(self.tokens.current_kind(), TokenKind::Identifier);
        let marker = self.tokens.mark();
        let result = self.scan_variable_declaration();
        self.tokens.rewind(marker);
        result
    }

    fn scan_variable_declaration(&mut self) -> bool {
        if !self.scan_qualified_name() {
            return false;
        }
        if self.tokens.current_kind() == TokenKind::Hash {
            self.tokens.consume();
            if !self.scan_balanced(TokenKind::OpenParen, TokenKind::CloseParen) {
                return false;
            }
        }
        if !self.scan_dimension_list() {
            return false;
        }
        self.tokens.current_kind() == TokenKind::Identifier
    }

    /// Inside `module m ( ... )`, decide whether the list uses the
    /// non-ANSI style. Plain names, `.name(expr)` entries, and
    /// concatenations are non-ANSI; anything typed is ANSI.
    pub(crate) fn is_non_ansi_port_list(&mut self) -> bool {
        match self.tokens.current_kind() {
            TokenKind::Dot | TokenKind::OpenBrace => true,
            TokenKind::Identifier => matches!(
                self.tokens.peek_kind(1),
                TokenKind::Comma
                    | TokenKind::CloseParen
                    | TokenKind::OpenBracket
                    | TokenKind::Dot
            ),
            _ => false,
        }
    }

    fn scan_qualified_name(&mut self) -> bool {
        if self.tokens.current_kind() != TokenKind::Identifier {
            return false;
        }
        self.tokens.consume();
        while self.tokens.current_kind() == TokenKind::DoubleColon {
            self.tokens.consume();
            if self.tokens.current_kind() != TokenKind::Identifier {
                return false;
            }
            self.tokens.consume();
        }
        true
    }

    fn scan_dimension_list(&mut self) -> bool {
        while self.tokens.current_kind() == TokenKind::OpenBracket {
            if !self.scan_balanced(TokenKind::OpenBracket, TokenKind::CloseBracket) {
                return false;
            }
        }
        true
    }

    /// Skip a balanced `open ... close` region starting at `open`.
    /// Stops at end of input and reports failure so callers give up
    /// instead of looping.
    fn scan_balanced(&mut self, open: TokenKind, close: TokenKind) -> bool {
        if self.tokens.current_kind() != open {
            return false;
        }
        self.tokens.consume();
        let mut depth = 1u32;
        while depth > 0 {
            if self.tokens.at_end() {
                return false;
            }
            let kind = self.tokens.consume().kind;
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth -= 1;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use svz_scanner::lex;

    use crate::parser::Parser;

    fn parser_for(source: &str) -> Parser<'static> {
        let (tokens, diagnostics) = lex("test.sv", source);
        assert!(diagnostics.is_empty());
        Parser::new("test.sv", tokens)
    }

    #[test]
    fn classifies_instantiation() {
        let mut p = parser_for("adder #(.W(8)) u1 [3:0] (.a(a), .b(b));");
        assert!(p.is_hierarchy_instantiation());
        assert_eq!(p.tokens.position(), 0);
    }

    #[test]
    fn rejects_call_as_instantiation() {
        let mut p = parser_for("foo (1, 2);");
        // `foo (` has no instance name
        assert!(!p.is_hierarchy_instantiation());
        assert_eq!(p.tokens.position(), 0);
    }

    #[test]
    fn classifies_variable_declaration() {
        let mut p = parser_for("pkg::list_t [7:0] items;");
        assert!(p.is_variable_declaration());
        assert_eq!(p.tokens.position(), 0);
    }

    #[test]
    fn rejects_assignment_as_declaration() {
        let mut p = parser_for("x = y + 1;");
        assert!(!p.is_variable_declaration());
    }
}
