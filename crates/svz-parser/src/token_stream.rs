//! Replayable cursor over the lexed token vector.
//!
//! The stream saturates at end of input: peeking or consuming past the
//! last token keeps returning the `EndOfFile` token, so parse routines
//! never need a separate end-of-input code path. `mark`/`rewind` give the
//! parser O(1) speculation over the already-lexed tokens.

use svz_scanner::{Token, TokenKind, TokenValue};

/// Opaque save point returned by [`TokenStream::mark`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Marker(usize);

pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    /// The token vector must be non-empty and end with `EndOfFile`; the
    /// lexer guarantees both.
    pub fn new(tokens: Vec<Token>) -> TokenStream {
        debug_assert!(matches!(
            tokens.last().map(|t| t.kind),
            Some(TokenKind::EndOfFile)
        ));
        TokenStream { tokens, cursor: 0 }
    }

    /// Look ahead `offset` tokens without consuming. `peek(0)` is the
    /// current token.
    pub fn peek(&self, offset: usize) -> Token {
        let index = (self.cursor + offset).min(self.tokens.len() - 1);
        self.tokens[index]
    }

    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.peek(offset).kind
    }

    pub fn current(&self) -> Token {
        self.peek(0)
    }

    pub fn current_kind(&self) -> TokenKind {
        self.peek(0).kind
    }

    /// Consume and return the current token. At end of input this keeps
    /// returning the `EndOfFile` token without advancing further.
    pub fn consume(&mut self) -> Token {
        let token = self.tokens[self.cursor.min(self.tokens.len() - 1)];
        if self.cursor < self.tokens.len() - 1 {
            self.cursor += 1;
        }
        token
    }

    pub fn at_end(&self) -> bool {
        self.current_kind() == TokenKind::EndOfFile
    }

    pub fn mark(&self) -> Marker {
        Marker(self.cursor)
    }

    /// Rewind to a save point. Markers never move forward, so this only
    /// replays tokens already consumed.
    pub fn rewind(&mut self, marker: Marker) {
        debug_assert!(marker.0 <= self.cursor);
        self.cursor = marker.0;
    }

    /// Byte offset used to detect stalled recovery loops.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// End of the most recently consumed token, or the start of input when
    /// nothing has been consumed yet. Finished nodes take this as their
    /// end offset.
    pub fn prev_token_end(&self) -> u32 {
        if self.cursor == 0 {
            self.tokens[0].full_start
        } else {
            self.tokens[self.cursor - 1].end
        }
    }

    /// Integer payload of a token, when the lexer computed one.
    pub fn integer_value(token: &Token) -> Option<u64> {
        match token.value {
            TokenValue::Integer(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(source: &str) -> TokenStream {
        let (tokens, diagnostics) = svz_scanner::lex("test.sv", source);
        assert!(diagnostics.is_empty());
        TokenStream::new(tokens)
    }

    #[test]
    fn peek_and_consume_saturate_at_eof() {
        let mut ts = stream("a b");
        assert_eq!(ts.peek_kind(0), TokenKind::Identifier);
        assert_eq!(ts.peek_kind(1), TokenKind::Identifier);
        assert_eq!(ts.peek_kind(2), TokenKind::EndOfFile);
        assert_eq!(ts.peek_kind(100), TokenKind::EndOfFile);

        ts.consume();
        ts.consume();
        assert!(ts.at_end());
        let eof1 = ts.consume();
        let eof2 = ts.consume();
        assert_eq!(eof1.kind, TokenKind::EndOfFile);
        assert_eq!(eof2, eof1);
    }

    #[test]
    fn mark_and_rewind_replays_tokens() {
        let mut ts = stream("x + y");
        let mark = ts.mark();
        let first = ts.consume();
        ts.consume();
        ts.rewind(mark);
        assert_eq!(ts.consume(), first);
    }

    #[test]
    fn prev_token_end_tracks_consumed_tokens() {
        let mut ts = stream("  ab cd");
        assert_eq!(ts.prev_token_end(), 0);
        let t = ts.consume();
        assert_eq!(ts.prev_token_end(), t.end);
    }
}
