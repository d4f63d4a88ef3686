//! SystemVerilog scanner/tokenizer for the svz compiler.
//!
//! This crate provides the lexical analysis phase:
//! - `TokenKind` - token types (closed enumeration)
//! - `Token` - an immutable token with a trivia-inclusive span
//! - `Lexer` - converts source text into a finite, replayable token vector
//!
//! The parser never touches source text directly; it consumes the token
//! vector produced here. Every lex ends with an `EndOfFile` token whose
//! leading-trivia span covers any trailing whitespace and comments, so
//! concatenating `source[full_start..end]` over all tokens reproduces the
//! input exactly.

mod tokens;

pub use tokens::{KEYWORDS, TokenKind};

use memchr::memchr;
use serde::Serialize;
use svz_common::diagnostics::{Diagnostic, diagnostic_codes, format_message, get_message_template};

/// Literal payload attached to a token, where applicable.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum TokenValue {
    None,
    /// Integer literals with a known two-state value. Literals containing
    /// x/z/? digits carry `None`; shape is all the parser needs.
    Integer(u64),
    Real(f64),
}

/// An immutable lexical token.
///
/// `full_start` is the span start including leading trivia (whitespace and
/// comments); `pos` excludes trivia. Nodes built from tokens inherit the
/// trivia-inclusive start so that the tree covers the whole source text.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub full_start: u32,
    pub pos: u32,
    pub end: u32,
    pub value: TokenValue,
    /// True for zero-width tokens synthesized by the parser's
    /// expected-token recovery; never produced by the lexer.
    pub missing: bool,
}

impl Token {
    /// Synthesize a zero-width missing token at the given position.
    #[must_use]
    pub const fn missing(kind: TokenKind, pos: u32) -> Token {
        Token {
            kind,
            full_start: pos,
            pos,
            end: pos,
            value: TokenValue::None,
            missing: true,
        }
    }

    /// The token's text within its source, excluding trivia.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.pos as usize..self.end as usize]
    }
}

/// Lex an entire source string. Always returns at least the `EndOfFile`
/// token; lexical errors are reported through the diagnostics list and
/// never abort the scan.
pub fn lex(file_name: &str, source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut lexer = Lexer::new(file_name, source);
    lexer.run();
    (lexer.tokens, lexer.diagnostics)
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    file_name: String,
    pos: usize,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    fn new(file_name: &str, source: &'a str) -> Lexer<'a> {
        Lexer {
            source,
            bytes: source.as_bytes(),
            file_name: file_name.to_string(),
            pos: 0,
            tokens: Vec::with_capacity(source.len() / 4),
            diagnostics: Vec::new(),
        }
    }

    fn run(&mut self) {
        loop {
            let full_start = self.pos;
            self.skip_trivia();
            let start = self.pos;
            if self.pos >= self.bytes.len() {
                self.push(TokenKind::EndOfFile, full_start, start, TokenValue::None);
                break;
            }
            let (kind, value) = self.scan_token();
            self.push(kind, full_start, start, value);
        }
    }

    fn push(&mut self, kind: TokenKind, full_start: usize, pos: usize, value: TokenValue) {
        self.tokens.push(Token {
            kind,
            full_start: full_start as u32,
            pos: pos as u32,
            end: self.pos as u32,
            value,
            missing: false,
        });
    }

    fn error(&mut self, start: usize, code: u32, args: &[&str]) {
        let template = get_message_template(code).unwrap_or("lexical error");
        self.diagnostics.push(Diagnostic::error(
            self.file_name.clone(),
            start as u32,
            (self.pos.max(start + 1) - start) as u32,
            format_message(template, args),
            code,
        ));
    }

    fn peek_byte(&self, offset: usize) -> u8 {
        self.bytes.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn skip_trivia(&mut self) {
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b'/' if self.peek_byte(1) == b'/' => {
                    match memchr(b'\n', &self.bytes[self.pos..]) {
                        Some(offset) => self.pos += offset + 1,
                        None => self.pos = self.bytes.len(),
                    }
                }
                b'/' if self.peek_byte(1) == b'*' => {
                    let start = self.pos;
                    self.pos += 2;
                    loop {
                        match memchr(b'*', &self.bytes[self.pos..]) {
                            Some(offset) if self.pos + offset + 1 < self.bytes.len() => {
                                self.pos += offset + 1;
                                if self.bytes[self.pos] == b'/' {
                                    self.pos += 1;
                                    break;
                                }
                            }
                            _ => {
                                self.pos = self.bytes.len();
                                self.error(
                                    start,
                                    diagnostic_codes::UNTERMINATED_BLOCK_COMMENT,
                                    &[],
                                );
                                break;
                            }
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn scan_token(&mut self) -> (TokenKind, TokenValue) {
        use TokenKind::*;
        let c = self.bytes[self.pos];
        match c {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => (self.scan_identifier_or_keyword(), TokenValue::None),
            b'0'..=b'9' => self.scan_number(),
            b'"' => self.scan_string(),
            b'\\' => (self.scan_escaped_identifier(), TokenValue::None),
            b'$' => (self.scan_dollar(), TokenValue::None),
            b'\'' => self.scan_apostrophe(),
            _ => (self.scan_punctuation(), TokenValue::None),
        }
    }

    fn is_identifier_char(c: u8) -> bool {
        c.is_ascii_alphanumeric() || c == b'_' || c == b'$'
    }

    fn scan_identifier_or_keyword(&mut self) -> TokenKind {
        let start = self.pos;
        while self.pos < self.bytes.len() && Self::is_identifier_char(self.bytes[self.pos]) {
            self.pos += 1;
        }
        let text = &self.source[start..self.pos];
        KEYWORDS.get(text).copied().unwrap_or(TokenKind::Identifier)
    }

    fn scan_escaped_identifier(&mut self) -> TokenKind {
        let start = self.pos;
        self.pos += 1; // backslash
        while self.pos < self.bytes.len() && !self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if self.pos == start + 1 {
            self.error(start, diagnostic_codes::ESCAPED_IDENTIFIER_EMPTY, &[]);
        }
        TokenKind::Identifier
    }

    fn scan_dollar(&mut self) -> TokenKind {
        self.pos += 1;
        if self.pos < self.bytes.len() && Self::is_identifier_char(self.bytes[self.pos]) {
            while self.pos < self.bytes.len() && Self::is_identifier_char(self.bytes[self.pos]) {
                self.pos += 1;
            }
            TokenKind::SystemIdentifier
        } else {
            TokenKind::Dollar
        }
    }

    fn scan_string(&mut self) -> (TokenKind, TokenValue) {
        let start = self.pos;
        self.pos += 1;
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'"' => {
                    self.pos += 1;
                    return (TokenKind::StringLiteral, TokenValue::None);
                }
                b'\\' if self.pos + 1 < self.bytes.len() => self.pos += 2,
                b'\n' => break,
                _ => self.pos += 1,
            }
        }
        self.error(start, diagnostic_codes::UNTERMINATED_STRING, &[]);
        (TokenKind::StringLiteral, TokenValue::None)
    }

    /// Apostrophe forms: `'{` assignment pattern open, `'0 '1 'x 'z`
    /// unbased unsized literals, `'b1010` unsized based literals, and a
    /// bare `'` used by casts.
    fn scan_apostrophe(&mut self) -> (TokenKind, TokenValue) {
        let next = self.peek_byte(1);
        if next == b'{' {
            self.pos += 2;
            return (TokenKind::ApostropheOpenBrace, TokenValue::None);
        }
        if matches!(next, b'0' | b'1' | b'x' | b'X' | b'z' | b'Z')
            && !Self::is_identifier_char(self.peek_byte(2))
        {
            self.pos += 2;
            let value = match next {
                b'0' => TokenValue::Integer(0),
                b'1' => TokenValue::Integer(1),
                _ => TokenValue::None,
            };
            return (TokenKind::UnbasedUnsizedLiteral, value);
        }
        let base_offset = if matches!(next, b's' | b'S') { 2 } else { 1 };
        if matches!(
            self.peek_byte(base_offset),
            b'b' | b'B' | b'o' | b'O' | b'd' | b'D' | b'h' | b'H'
        ) {
            return self.scan_based_literal(self.pos);
        }
        self.pos += 1;
        (TokenKind::Apostrophe, TokenValue::None)
    }

    /// Scan the `'[s]<base><digits>` part of a based literal. `start` is
    /// the literal start (the size digits for sized literals, else the
    /// apostrophe itself).
    fn scan_based_literal(&mut self, start: usize) -> (TokenKind, TokenValue) {
        self.pos += 1; // apostrophe
        if matches!(self.bytes[self.pos], b's' | b'S') {
            self.pos += 1;
        }
        let base = self.bytes[self.pos].to_ascii_lowercase();
        self.pos += 1;

        let digits_start = self.pos;
        let mut value: u64 = 0;
        let mut unknown_bits = false;
        let radix: u64 = match base {
            b'b' => 2,
            b'o' => 8,
            b'd' => 10,
            _ => 16,
        };
        while self.pos < self.bytes.len() {
            let c = self.bytes[self.pos];
            let digit = match c {
                b'_' => {
                    self.pos += 1;
                    continue;
                }
                b'x' | b'X' | b'z' | b'Z' | b'?' => {
                    unknown_bits = true;
                    self.pos += 1;
                    continue;
                }
                b'0'..=b'9' => (c - b'0') as u64,
                b'a'..=b'f' => (c - b'a' + 10) as u64,
                b'A'..=b'F' => (c - b'A' + 10) as u64,
                _ => break,
            };
            if digit >= radix {
                let digit_text = (c as char).to_string();
                let base_text = (base as char).to_string();
                self.error(
                    self.pos,
                    diagnostic_codes::INVALID_BASE_DIGIT,
                    &[&digit_text, &base_text],
                );
                self.pos += 1;
                continue;
            }
            value = value.saturating_mul(radix).saturating_add(digit);
            self.pos += 1;
        }
        if self.pos == digits_start {
            self.error(start, diagnostic_codes::MISSING_BASE_DIGITS, &[]);
            return (TokenKind::IntegerLiteral, TokenValue::None);
        }
        let value = if unknown_bits {
            TokenValue::None
        } else {
            TokenValue::Integer(value)
        };
        (TokenKind::IntegerLiteral, value)
    }

    fn scan_number(&mut self) -> (TokenKind, TokenValue) {
        let start = self.pos;
        while self.pos < self.bytes.len()
            && (self.bytes[self.pos].is_ascii_digit() || self.bytes[self.pos] == b'_')
        {
            self.pos += 1;
        }

        // Sized based literal: 4'b1010
        let base_offset = if matches!(self.peek_byte(1), b's' | b'S') { 2 } else { 1 };
        if self.peek_byte(0) == b'\''
            && matches!(
                self.peek_byte(base_offset),
                b'b' | b'B' | b'o' | b'O' | b'd' | b'D' | b'h' | b'H'
            )
        {
            return self.scan_based_literal(start);
        }

        // Real literal: fraction and/or exponent
        let mut is_real = false;
        if self.peek_byte(0) == b'.' && self.peek_byte(1).is_ascii_digit() {
            is_real = true;
            self.pos += 1;
            while self.pos < self.bytes.len()
                && (self.bytes[self.pos].is_ascii_digit() || self.bytes[self.pos] == b'_')
            {
                self.pos += 1;
            }
        }
        if matches!(self.peek_byte(0), b'e' | b'E') {
            let mut offset = 1;
            if matches!(self.peek_byte(1), b'+' | b'-') {
                offset = 2;
            }
            if self.peek_byte(offset).is_ascii_digit() {
                is_real = true;
                self.pos += offset;
                while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_digit() {
                    self.pos += 1;
                }
            }
        }

        // Time literal: number immediately followed by a time unit
        if let Some(unit_len) = self.time_unit_length() {
            self.pos += unit_len;
            return (TokenKind::TimeLiteral, TokenValue::None);
        }

        let text: String = self.source[start..self.pos]
            .chars()
            .filter(|&c| c != '_')
            .collect();
        if is_real {
            let value = text.parse::<f64>().map_or(TokenValue::None, TokenValue::Real);
            (TokenKind::RealLiteral, value)
        } else {
            let value = text
                .parse::<u64>()
                .map_or(TokenValue::Integer(u64::MAX), TokenValue::Integer);
            (TokenKind::IntegerLiteral, value)
        }
    }

    /// Length of a time unit (s, ms, us, ns, ps, fs) at the current
    /// position, if the characters after it do not continue an identifier.
    fn time_unit_length(&self) -> Option<usize> {
        let len = match (self.peek_byte(0), self.peek_byte(1)) {
            (b's', _) => 1,
            (b'm' | b'u' | b'n' | b'p' | b'f', b's') => 2,
            _ => return None,
        };
        if Self::is_identifier_char(self.peek_byte(len)) {
            None
        } else {
            Some(len)
        }
    }

    fn scan_punctuation(&mut self) -> TokenKind {
        use TokenKind::*;
        let start = self.pos;
        let c = self.bytes[self.pos];
        self.pos += 1;
        let b1 = self.peek_byte(0);
        match c {
            b'(' => {
                if b1 == b'*' {
                    self.pos += 1;
                    OpenParenStar
                } else {
                    OpenParen
                }
            }
            b')' => CloseParen,
            b'[' => OpenBracket,
            b']' => CloseBracket,
            b'{' => OpenBrace,
            b'}' => CloseBrace,
            b';' => Semicolon,
            b',' => Comma,
            b'?' => Question,
            b'#' => Hash,
            b'@' => At,
            b':' => {
                if b1 == b':' {
                    self.pos += 1;
                    DoubleColon
                } else {
                    Colon
                }
            }
            b'.' => {
                if b1 == b'*' {
                    self.pos += 1;
                    DotStar
                } else {
                    Dot
                }
            }
            b'+' => match b1 {
                b'+' => {
                    self.pos += 1;
                    DoublePlus
                }
                b'=' => {
                    self.pos += 1;
                    PlusEqual
                }
                b':' => {
                    self.pos += 1;
                    PlusColon
                }
                _ => Plus,
            },
            b'-' => match b1 {
                b'-' => {
                    self.pos += 1;
                    DoubleMinus
                }
                b'=' => {
                    self.pos += 1;
                    MinusEqual
                }
                b'>' => {
                    self.pos += 1;
                    MinusArrow
                }
                b':' => {
                    self.pos += 1;
                    MinusColon
                }
                _ => Minus,
            },
            b'*' => match b1 {
                b'*' => {
                    self.pos += 1;
                    DoubleStar
                }
                b')' => {
                    self.pos += 1;
                    StarCloseParen
                }
                b'=' => {
                    self.pos += 1;
                    StarEqual
                }
                _ => Star,
            },
            b'/' => {
                if b1 == b'=' {
                    self.pos += 1;
                    SlashEqual
                } else {
                    Slash
                }
            }
            b'%' => {
                if b1 == b'=' {
                    self.pos += 1;
                    PercentEqual
                } else {
                    Percent
                }
            }
            b'=' => {
                if b1 == b'=' {
                    self.pos += 1;
                    match self.peek_byte(0) {
                        b'=' => {
                            self.pos += 1;
                            TripleEquals
                        }
                        b'?' => {
                            self.pos += 1;
                            DoubleEqualsQuestion
                        }
                        _ => DoubleEquals,
                    }
                } else {
                    Equals
                }
            }
            b'!' => {
                if b1 == b'=' {
                    self.pos += 1;
                    match self.peek_byte(0) {
                        b'=' => {
                            self.pos += 1;
                            ExclamationDoubleEquals
                        }
                        b'?' => {
                            self.pos += 1;
                            ExclamationEqualsQuestion
                        }
                        _ => ExclamationEquals,
                    }
                } else {
                    Exclamation
                }
            }
            b'<' => match b1 {
                b'=' => {
                    self.pos += 1;
                    LessThanEquals
                }
                b'-' if self.peek_byte(1) == b'>' => {
                    self.pos += 2;
                    LessThanMinusArrow
                }
                b'<' => {
                    self.pos += 1;
                    match self.peek_byte(0) {
                        b'<' => {
                            self.pos += 1;
                            if self.peek_byte(0) == b'=' {
                                self.pos += 1;
                                TripleLeftShiftEqual
                            } else {
                                TripleLeftShift
                            }
                        }
                        b'=' => {
                            self.pos += 1;
                            LeftShiftEqual
                        }
                        _ => LeftShift,
                    }
                }
                _ => LessThan,
            },
            b'>' => match b1 {
                b'=' => {
                    self.pos += 1;
                    GreaterThanEquals
                }
                b'>' => {
                    self.pos += 1;
                    match self.peek_byte(0) {
                        b'>' => {
                            self.pos += 1;
                            if self.peek_byte(0) == b'=' {
                                self.pos += 1;
                                TripleRightShiftEqual
                            } else {
                                TripleRightShift
                            }
                        }
                        b'=' => {
                            self.pos += 1;
                            RightShiftEqual
                        }
                        _ => RightShift,
                    }
                }
                _ => GreaterThan,
            },
            b'&' => match b1 {
                b'&' => {
                    self.pos += 1;
                    if self.peek_byte(0) == b'&' {
                        self.pos += 1;
                        TripleAnd
                    } else {
                        DoubleAnd
                    }
                }
                b'=' => {
                    self.pos += 1;
                    AndEqual
                }
                _ => And,
            },
            b'|' => match b1 {
                b'|' => {
                    self.pos += 1;
                    DoubleOr
                }
                b'=' => {
                    self.pos += 1;
                    OrEqual
                }
                _ => Or,
            },
            b'^' => match b1 {
                b'~' => {
                    self.pos += 1;
                    XorTilde
                }
                b'=' => {
                    self.pos += 1;
                    XorEqual
                }
                _ => Xor,
            },
            b'~' => match b1 {
                b'&' => {
                    self.pos += 1;
                    TildeAnd
                }
                b'|' => {
                    self.pos += 1;
                    TildeOr
                }
                b'^' => {
                    self.pos += 1;
                    TildeXor
                }
                _ => Tilde,
            },
            _ => {
                self.error(start, diagnostic_codes::INVALID_CHARACTER, &[]);
                Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let (tokens, _) = lex("test.sv", source);
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("module foo endmodule"),
            vec![
                TokenKind::ModuleKeyword,
                TokenKind::Identifier,
                TokenKind::EndModuleKeyword,
                TokenKind::EndOfFile
            ]
        );
    }

    #[test]
    fn sized_based_literal_value() {
        let (tokens, diags) = lex("test.sv", "4'b1010");
        assert!(diags.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
        assert_eq!(tokens[0].value, TokenValue::Integer(10));
    }

    #[test]
    fn based_literal_with_unknown_bits_has_no_value() {
        let (tokens, diags) = lex("test.sv", "8'hxz");
        assert!(diags.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
        assert_eq!(tokens[0].value, TokenValue::None);
    }

    #[test]
    fn invalid_base_digit_reported() {
        let (_, diags) = lex("test.sv", "2'b12");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, diagnostic_codes::INVALID_BASE_DIGIT);
    }

    #[test]
    fn unbased_unsized_literals() {
        assert_eq!(
            kinds("'0 '1 'x 'z"),
            vec![
                TokenKind::UnbasedUnsizedLiteral,
                TokenKind::UnbasedUnsizedLiteral,
                TokenKind::UnbasedUnsizedLiteral,
                TokenKind::UnbasedUnsizedLiteral,
                TokenKind::EndOfFile
            ]
        );
    }

    #[test]
    fn real_and_time_literals() {
        assert_eq!(
            kinds("3.14 1e9 10ns 100ps"),
            vec![
                TokenKind::RealLiteral,
                TokenKind::RealLiteral,
                TokenKind::TimeLiteral,
                TokenKind::TimeLiteral,
                TokenKind::EndOfFile
            ]
        );
    }

    #[test]
    fn compound_operators_maximal_munch() {
        assert_eq!(
            kinds("<<<= >>> === !=? <-> ~^ &&&"),
            vec![
                TokenKind::TripleLeftShiftEqual,
                TokenKind::TripleRightShift,
                TokenKind::TripleEquals,
                TokenKind::ExclamationEqualsQuestion,
                TokenKind::LessThanMinusArrow,
                TokenKind::TildeXor,
                TokenKind::TripleAnd,
                TokenKind::EndOfFile
            ]
        );
    }

    #[test]
    fn attribute_delimiters() {
        assert_eq!(
            kinds("(* full_case *)"),
            vec![
                TokenKind::OpenParenStar,
                TokenKind::Identifier,
                TokenKind::StarCloseParen,
                TokenKind::EndOfFile
            ]
        );
    }

    #[test]
    fn system_identifier_and_dollar() {
        assert_eq!(
            kinds("$display q[$]"),
            vec![
                TokenKind::SystemIdentifier,
                TokenKind::Identifier,
                TokenKind::OpenBracket,
                TokenKind::Dollar,
                TokenKind::CloseBracket,
                TokenKind::EndOfFile
            ]
        );
    }

    #[test]
    fn token_spans_cover_source_exactly() {
        let source = "  module /* hi */ m; // tail\n";
        let (tokens, _) = lex("test.sv", source);
        let mut rebuilt = String::new();
        for token in &tokens {
            rebuilt.push_str(&source[token.full_start as usize..token.end as usize]);
        }
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn unterminated_string_recovers() {
        let (tokens, diags) = lex("test.sv", "\"abc\nx");
        assert_eq!(diags[0].code, diagnostic_codes::UNTERMINATED_STRING);
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Identifier));
    }

    #[test]
    fn invalid_character_becomes_unknown_token() {
        let (tokens, diags) = lex("test.sv", "`");
        assert_eq!(tokens[0].kind, TokenKind::Unknown);
        assert_eq!(diags[0].code, diagnostic_codes::INVALID_CHARACTER);
    }
}
