//! Diagnostic types and message lookup for the parser and lexer.
//!
//! Diagnostics are append-only records: every phase pushes onto its own
//! list in source order and never throws past it. Codes are stable numeric
//! identifiers so downstream tooling can filter without string matching.

use serde::Serialize;

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Message = 2,
}

/// A single diagnostic record with a byte-offset span into the source.
#[derive(Clone, Debug, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
        }
    }

    /// Create a new warning diagnostic.
    #[must_use]
    pub const fn warning(
        file: String,
        start: u32,
        length: u32,
        message: String,
        code: u32,
    ) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Warning,
            code,
        }
    }
}

/// A diagnostic message template.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Stable diagnostic codes. 1xxx are lexer diagnostics, 2xxx are parser
/// diagnostics.
pub mod diagnostic_codes {
    pub const UNTERMINATED_STRING: u32 = 1001;
    pub const UNTERMINATED_BLOCK_COMMENT: u32 = 1002;
    pub const INVALID_CHARACTER: u32 = 1003;
    pub const MISSING_BASE_DIGITS: u32 = 1004;
    pub const INVALID_BASE_DIGIT: u32 = 1005;
    pub const ESCAPED_IDENTIFIER_EMPTY: u32 = 1006;

    pub const EXPECTED_TOKEN: u32 = 2001;
    pub const EXPECTED_IDENTIFIER: u32 = 2002;
    pub const EXPECTED_EXPRESSION: u32 = 2003;
    pub const EXPECTED_STATEMENT: u32 = 2004;
    pub const EXPECTED_MEMBER: u32 = 2005;
    pub const EXPECTED_DATA_TYPE: u32 = 2006;
    pub const EXPECTED_CASE_ITEM: u32 = 2007;
    pub const EXPECTED_CONSTRAINT_ITEM: u32 = 2008;
    pub const EXPECTED_PORT: u32 = 2009;
    pub const EXPECTED_CLASS_MEMBER: u32 = 2010;
    pub const MAX_NESTING_DEPTH_EXCEEDED: u32 = 2011;
    pub const EXPECTED_NAMED_ARGUMENT: u32 = 2012;
    pub const EXPECTED_PATTERN: u32 = 2013;
}

/// Message templates keyed by code; `{0}`, `{1}`, ... are substituted via
/// [`format_message`].
pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_STRING,
        category: DiagnosticCategory::Error,
        message: "unterminated string literal",
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_BLOCK_COMMENT,
        category: DiagnosticCategory::Error,
        message: "unterminated block comment",
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_CHARACTER,
        category: DiagnosticCategory::Error,
        message: "invalid character in input",
    },
    DiagnosticMessage {
        code: diagnostic_codes::MISSING_BASE_DIGITS,
        category: DiagnosticCategory::Error,
        message: "expected digits after base specifier",
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_BASE_DIGIT,
        category: DiagnosticCategory::Error,
        message: "digit '{0}' is not valid for the '{1}' base",
    },
    DiagnosticMessage {
        code: diagnostic_codes::ESCAPED_IDENTIFIER_EMPTY,
        category: DiagnosticCategory::Error,
        message: "escaped identifier has no characters",
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_TOKEN,
        category: DiagnosticCategory::Error,
        message: "expected '{0}'",
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_IDENTIFIER,
        category: DiagnosticCategory::Error,
        message: "expected identifier",
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_EXPRESSION,
        category: DiagnosticCategory::Error,
        message: "expected expression",
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_STATEMENT,
        category: DiagnosticCategory::Error,
        message: "expected statement",
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_MEMBER,
        category: DiagnosticCategory::Error,
        message: "expected module member or declaration",
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_DATA_TYPE,
        category: DiagnosticCategory::Error,
        message: "expected data type",
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_CASE_ITEM,
        category: DiagnosticCategory::Error,
        message: "expected case item",
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_CONSTRAINT_ITEM,
        category: DiagnosticCategory::Error,
        message: "expected constraint item",
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_PORT,
        category: DiagnosticCategory::Error,
        message: "expected port",
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_CLASS_MEMBER,
        category: DiagnosticCategory::Error,
        message: "expected class member",
    },
    DiagnosticMessage {
        code: diagnostic_codes::MAX_NESTING_DEPTH_EXCEEDED,
        category: DiagnosticCategory::Error,
        message: "constructs are nested too deeply",
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_NAMED_ARGUMENT,
        category: DiagnosticCategory::Error,
        message: "expected named argument",
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_PATTERN,
        category: DiagnosticCategory::Error,
        message: "expected pattern",
    },
];

/// Look up the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_lookup_and_formatting() {
        let template = get_message_template(diagnostic_codes::EXPECTED_TOKEN).unwrap();
        assert_eq!(format_message(template, &[";"]), "expected ';'");
    }

    #[test]
    fn codes_are_unique() {
        for (i, a) in DIAGNOSTIC_MESSAGES.iter().enumerate() {
            for b in &DIAGNOSTIC_MESSAGES[i + 1..] {
                assert_ne!(a.code, b.code, "duplicate diagnostic code {}", a.code);
            }
        }
    }
}
