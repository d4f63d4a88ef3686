//! Syntactic front end: turns source text into an arena-backed concrete
//! syntax tree plus a diagnostic list. Parsing never fails; malformed
//! input produces a tree with missing tokens and placeholder nodes and
//! the diagnostics describe what went wrong.
//!
//! The tree is lossless with respect to spans. Every node covers its
//! tokens' full extents including leading trivia, so
//! `&source[root.pos..root.end]` reproduces the input.

mod node;
mod node_arena;
mod parser;
mod token_stream;

pub use node::*;
pub use node_arena::NodeArena;
pub use token_stream::{Marker, TokenStream};

use tracing::trace;

use svz_common::diagnostics::Diagnostic;
use svz_scanner::lex;

use parser::Parser;

/// Result of a parse: the arena holding every node, the root index, and
/// all lexer and parser diagnostics in source order.
pub struct SyntaxTree {
    file_name: String,
    root: NodeIndex,
    arena: NodeArena,
    diagnostics: Vec<Diagnostic>,
}

impl SyntaxTree {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn root_node(&self) -> &SyntaxNode {
        self.arena.get(self.root)
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

fn run_parse<F>(file_name: &str, source: &str, parse: F) -> SyntaxTree
where
    F: FnOnce(&mut Parser) -> NodeIndex,
{
    let (tokens, mut diagnostics) = lex(file_name, source);
    trace!(file = file_name, tokens = tokens.len(), "parsing");
    let mut parser = Parser::new(file_name, tokens);
    let root = parse(&mut parser);
    let (arena, parser_diagnostics) = parser.into_parts();
    diagnostics.extend(parser_diagnostics);
    diagnostics.sort_by_key(|d| d.start);
    SyntaxTree { file_name: file_name.to_string(), root, arena, diagnostics }
}

/// Parse a whole compilation unit.
pub fn parse_source(file_name: &str, source: &str) -> SyntaxTree {
    run_parse(file_name, source, |p| p.parse_compilation_unit())
}

/// Parse a single expression. Trailing tokens are left unconsumed.
pub fn parse_expression(file_name: &str, source: &str) -> SyntaxTree {
    run_parse(file_name, source, |p| p.parse_expression())
}

/// Parse a single statement.
pub fn parse_statement(file_name: &str, source: &str) -> SyntaxTree {
    run_parse(file_name, source, |p| p.parse_statement())
}

/// Parse a single module-level member.
pub fn parse_member(file_name: &str, source: &str) -> SyntaxTree {
    run_parse(file_name, source, |p| p.parse_member_entry())
}
