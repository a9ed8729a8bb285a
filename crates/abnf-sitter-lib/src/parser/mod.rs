//! ABNF front end.
//!
//! # Architecture
//!
//! The parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder:
//!
//! - Zero-copy parsing: tokens carry spans, text sliced only when building tree nodes
//! - Trivia buffering: whitespace, newlines and `;` comments collected, then attached as leading trivia
//! - LL(2) rule detection: a name followed by `=` or `=/` always starts a new rule
//!
//! # Recovery Strategy
//!
//! The parser is resilient: it always produces a tree.
//!
//! 1. Tokens that cannot start a rule are wrapped in `SyntaxKind::Error` nodes up to the next rule
//! 2. Missing expected tokens emit a diagnostic but don't consume (parent may handle)
//! 3. Unclosed `(` / `[` are reported against their opening delimiter
//!
//! Recursion fuel exhaustion returns an actual error immediately.

pub mod ast;
pub mod cst;
pub mod lexer;
pub mod printer;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod ast_tests;
#[cfg(test)]
mod cst_tests;
#[cfg(test)]
mod grammar_tests;
#[cfg(test)]
mod lexer_tests;

pub use ast::{
    Alternation, CharVal, Concatenation, DefinedAs, Element, ElementValue, Group, NumVal, Opt,
    ProseVal, Repeat, Repetition, Root, Rule,
};
pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};
pub use printer::CstPrinter;

pub use core::Parser;

use crate::PassResult;
use lexer::lex;

/// Nesting depth of groups and options before parsing aborts.
pub const DEFAULT_RECURSION_FUEL: u32 = 512;

/// Parse result containing the green tree.
///
/// The tree is always complete; diagnostics are returned separately.
/// Error nodes in the tree represent recovery points.
#[derive(Debug, Clone)]
pub struct Parse {
    cst: rowan::GreenNode,
}

impl Parse {
    pub fn as_cst(&self) -> &rowan::GreenNode {
        &self.cst
    }

    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.cst.clone())
    }

    pub fn root(&self) -> Root {
        Root::cast(self.syntax()).expect("parser always produces Root")
    }
}

/// Main entry point. Returns Err on recursion fuel exhaustion.
pub fn parse(source: &str) -> PassResult<Parse> {
    parse_with_parser(
        Parser::new(source, lex(source)).with_recursion_fuel(Some(DEFAULT_RECURSION_FUEL)),
    )
}

/// Parse with a pre-configured parser (for custom fuel limits).
pub(crate) fn parse_with_parser(mut parser: Parser) -> PassResult<Parse> {
    parser.parse_root();
    let (cst, diagnostics) = parser.finish()?;
    Ok((Parse { cst }, diagnostics))
}
