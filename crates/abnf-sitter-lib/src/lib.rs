//! abnf-sitter: translate ABNF (RFC 5234) grammars into tree-sitter grammars.
//!
//! # Example
//!
//! ```
//! use abnf_sitter_lib::{AbnfGrammar, OutputFormat, Session, assemble};
//!
//! let source = r#"greeting = "hello" 1*SP name
//! name = 1*ALPHA
//! "#;
//!
//! let grammar = AbnfGrammar::parse(source).expect("out of fuel");
//! assert!(grammar.is_valid());
//!
//! let session = Session::new(".", "greeting", "greeting").with_core_rules(true);
//! let (descriptor, diagnostics) = grammar.translate(&session).unwrap();
//! assert!(diagnostics.is_empty());
//!
//! let js = assemble(&descriptor, OutputFormat::JavaScript).unwrap();
//! assert!(js.contains("source_file: $ => $.greeting"));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod assemble;
pub mod config;
pub mod diagnostics;
pub mod feedback;
pub mod parser;
pub mod session;
pub mod translate;

#[cfg(test)]
mod session_tests;

use std::path::PathBuf;

/// Result type for passes that produce both output and diagnostics.
///
/// Each pass returns its typed output alongside any diagnostics it collected.
/// Fatal errors (like fuel exhaustion) use the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

pub use abnf_sitter_core::{Grammar, GrammarRule, Rule};
pub use assemble::{OutputFormat, assemble};
pub use config::{Config, GrammarConfig};
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use feedback::{
    CommandGenerator, Controller, Generator, GeneratorDiagnostic, GenerationReport, GiveUp,
    GiveUpReason, Outcome, Reporter,
};
pub use session::Session;

/// Errors that abort a pass or a generation session.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Recursion fuel exhausted (groups nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("ABNF parsing failed with {} errors", .0.error_count())]
    AbnfParseError(Diagnostics),

    /// The tree or the descriptor breaks a guarantee later stages rely on.
    #[error("structural violation: {0}")]
    StructuralViolation(String),

    /// Inline rules that would substitute each other forever, as a path.
    #[error("inline rules form a cycle: {}", .0.join(" -> "))]
    InlineCycle(Vec<String>),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to run `{command}`: {source}")]
    GeneratorSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for fatal operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A parsed ABNF grammar and its parse diagnostics.
///
/// Parsing never fails on malformed input; check [`is_valid`](Self::is_valid)
/// before translating. Only recursion fuel exhaustion is an `Err`.
#[derive(Debug, Clone)]
pub struct AbnfGrammar<'a> {
    source: &'a str,
    parse: parser::Parse,
    diagnostics: Diagnostics,
}

impl<'a> AbnfGrammar<'a> {
    pub fn parse(source: &'a str) -> Result<Self> {
        let (parse, diagnostics) = parser::parse(source)?;
        Ok(Self {
            source,
            parse,
            diagnostics,
        })
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn is_valid(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn root(&self) -> parser::Root {
        self.parse.root()
    }

    /// Translate under `session`. A grammar with parse errors is never translated.
    pub fn translate(&self, session: &Session) -> PassResult<Grammar> {
        if !self.is_valid() {
            return Err(Error::AbnfParseError(self.diagnostics.clone()));
        }
        translate::translate(&self.root(), session)
    }

    /// CST dump; `raw` adds trivia tokens and spans.
    pub fn dump_cst(&self, raw: bool) -> String {
        let root = self.parse.syntax();
        parser::CstPrinter::new(&root)
            .with_trivia(raw)
            .with_spans(raw)
            .dump()
    }
}

/// Read an ABNF file, attaching the path to the error.
pub fn read_source(path: impl Into<PathBuf>) -> Result<String> {
    let path = path.into();
    std::fs::read_to_string(&path).map_err(|err| {
        Error::Io(std::io::Error::new(
            err.kind(),
            format!("{}: {err}", path.display()),
        ))
    })
}
