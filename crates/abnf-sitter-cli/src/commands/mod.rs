pub mod ast;
pub mod generate;
pub mod reporter;
pub mod translate;


use std::path::{Path, PathBuf};

use abnf_sitter_core::Colors;
use abnf_sitter_lib::{AbnfGrammar, Diagnostics};

/// Exit status when the generator loop gives up without a fatal error.
pub const EXIT_GIVEN_UP: i32 = 2;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Lib(#[from] abnf_sitter_lib::Error),

    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} has errors", .0.display())]
    InvalidGrammar(PathBuf),
}

/// Print `error: ...` and exit with status 1.
pub fn fail(err: impl std::fmt::Display, colors: Colors) -> ! {
    eprintln!("{}error{}: {}", colors.red, colors.reset, err);
    std::process::exit(1);
}

/// Print diagnostics for `source`, labelled with its path.
pub fn print_diagnostics(diagnostics: &Diagnostics, source: &str, path: &Path, color: bool) {
    if diagnostics.is_empty() {
        return;
    }
    let path = path.to_string_lossy();
    eprint!(
        "{}",
        diagnostics
            .printer(source)
            .path(&path)
            .colored(color)
            .render()
    );
}

/// Parse `source`, printing parse diagnostics. Invalid grammars are an error.
pub fn parse_grammar<'s>(
    source: &'s str,
    path: &Path,
    color: bool,
) -> Result<AbnfGrammar<'s>, CommandError> {
    let grammar = AbnfGrammar::parse(source)?;
    print_diagnostics(grammar.diagnostics(), source, path, color);
    if !grammar.is_valid() {
        return Err(CommandError::InvalidGrammar(path.to_path_buf()));
    }
    Ok(grammar)
}
