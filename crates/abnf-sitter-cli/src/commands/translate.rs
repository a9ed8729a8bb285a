//! Translate an ABNF file into a generator descriptor, without running the generator.

use std::path::PathBuf;

use abnf_sitter_core::Colors;
use abnf_sitter_lib::{GrammarConfig, OutputFormat, assemble, read_source};

use super::{CommandError, fail, parse_grammar, print_diagnostics};

pub struct TranslateArgs {
    pub grammar: GrammarConfig,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub color: bool,
}

pub fn run(args: TranslateArgs) {
    let colors = Colors::new(args.color);
    let text = translate(&args).unwrap_or_else(|e| fail(e, colors));

    match &args.output {
        Some(path) => {
            if let Err(source) = std::fs::write(path, &text) {
                fail(
                    CommandError::Write {
                        path: path.clone(),
                        source,
                    },
                    colors,
                );
            }
        }
        None => print!("{text}"),
    }
}

fn translate(args: &TranslateArgs) -> Result<String, CommandError> {
    let path = &args.grammar.source;
    let source = read_source(path)?;
    let grammar = parse_grammar(&source, path, args.color)?;

    let session = args.grammar.session()?;
    let (descriptor, diagnostics) = grammar.translate(&session)?;
    print_diagnostics(&diagnostics, &source, path, args.color);

    Ok(assemble(&descriptor, args.format)?)
}
