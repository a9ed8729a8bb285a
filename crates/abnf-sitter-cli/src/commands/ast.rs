//! Show the syntax tree of an ABNF file.

use std::path::PathBuf;

use abnf_sitter_core::Colors;
use abnf_sitter_lib::{AbnfGrammar, read_source};

use super::{fail, print_diagnostics};

pub struct AstArgs {
    pub grammar_path: PathBuf,
    pub raw: bool,
    pub color: bool,
}

pub fn run(args: AstArgs) {
    let colors = Colors::new(args.color);
    let source = read_source(&args.grammar_path).unwrap_or_else(|e| fail(e, colors));
    let grammar = AbnfGrammar::parse(&source).unwrap_or_else(|e| fail(e, colors));

    // The tree is printed even with errors; error nodes show where recovery happened.
    print_diagnostics(grammar.diagnostics(), &source, &args.grammar_path, args.color);
    print!("{}", grammar.dump_cst(args.raw));

    if !grammar.is_valid() {
        std::process::exit(1);
    }
}
