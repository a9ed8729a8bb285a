//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::{Arg, ArgGroup, Command};

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("abnf-sitter")
        .about("Translate ABNF grammars into tree-sitter grammars")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(ast_command())
        .subcommand(translate_command())
        .subcommand(generate_command())
}

/// Grammar policy flags shared by translate and generate.
fn with_policy_args(cmd: Command) -> Command {
    cmd.args(policy_args())
}

fn policy_args() -> [Arg; 5] {
    [
        name_arg(),
        core_rules_arg(),
        hidden_arg(),
        inline_arg(),
        conflict_arg(),
    ]
}

/// Show the concrete syntax tree of an ABNF file.
pub fn ast_command() -> Command {
    Command::new("ast")
        .about("Show the syntax tree of an ABNF grammar")
        .after_help(
            r#"EXAMPLES:
  abnf-sitter ast uri.abnf          # syntax tree
  abnf-sitter ast uri.abnf --raw    # with whitespace, comments and spans"#,
        )
        .arg(grammar_path_arg().required(true))
        .arg(raw_arg())
        .arg(color_arg())
}

/// Translate an ABNF file into a generator descriptor.
pub fn translate_command() -> Command {
    let cmd = Command::new("translate")
        .about("Translate an ABNF grammar into a tree-sitter grammar")
        .after_help(
            r#"EXAMPLES:
  abnf-sitter translate uri.abnf --start URI-reference --core-rules
  abnf-sitter translate uri.abnf --start URI --inline h16,ls32 -o grammar.js
  abnf-sitter translate uri.abnf --start URI --format json"#,
        )
        .arg(grammar_path_arg().required(true))
        .arg(start_arg().required(true))
        .arg(format_arg(true))
        .arg(output_file_arg())
        .arg(color_arg());
    with_policy_args(cmd)
}

/// Translate and run the generator until it accepts the grammar.
pub fn generate_command() -> Command {
    let cmd = Command::new("generate")
        .about("Translate and run tree-sitter generate, fixing what it reports")
        .override_usage(
            "\
  abnf-sitter generate <FILE> --start <RULE> --dir <DIR> [OPTIONS]
  abnf-sitter generate --config <FILE> [OPTIONS]",
        )
        .after_help(
            r#"EXAMPLES:
  abnf-sitter generate uri.abnf --start URI --dir tree-sitter-uri --core-rules
  abnf-sitter generate --config abnf-sitter.json
  abnf-sitter generate --config abnf-sitter.json --generator 'npx tree-sitter generate'"#,
        )
        .arg(grammar_path_arg())
        .arg(config_arg())
        .group(
            ArgGroup::new("input")
                .args(["grammar_path", "config"])
                .required(true),
        )
        .arg(
            start_arg()
                .required_unless_present("config")
                .conflicts_with("config"),
        )
        .arg(
            dir_arg()
                .required_unless_present("config")
                .conflicts_with("config"),
        )
        .arg(format_arg(false))
        .arg(generator_arg())
        .arg(max_attempts_arg())
        .arg(color_arg());

    // Policy comes from the configuration file when one is given.
    cmd.args(policy_args().map(|arg| arg.conflicts_with("config")))
}
