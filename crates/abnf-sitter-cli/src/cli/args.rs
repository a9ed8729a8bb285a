//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// ABNF grammar file (positional).
pub fn grammar_path_arg() -> Arg {
    Arg::new("grammar_path")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("ABNF grammar file")
}

/// Start rule (--start).
pub fn start_arg() -> Arg {
    Arg::new("start")
        .long("start")
        .value_name("RULE")
        .help("Rule the generated start rule forwards to")
}

/// Language name (--name).
pub fn name_arg() -> Arg {
    Arg::new("name")
        .long("name")
        .value_name("NAME")
        .help("Language name (default: grammar file stem)")
}

/// Append RFC 5234 core rules (--core-rules).
pub fn core_rules_arg() -> Arg {
    Arg::new("core_rules")
        .long("core-rules")
        .action(ArgAction::SetTrue)
        .help("Include the RFC 5234 Appendix B core rules")
}

/// Hidden rules (--hidden a,b).
pub fn hidden_arg() -> Arg {
    Arg::new("hidden")
        .long("hidden")
        .value_name("RULES")
        .value_delimiter(',')
        .action(ArgAction::Append)
        .help("Rules to hide from the syntax tree (comma-separated)")
}

/// Inline rules (--inline a,b).
pub fn inline_arg() -> Arg {
    Arg::new("inline")
        .long("inline")
        .value_name("RULES")
        .value_delimiter(',')
        .action(ArgAction::Append)
        .help("Rules to substitute at every use (comma-separated)")
}

/// Conflict group (--conflict a,b), repeatable.
pub fn conflict_arg() -> Arg {
    Arg::new("conflict")
        .long("conflict")
        .value_name("RULES")
        .action(ArgAction::Append)
        .help("Conflict group (comma-separated, repeatable)")
}

/// Descriptor format (--format).
pub fn format_arg(with_descriptor: bool) -> Arg {
    let formats: &[&'static str] = if with_descriptor {
        &["js", "json", "descriptor"]
    } else {
        &["js", "json"]
    };
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .value_parser(formats.to_vec())
        .help("Descriptor format")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file")
}

/// Directory the descriptor is written to (--dir).
pub fn dir_arg() -> Arg {
    Arg::new("dir")
        .long("dir")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .help("Grammar directory; the generator runs here")
}

/// Configuration file (--config).
pub fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("JSON configuration listing grammars to generate")
}

/// Generator command (--generator).
pub fn generator_arg() -> Arg {
    Arg::new("generator")
        .long("generator")
        .value_name("CMD")
        .help("Generator command, split on whitespace (default: tree-sitter generate)")
}

/// Attempt cap (--max-attempts).
pub fn max_attempts_arg() -> Arg {
    Arg::new("max_attempts")
        .long("max-attempts")
        .value_name("N")
        .value_parser(value_parser!(u32).range(1..))
        .help("Stop after this many generator runs")
}

/// Include trivia and spans (--raw).
pub fn raw_arg() -> Arg {
    Arg::new("raw")
        .long("raw")
        .action(ArgAction::SetTrue)
        .help("Include trivia tokens (whitespace, comments) and spans")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}
