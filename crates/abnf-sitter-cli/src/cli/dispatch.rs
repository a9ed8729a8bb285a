//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use abnf_sitter_lib::{GrammarConfig, OutputFormat};
use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::generate::{GenerateArgs, GenerateInput};
use crate::commands::translate::TranslateArgs;

pub struct AstParams {
    pub grammar_path: PathBuf,
    pub raw: bool,
    pub color: ColorChoice,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            raw: m.get_flag("raw"),
            color: parse_color(m),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            raw: p.raw,
            color: p.color.should_colorize(),
        }
    }
}

/// Grammar policy flags.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PolicyParams {
    pub name: Option<String>,
    pub core_rules: bool,
    pub hidden: Vec<String>,
    pub inline: Vec<String>,
    pub conflicts: Vec<Vec<String>>,
}

impl PolicyParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            name: m.get_one::<String>("name").cloned(),
            core_rules: m.get_flag("core_rules"),
            hidden: names(m, "hidden"),
            inline: names(m, "inline"),
            conflicts: m
                .get_many::<String>("conflict")
                .map(|groups| groups.map(|group| split_names(group)).collect())
                .unwrap_or_default(),
        }
    }

    fn into_config(self, source: PathBuf, location: PathBuf, start: &str) -> GrammarConfig {
        GrammarConfig {
            name: self.name,
            core_rules: self.core_rules,
            hidden: self.hidden,
            inline: self.inline,
            conflicts: self.conflicts,
            ..GrammarConfig::new(source, location, start)
        }
    }
}

pub struct TranslateParams {
    pub grammar_path: PathBuf,
    pub start: String,
    pub policy: PolicyParams,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub color: ColorChoice,
}

impl TranslateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            start: m.get_one::<String>("start").cloned().unwrap_or_default(),
            policy: PolicyParams::from_matches(m),
            format: parse_format(m).unwrap_or_default(),
            output: m.get_one::<PathBuf>("output").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<TranslateParams> for TranslateArgs {
    fn from(p: TranslateParams) -> Self {
        let location = p
            .output
            .as_ref()
            .and_then(|path| path.parent())
            .map(PathBuf::from)
            .unwrap_or_default();
        Self {
            grammar: p.policy.into_config(p.grammar_path, location, &p.start),
            format: p.format,
            output: p.output,
            color: p.color.should_colorize(),
        }
    }
}

pub struct GenerateParams {
    pub grammar_path: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub start: Option<String>,
    pub dir: Option<PathBuf>,
    pub policy: PolicyParams,
    pub format: Option<OutputFormat>,
    pub generator: Option<Vec<String>>,
    pub max_attempts: Option<usize>,
    pub color: ColorChoice,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.get_one::<PathBuf>("grammar_path").cloned(),
            config: m.get_one::<PathBuf>("config").cloned(),
            start: m.get_one::<String>("start").cloned(),
            dir: m.get_one::<PathBuf>("dir").cloned(),
            policy: PolicyParams::from_matches(m),
            format: parse_format(m),
            generator: m
                .get_one::<String>("generator")
                .map(|cmd| cmd.split_whitespace().map(str::to_string).collect()),
            max_attempts: m.get_one::<u32>("max_attempts").map(|&n| n as usize),
            color: parse_color(m),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        // clap guarantees either a config file or a grammar with --start and --dir.
        let input = match (p.config, p.grammar_path) {
            (Some(config), _) => GenerateInput::Config(config),
            (None, grammar_path) => GenerateInput::Grammar(p.policy.into_config(
                grammar_path.unwrap_or_default(),
                p.dir.unwrap_or_default(),
                p.start.as_deref().unwrap_or_default(),
            )),
        };
        Self {
            input,
            format: p.format,
            generator: p.generator,
            max_attempts: p.max_attempts,
            color: p.color.should_colorize(),
        }
    }
}

fn grammar_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("grammar_path")
        .cloned()
        .unwrap_or_default()
}

fn names(m: &ArgMatches, id: &str) -> Vec<String> {
    m.get_many::<String>(id)
        .map(|values| {
            values
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn split_names(group: &str) -> Vec<String> {
    group
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_format(m: &ArgMatches) -> Option<OutputFormat> {
    m.get_one::<String>("format")
        .and_then(|name| OutputFormat::from_name(name))
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
