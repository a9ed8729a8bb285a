//! Serialization of a translated grammar into generator input.
//!
//! Every format goes through the same validation and name resolution, so
//! normalization, hidden markers and inline substitution are identical across
//! `grammar.js` and `grammar.json`.

mod javascript;
mod json;
mod names;


use std::collections::HashSet;

use abnf_sitter_core::utils::rule_key;
use abnf_sitter_core::Grammar;
use serde::{Deserialize, Serialize};

use crate::translate::START_RULE;
use crate::{Error, Result};
use names::{Names, emitted_name};

/// Descriptor file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `grammar.js` with inline rules as standalone functions.
    #[default]
    #[serde(rename = "js")]
    JavaScript,
    /// `grammar.json` in the generator's JSON schema, inline rules expanded.
    Json,
    /// The intermediate grammar itself, for debugging.
    Descriptor,
}

impl OutputFormat {
    /// File the generator reads. Descriptor dumps are not generator input.
    pub fn file_name(self) -> &'static str {
        match self {
            OutputFormat::JavaScript => "grammar.js",
            OutputFormat::Json => "grammar.json",
            OutputFormat::Descriptor => "grammar.descriptor.json",
        }
    }

    pub fn from_name(text: &str) -> Option<Self> {
        match text {
            "js" => Some(OutputFormat::JavaScript),
            "json" => Some(OutputFormat::Json),
            "descriptor" => Some(OutputFormat::Descriptor),
            _ => None,
        }
    }
}

/// Validate `grammar` and serialize it in `format`.
pub fn assemble(grammar: &Grammar, format: OutputFormat) -> Result<String> {
    validate(grammar)?;
    let names = Names::new(grammar);
    match format {
        OutputFormat::JavaScript => Ok(javascript::render(grammar, &names)),
        OutputFormat::Json => json::render(grammar, &names),
        OutputFormat::Descriptor => Ok(serde_json::to_string_pretty(grammar)?),
    }
}

/// Checks every serializer relies on.
///
/// - the start rule exists
/// - no rule takes the generated start rule's name
/// - every conflict group member names a rule
/// - inline rules do not reference each other in a cycle
pub fn validate(grammar: &Grammar) -> Result<()> {
    let names = Names::new(grammar);

    if names.resolve(&grammar.start).is_none() {
        return Err(Error::StructuralViolation(format!(
            "start rule `{}` is not defined",
            grammar.start
        )));
    }

    if let Some(rule) = grammar
        .all_rules()
        .find(|rule| rule_key(&rule.name) == START_RULE)
    {
        return Err(Error::StructuralViolation(format!(
            "`{}` collides with the generated start rule",
            rule.name
        )));
    }

    for group in &grammar.conflicts {
        if let Some(unknown) = group.iter().find(|name| names.resolve(name).is_none()) {
            return Err(Error::StructuralViolation(format!(
                "conflict group names undefined rule `{unknown}`"
            )));
        }
    }

    check_inline_cycles(grammar, &names)
}

/// Conflict groups as emitted: inline members dropped, groups under two members omitted.
pub(crate) fn emitted_conflicts(grammar: &Grammar, names: &Names<'_>) -> Vec<Vec<String>> {
    let mut groups: Vec<Vec<String>> = Vec::new();
    for group in &grammar.conflicts {
        let mut members: Vec<String> = Vec::new();
        for rule in group.iter().filter_map(|name| names.resolve(name)) {
            let name = emitted_name(rule);
            if !rule.inline && !members.contains(&name) {
                members.push(name);
            }
        }
        if members.len() >= 2 && !groups.contains(&members) {
            groups.push(members);
        }
    }
    groups
}

fn check_inline_cycles(grammar: &Grammar, names: &Names<'_>) -> Result<()> {
    let mut done: HashSet<String> = HashSet::new();
    for rule in grammar.all_rules().filter(|rule| rule.inline) {
        let mut path: Vec<String> = Vec::new();
        visit_inline(&rule.name, names, &mut path, &mut done)?;
    }
    Ok(())
}

fn visit_inline(
    name: &str,
    names: &Names<'_>,
    path: &mut Vec<String>,
    done: &mut HashSet<String>,
) -> Result<()> {
    let Some(rule) = names.resolve(name).filter(|rule| rule.inline) else {
        return Ok(());
    };
    let key = rule_key(&rule.name);
    if done.contains(&key) {
        return Ok(());
    }
    if let Some(pos) = path.iter().position(|seen| rule_key(seen) == key) {
        let mut cycle = path[pos..].to_vec();
        cycle.push(rule.name.clone());
        return Err(Error::InlineCycle(cycle));
    }

    path.push(rule.name.clone());
    let mut referenced: Vec<&str> = Vec::new();
    rule.body.for_each_symbol(&mut |symbol| referenced.push(symbol));
    for symbol in referenced {
        visit_inline(symbol, names, path, done)?;
    }
    path.pop();
    done.insert(key);
    Ok(())
}
