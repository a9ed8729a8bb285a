//! `grammar.json` output.
//!
//! Tree-sitter's grammar.json uses internally-tagged rules with a `type` field.
//! The JSON schema has no functions, so inline rules are expanded in place.

use abnf_sitter_core::utils::normalize_rule_name;
use abnf_sitter_core::{Grammar, Rule};
use indexmap::IndexMap;
use serde::Serialize;

use super::emitted_conflicts;
use super::names::{Names, Reference, emitted_name};
use crate::Result;
use crate::translate::START_RULE;

/// Raw grammar structure matching tree-sitter's JSON format.
#[derive(Debug, Serialize)]
struct RawGrammar {
    name: String,
    rules: IndexMap<String, RawRule>,
    extras: Vec<RawRule>,
    conflicts: Vec<Vec<String>>,
    precedences: Vec<Vec<RawRule>>,
    externals: Vec<RawRule>,
    inline: Vec<String>,
    supertypes: Vec<String>,
}

/// Raw rule matching tree-sitter's JSON format.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
#[allow(clippy::upper_case_acronyms, non_camel_case_types)]
enum RawRule {
    BLANK,
    STRING { value: String },
    PATTERN { value: String },
    SYMBOL { name: String },
    SEQ { members: Vec<RawRule> },
    CHOICE { members: Vec<RawRule> },
    REPEAT { content: Box<RawRule> },
    REPEAT1 { content: Box<RawRule> },
}

pub(super) fn render(grammar: &Grammar, names: &Names<'_>) -> Result<String> {
    let mut rules = IndexMap::new();
    rules.insert(START_RULE.to_string(), symbol(&grammar.start, names));
    for rule in grammar.all_rules().filter(|r| !r.inline) {
        rules.insert(emitted_name(rule), raw_rule(&rule.body, names));
    }

    let raw = RawGrammar {
        name: normalize_rule_name(&grammar.name),
        rules,
        extras: Vec::new(),
        conflicts: emitted_conflicts(grammar, names),
        precedences: Vec::new(),
        externals: Vec::new(),
        inline: Vec::new(),
        supertypes: Vec::new(),
    };
    let mut json = serde_json::to_string_pretty(&raw)?;
    json.push('\n');
    Ok(json)
}

fn raw_rule(rule: &Rule, names: &Names<'_>) -> RawRule {
    match rule {
        Rule::Symbol(name) => symbol(name, names),
        Rule::String(value) => RawRule::STRING {
            value: value.clone(),
        },
        Rule::CharClass { low, high } => RawRule::PATTERN {
            value: pattern(*low, *high),
        },
        Rule::Seq(members) => RawRule::SEQ {
            members: members.iter().map(|m| raw_rule(m, names)).collect(),
        },
        Rule::Choice(members) => RawRule::CHOICE {
            members: members.iter().map(|m| raw_rule(m, names)).collect(),
        },
        Rule::Repeat(content) => RawRule::REPEAT {
            content: Box::new(raw_rule(content, names)),
        },
        Rule::Repeat1(content) => RawRule::REPEAT1 {
            content: Box::new(raw_rule(content, names)),
        },
        Rule::Optional(content) => RawRule::CHOICE {
            members: vec![raw_rule(content, names), RawRule::BLANK],
        },
    }
}

/// Inline references expand to the rule body; validation rules out cycles.
fn symbol(name: &str, names: &Names<'_>) -> RawRule {
    match names.reference(name) {
        Reference::Named(name) => RawRule::SYMBOL { name },
        Reference::Inline(rule) => raw_rule(&rule.body, names),
    }
}

/// Regex source for one codepoint in `low..=high`.
fn pattern(low: u32, high: u32) -> String {
    let escape = |codepoint: u32| {
        if codepoint <= 0xFFFF {
            format!("\\u{codepoint:04X}")
        } else {
            format!("\\u{{{codepoint:X}}}")
        }
    };
    if low == high {
        format!("[{}]", escape(low))
    } else {
        format!("[{}-{}]", escape(low), escape(high))
    }
}
