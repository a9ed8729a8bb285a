//! Generator diagnostic classification.
//!
//! The generator reports failures as prose. Only the sentences below are
//! understood; anything else is `Unrecognized` and surfaced verbatim.

use std::fmt;
use std::sync::LazyLock;

use regex_automata::meta::Regex;
use regex_automata::util::captures::Captures;

/// A classified generator failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorDiagnostic {
    /// "The rule `x` matches the empty string." Fixed by inlining `x`.
    EmptyRuleMatch(String),
    /// "Add a conflict for these rules: `a`, `b`". Fixed by declaring the group.
    MissingConflictDeclaration(Vec<String>),
    /// "Specify a higher precedence in `x` ...". Needs a human.
    NeedsPrecedence(String),
    /// "Specify a left or right associativity in `x`". Needs a human.
    NeedsAssociativity(String),
    Unrecognized,
}

impl fmt::Display for GeneratorDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorDiagnostic::EmptyRuleMatch(rule) => {
                write!(f, "rule `{rule}` matches the empty string")
            }
            GeneratorDiagnostic::MissingConflictDeclaration(rules) => {
                write!(f, "rules need a conflict declaration: {}", quoted(rules))
            }
            GeneratorDiagnostic::NeedsPrecedence(rule) => {
                write!(f, "rule `{rule}` needs a precedence")
            }
            GeneratorDiagnostic::NeedsAssociativity(rule) => {
                write!(f, "rule `{rule}` needs an associativity")
            }
            GeneratorDiagnostic::Unrecognized => write!(f, "unrecognized generator failure"),
        }
    }
}

static EMPTY_RULE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)the rule `([^`]+)` matches the empty string"));
static CONFLICT: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)add a conflict for these rules: (.+)"));
static PRECEDENCE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)specify a higher precedence (?:in|for) `([^`]+)`"));
static ASSOCIATIVITY: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?i)specify (?:a left or right )?associativity (?:in|for) `([^`]+)`")
});
static BACKTICKED: LazyLock<Regex> = LazyLock::new(|| pattern(r"`([^`]+)`"));

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("diagnostic patterns are valid")
}

/// Classify raw generator error output.
///
/// Patterns are tried in order: empty-string match, missing conflict,
/// precedence, associativity. The generator lists every possible resolution
/// for a conflict, so the fixable one wins when several are offered.
pub fn classify(text: &str) -> GeneratorDiagnostic {
    if let Some(rule) = first_group(&EMPTY_RULE, text) {
        return GeneratorDiagnostic::EmptyRuleMatch(rule.to_string());
    }
    if let Some(list) = first_group(&CONFLICT, text) {
        let rules = backticked(list);
        if !rules.is_empty() {
            return GeneratorDiagnostic::MissingConflictDeclaration(rules);
        }
    }
    if let Some(rule) = first_group(&PRECEDENCE, text) {
        return GeneratorDiagnostic::NeedsPrecedence(rule.to_string());
    }
    if let Some(rule) = first_group(&ASSOCIATIVITY, text) {
        return GeneratorDiagnostic::NeedsAssociativity(rule.to_string());
    }
    GeneratorDiagnostic::Unrecognized
}

fn first_group<'t>(regex: &Regex, text: &'t str) -> Option<&'t str> {
    let mut caps = regex.create_captures();
    regex.captures(text, &mut caps);
    group(&caps, text)
}

fn group<'t>(caps: &Captures, text: &'t str) -> Option<&'t str> {
    let span = caps.get_group(1)?;
    Some(&text[span.start..span.end])
}

/// Backticked names in order of appearance, without duplicates.
fn backticked(list: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in BACKTICKED.captures_iter(list) {
        if let Some(name) = group(&caps, list)
            && !names.iter().any(|seen| seen == name)
        {
            names.push(name.to_string());
        }
    }
    names
}

fn quoted(rules: &[String]) -> String {
    rules
        .iter()
        .map(|rule| format!("`{rule}`"))
        .collect::<Vec<_>>()
        .join(", ")
}
