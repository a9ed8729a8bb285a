//! Grammar type definitions.

use serde::{Deserialize, Serialize};

use crate::utils::rule_key;

/// Complete combinator grammar translated from one ABNF source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    /// Language name (e.g., "uri", "http").
    pub name: String,
    /// Start rule, as spelled in the ABNF source.
    pub start: String,
    /// Whether the RFC 5234 core rules were requested.
    pub include_core_rules: bool,
    /// Translated rules, preserving definition order.
    pub rules: Vec<GrammarRule>,
    /// Core rules not shadowed by a grammar definition.
    #[serde(default)]
    pub core_rules: Vec<GrammarRule>,
    /// Expected conflicts.
    #[serde(default)]
    pub conflicts: Vec<Vec<String>>,
}

impl Grammar {
    /// Translated rules followed by core rules, in emission order.
    pub fn all_rules(&self) -> impl Iterator<Item = &GrammarRule> {
        self.rules.iter().chain(self.core_rules.iter())
    }

    /// Look up a rule the way ABNF compares names.
    ///
    /// Accepts the source spelling as well as the emitted one
    /// (`foo-bar`, `FOO_BAR` and `_foo_bar` all find `foo-bar`).
    pub fn find_rule(&self, name: &str) -> Option<&GrammarRule> {
        let key = rule_key(name);
        self.all_rules().find(|rule| rule_key(&rule.name) == key)
    }
}

/// A named production with its emission policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarRule {
    pub name: String,
    pub body: Rule,
    /// Emitted with the invisible-rule marker.
    #[serde(default)]
    pub hidden: bool,
    /// Never emitted as a named rule; substituted at each reference.
    #[serde(default)]
    pub inline: bool,
}

impl GrammarRule {
    pub fn new(name: impl Into<String>, body: Rule) -> Self {
        Self {
            name: name.into(),
            body,
            hidden: false,
            inline: false,
        }
    }
}

/// Combinator variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rule {
    /// Reference to another rule, by source name.
    Symbol(String),
    /// Literal token, stored unescaped.
    String(String),
    /// Inclusive codepoint range.
    CharClass { low: u32, high: u32 },
    /// Sequence of rules (must match in order).
    Seq(Vec<Rule>),
    /// Alternation.
    Choice(Vec<Rule>),
    /// Zero or more repetitions.
    Repeat(Box<Rule>),
    /// One or more repetitions.
    Repeat1(Box<Rule>),
    /// Zero or one occurrence.
    Optional(Box<Rule>),
}

impl Rule {
    pub fn symbol(name: impl Into<String>) -> Self {
        Rule::Symbol(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Rule::String(value.into())
    }

    pub fn char_class(low: u32, high: u32) -> Self {
        debug_assert!(low <= high, "char class {low:#x}-{high:#x} is inverted");
        Rule::CharClass { low, high }
    }

    /// Sequence that collapses to its member when there is only one.
    pub fn seq(mut members: Vec<Rule>) -> Self {
        if members.len() == 1 {
            return members.pop().expect("length checked");
        }
        Rule::Seq(members)
    }

    /// Choice that collapses to its member when there is only one.
    pub fn choice(mut members: Vec<Rule>) -> Self {
        if members.len() == 1 {
            return members.pop().expect("length checked");
        }
        Rule::Choice(members)
    }

    pub fn repeat(content: Rule) -> Self {
        Rule::Repeat(Box::new(content))
    }

    pub fn repeat1(content: Rule) -> Self {
        Rule::Repeat1(Box::new(content))
    }

    pub fn optional(content: Rule) -> Self {
        Rule::Optional(Box::new(content))
    }

    /// Number of nodes in this expression tree.
    pub fn node_count(&self) -> usize {
        match self {
            Rule::Symbol(_) | Rule::String(_) | Rule::CharClass { .. } => 1,
            Rule::Seq(members) | Rule::Choice(members) => {
                1 + members.iter().map(Rule::node_count).sum::<usize>()
            }
            Rule::Repeat(content) | Rule::Repeat1(content) | Rule::Optional(content) => {
                1 + content.node_count()
            }
        }
    }

    /// Calls `f` for every `Symbol` in this expression, depth-first.
    pub fn for_each_symbol<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Rule::Symbol(name) => f(name),
            Rule::String(_) | Rule::CharClass { .. } => {}
            Rule::Seq(members) | Rule::Choice(members) => {
                for member in members {
                    member.for_each_symbol(f);
                }
            }
            Rule::Repeat(content) | Rule::Repeat1(content) | Rule::Optional(content) => {
                content.for_each_symbol(f)
            }
        }
    }
}
