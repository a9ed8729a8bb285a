//! Name resolution shared by every output format.
//!
//! References resolve by rule key, and the resolved rule decides how the
//! reference is spelled: hidden rules carry the `_` marker, inline rules are
//! substituted.

use std::collections::HashMap;

use abnf_sitter_core::utils::{normalize_rule_name, rule_key};
use abnf_sitter_core::{Grammar, GrammarRule};

pub(crate) struct Names<'g> {
    by_key: HashMap<String, &'g GrammarRule>,
}

/// How a reference to a name is emitted.
pub(crate) enum Reference<'g> {
    /// Points at a named rule (possibly undefined).
    Named(String),
    /// Substituted by the rule's body.
    Inline(&'g GrammarRule),
}

impl<'g> Names<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        let mut by_key = HashMap::new();
        for rule in grammar.all_rules() {
            by_key.entry(rule_key(&rule.name)).or_insert(rule);
        }
        Self { by_key }
    }

    pub fn resolve(&self, name: &str) -> Option<&'g GrammarRule> {
        self.by_key.get(&rule_key(name)).copied()
    }

    pub fn reference(&self, name: &str) -> Reference<'g> {
        match self.resolve(name) {
            Some(rule) if rule.inline => Reference::Inline(rule),
            Some(rule) => Reference::Named(emitted_name(rule)),
            None => Reference::Named(normalize_rule_name(name)),
        }
    }
}

/// Identifier a rule is defined under: normalized, with the hidden marker if hidden.
pub(crate) fn emitted_name(rule: &GrammarRule) -> String {
    let name = normalize_rule_name(&rule.name);
    if rule.hidden {
        format!("_{name}")
    } else {
        name
    }
}

/// Name of the standalone function an inline rule becomes.
pub(crate) fn inline_fn_name(rule: &GrammarRule) -> String {
    format!("inline_{}", normalize_rule_name(&rule.name))
}
