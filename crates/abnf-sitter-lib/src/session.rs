//! Per-grammar generation session.
//!
//! A `Session` is an immutable value: every automatic fix produces a new
//! session, and comparing the two tells the controller whether the fix
//! changed anything.

use std::path::{Path, PathBuf};

use abnf_sitter_core::utils::rule_key;
use indexmap::IndexSet;

/// Policy and location for one grammar.
///
/// Rule names in the inline, hidden and conflict sets are stored by key
/// (see [`rule_key`]), so `Foo-Bar`, `foo_bar` and `_foo_bar` are one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    location: PathBuf,
    name: String,
    start: String,
    core_rules: bool,
    inline: IndexSet<String>,
    hidden: IndexSet<String>,
    conflicts: IndexSet<Vec<String>>,
}

impl Session {
    pub fn new(
        location: impl Into<PathBuf>,
        name: impl Into<String>,
        start: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            name: name.into(),
            start: start.into(),
            core_rules: false,
            inline: IndexSet::new(),
            hidden: IndexSet::new(),
            conflicts: IndexSet::new(),
        }
    }

    pub fn with_core_rules(mut self, value: bool) -> Self {
        self.core_rules = value;
        self
    }

    pub fn with_hidden<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.hidden
            .extend(names.into_iter().map(|n| rule_key(n.as_ref())));
        self
    }

    pub fn with_inline<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.inline
            .extend(names.into_iter().map(|n| rule_key(n.as_ref())));
        self
    }

    pub fn with_conflicts<I, G, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for group in groups {
            self.conflicts.insert(conflict_key(group));
        }
        self
    }

    /// Session with one more inline rule. Equal to `self` if already inlined.
    pub fn with_inline_rule(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.inline.insert(rule_key(name));
        next
    }

    /// Session with one more conflict group. Equal to `self` if already declared.
    pub fn with_conflict<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let mut next = self.clone();
        next.conflicts.insert(conflict_key(names));
        next
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn core_rules(&self) -> bool {
        self.core_rules
    }

    pub fn is_inline(&self, name: &str) -> bool {
        self.inline.contains(&rule_key(name))
    }

    pub fn is_hidden(&self, name: &str) -> bool {
        self.hidden.contains(&rule_key(name))
    }

    pub fn inline_rules(&self) -> impl Iterator<Item = &str> {
        self.inline.iter().map(String::as_str)
    }

    pub fn hidden_rules(&self) -> impl Iterator<Item = &str> {
        self.hidden.iter().map(String::as_str)
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &[String]> {
        self.conflicts.iter().map(Vec::as_slice)
    }
}

/// Groups are sets: keyed, sorted and deduplicated so `[b, a]` equals `[a, b]`.
fn conflict_key<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut group: Vec<String> = names.into_iter().map(|n| rule_key(n.as_ref())).collect();
    group.sort();
    group.dedup();
    group
}
