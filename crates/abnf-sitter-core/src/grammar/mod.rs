//! Grammar types for combinator grammars.
//!
//! This module provides the intermediate representation an ABNF grammar is
//! translated into, plus the fixed RFC 5234 Appendix B core rules.

mod core_rules;
mod types;


pub use core_rules::{CORE_RULE_NAMES, core_rules};
pub use types::{Grammar, GrammarRule, Rule};
