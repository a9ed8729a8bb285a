#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for abnf-sitter.
//!
//! Two layers:
//! - **Expression layer**: [`Rule`], the combinator vocabulary shared by every
//!   output format (sequence, choice, optional, repeat, repeat1, reference,
//!   literal, char-class)
//! - **Descriptor layer**: [`Grammar`] and [`GrammarRule`], an ordered rule set
//!   with hidden/inline policy flags, a start rule and conflict groups
//!
//! Everything here is plain data. Translation from ABNF and serialization into
//! generator input live in `abnf-sitter-lib`.

pub mod colors;
pub mod grammar;
pub mod utils;


pub use colors::Colors;
pub use grammar::{CORE_RULE_NAMES, Grammar, GrammarRule, Rule, core_rules};
