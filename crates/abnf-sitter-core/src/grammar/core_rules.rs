//! RFC 5234 Appendix B core rules.
//!
//! Only the rules a byte-oriented ABNF grammar commonly leans on are provided.
//! `CHAR`, `CTL`, `LWSP` and `OCTET` are left out: they either match control
//! bytes tree-sitter cannot lex or, like `LWSP`, match the empty string.

use super::types::{GrammarRule, Rule};

/// Core rule names, in emission order.
pub const CORE_RULE_NAMES: [&str; 12] = [
    "ALPHA", "BIT", "DIGIT", "CR", "CRLF", "DQUOTE", "HEXDIG", "HTAB", "LF", "SP", "VCHAR", "WSP",
];

/// Build the fixed core rule block.
pub fn core_rules() -> Vec<GrammarRule> {
    CORE_RULE_NAMES
        .iter()
        .map(|&name| GrammarRule::new(name, core_rule_body(name)))
        .collect()
}

fn core_rule_body(name: &str) -> Rule {
    match name {
        // %x41-5A / %x61-7A
        "ALPHA" => Rule::Choice(vec![
            Rule::char_class(0x41, 0x5A),
            Rule::char_class(0x61, 0x7A),
        ]),
        "BIT" => Rule::Choice(vec![Rule::string("0"), Rule::string("1")]),
        "DIGIT" => Rule::char_class(0x30, 0x39),
        "CR" => Rule::string("\r"),
        "CRLF" => Rule::Seq(vec![Rule::symbol("CR"), Rule::symbol("LF")]),
        "DQUOTE" => Rule::string("\""),
        // RFC 5234 lists only upper case; lower case is accepted too.
        "HEXDIG" => Rule::Choice(vec![
            Rule::symbol("DIGIT"),
            Rule::char_class(0x41, 0x46),
            Rule::char_class(0x61, 0x66),
        ]),
        "HTAB" => Rule::string("\t"),
        "LF" => Rule::string("\n"),
        "SP" => Rule::string(" "),
        "VCHAR" => Rule::char_class(0x21, 0x7E),
        "WSP" => Rule::Choice(vec![Rule::symbol("SP"), Rule::symbol("HTAB")]),
        _ => unreachable!("`{name}` is not a core rule"),
    }
}
