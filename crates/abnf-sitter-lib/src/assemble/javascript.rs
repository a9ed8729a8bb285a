//! `grammar.js` output.

use std::fmt::Write;

use abnf_sitter_core::utils::normalize_rule_name;
use abnf_sitter_core::{Grammar, GrammarRule, Rule};

use super::emitted_conflicts;
use super::names::{Names, Reference, emitted_name, inline_fn_name};
use crate::translate::START_RULE;

const HEADER: &str = "// Generated by abnf-sitter. Do not edit.\n";

pub(super) fn render(grammar: &Grammar, names: &Names<'_>) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');

    let inline_rules: Vec<&GrammarRule> = grammar.all_rules().filter(|r| r.inline).collect();
    for rule in &inline_rules {
        let _ = writeln!(
            out,
            "const {} = $ => {};",
            inline_fn_name(rule),
            expr(&rule.body, names)
        );
    }
    if !inline_rules.is_empty() {
        out.push('\n');
    }

    out.push_str("module.exports = grammar({\n");
    let _ = writeln!(out, "  name: '{}',", normalize_rule_name(&grammar.name));
    out.push('\n');
    out.push_str("  extras: $ => [],\n");

    let conflicts = emitted_conflicts(grammar, names);
    if !conflicts.is_empty() {
        out.push('\n');
        out.push_str("  conflicts: $ => [\n");
        for group in &conflicts {
            let members: Vec<String> = group.iter().map(|name| format!("$.{name}")).collect();
            let _ = writeln!(out, "    [{}],", members.join(", "));
        }
        out.push_str("  ],\n");
    }

    out.push('\n');
    out.push_str("  rules: {\n");
    let _ = writeln!(
        out,
        "    {START_RULE}: $ => {},",
        symbol(&grammar.start, names)
    );

    for rule in grammar.rules.iter().filter(|r| !r.inline) {
        write_rule(&mut out, rule, names);
    }

    if grammar.core_rules.iter().any(|r| !r.inline) {
        out.push('\n');
        out.push_str("    // RFC 5234 Appendix B core rules\n");
        for rule in grammar.core_rules.iter().filter(|r| !r.inline) {
            write_rule(&mut out, rule, names);
        }
    }

    out.push_str("  },\n");
    out.push_str("});\n");
    out
}

fn write_rule(out: &mut String, rule: &GrammarRule, names: &Names<'_>) {
    out.push('\n');
    let _ = writeln!(
        out,
        "    {}: $ => {},",
        emitted_name(rule),
        expr(&rule.body, names)
    );
}

fn expr(rule: &Rule, names: &Names<'_>) -> String {
    match rule {
        Rule::Symbol(name) => symbol(name, names),
        Rule::String(value) => string_literal(value),
        Rule::CharClass { low, high } => char_class(*low, *high),
        Rule::Seq(members) => call("seq", members, names),
        Rule::Choice(members) => call("choice", members, names),
        Rule::Repeat(content) => format!("repeat({})", expr(content, names)),
        Rule::Repeat1(content) => format!("repeat1({})", expr(content, names)),
        Rule::Optional(content) => format!("optional({})", expr(content, names)),
    }
}

fn call(function: &str, members: &[Rule], names: &Names<'_>) -> String {
    let args: Vec<String> = members.iter().map(|m| expr(m, names)).collect();
    format!("{function}({})", args.join(", "))
}

fn symbol(name: &str, names: &Names<'_>) -> String {
    match names.reference(name) {
        Reference::Named(name) => format!("$.{name}"),
        Reference::Inline(rule) => format!("{}($)", inline_fn_name(rule)),
    }
}

/// Single-quoted JavaScript string; everything outside printable ASCII is escaped.
pub(super) fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' '..='~' => out.push(c),
            _ => push_unicode_escape(&mut out, c as u32),
        }
    }
    out.push('\'');
    out
}

/// Regex literal matching one codepoint in `low..=high`.
///
/// Codepoints above U+FFFF need `\u{...}`, which JavaScript only reads as an
/// escape under the `u` flag.
pub(super) fn char_class(low: u32, high: u32) -> String {
    let mut out = String::from("/[");
    push_unicode_escape(&mut out, low);
    if high != low {
        out.push('-');
        push_unicode_escape(&mut out, high);
    }
    out.push_str("]/");
    if high > 0xFFFF {
        out.push('u');
    }
    out
}

fn push_unicode_escape(out: &mut String, codepoint: u32) {
    if codepoint <= 0xFFFF {
        let _ = write!(out, "\\u{codepoint:04X}");
    } else {
        let _ = write!(out, "\\u{{{codepoint:X}}}");
    }
}
