//! Concrete syntax tree to combinator grammar.

use std::collections::HashMap;

use abnf_sitter_core::utils::{rule_key, same_rule};
use abnf_sitter_core::{CORE_RULE_NAMES, Grammar, GrammarRule, Rule, core_rules};
use rowan::TextRange;

use super::repetition::{RepeatBounds, RepeatError};
use super::values::{ValueError, decode_char_val, decode_num_val};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::{
    Alternation, Concatenation, Element, ElementValue, NumVal, Repetition, Root, SyntaxNode,
};
use crate::session::Session;
use crate::{Error, PassResult, Result};

/// Name of the generated rule that forwards to the session's start rule.
pub const START_RULE: &str = "source_file";

/// Translate a parsed grammar under the policy of `session`.
///
/// Unsupported constructs are dropped with a diagnostic; only a tree that
/// breaks the parser's shape guarantees is fatal.
pub fn translate(root: &Root, session: &Session) -> PassResult<Grammar> {
    let mut translator = Translator::new(session);
    for rule in root.rules() {
        translator.translate_rule(&rule)?;
    }
    Ok(translator.finish())
}

struct Translator<'s> {
    session: &'s Session,
    diagnostics: Diagnostics,
    rules: Vec<GrammarRule>,
    /// Rule key to the range of its first definition.
    defined: HashMap<String, TextRange>,
    /// Every reference site, in source order.
    references: Vec<(String, TextRange)>,
}

impl<'s> Translator<'s> {
    fn new(session: &'s Session) -> Self {
        Self {
            session,
            diagnostics: Diagnostics::new(),
            rules: Vec::new(),
            defined: HashMap::new(),
            references: Vec::new(),
        }
    }

    fn translate_rule(&mut self, rule: &crate::parser::Rule) -> Result<()> {
        let cst = rule.as_cst();
        let name = rule
            .name()
            .ok_or_else(|| structural(cst, "rule has no name"))?;
        let name = name.text().to_string();
        let key = rule_key(&name);

        if key == START_RULE {
            return Err(Error::StructuralViolation(format!(
                "`{name}` collides with the generated start rule"
            )));
        }

        let defined_as = rule
            .defined_as()
            .ok_or_else(|| structural(cst, "rule has no `=`"))?;
        if defined_as.is_incremental() {
            self.unsupported(DiagnosticKind::IncrementalAlternative, cst, "rule");
            return Ok(());
        }

        if let Some(first) = self.defined.get(&key).copied() {
            self.diagnostics
                .report(DiagnosticKind::DuplicateRule, cst.text_range())
                .message(&name)
                .related_to("first defined here", first)
                .emit();
            return Ok(());
        }

        let body = rule
            .body()
            .ok_or_else(|| structural(cst, "rule has no definition"))?;
        self.defined.insert(key, cst.text_range());

        if let Some(body) = self.translate_alternation(&body)? {
            let rule = self.policy(GrammarRule::new(name, body));
            self.rules.push(rule);
        }
        Ok(())
    }

    fn translate_alternation(&mut self, alternation: &Alternation) -> Result<Option<Rule>> {
        let mut members = Vec::new();
        for concatenation in alternation.concatenations() {
            if let Some(member) = self.translate_concatenation(&concatenation)? {
                members.push(member);
            }
        }
        Ok((!members.is_empty()).then(|| Rule::choice(members)))
    }

    fn translate_concatenation(&mut self, concatenation: &Concatenation) -> Result<Option<Rule>> {
        let mut members = Vec::new();
        for repetition in concatenation.repetitions() {
            if let Some(member) = self.translate_repetition(&repetition)? {
                members.push(member);
            }
        }
        Ok((!members.is_empty()).then(|| Rule::seq(members)))
    }

    fn translate_repetition(&mut self, repetition: &Repetition) -> Result<Option<Rule>> {
        let cst = repetition.as_cst();
        let element = repetition
            .element()
            .ok_or_else(|| structural(cst, "repetition has no element"))?;
        let Some(element) = self.translate_element(&element)? else {
            return Ok(None);
        };

        let Some(repeat) = repetition.repeat() else {
            return Ok(Some(element));
        };

        let lower = repeat.lower();
        let upper = repeat.upper();
        let expanded = RepeatBounds::parse(
            lower.as_ref().map(|t| t.text()),
            repeat.star().is_some(),
            upper.as_ref().map(|t| t.text()),
        )
        .and_then(|bounds| bounds.expand(element));

        match expanded {
            Ok(rule) => Ok(Some(rule)),
            Err(RepeatError::Empty) => {
                self.unsupported(DiagnosticKind::EmptyRepetition, cst, "repetition");
                Ok(None)
            }
            Err(err) => {
                self.diagnostics
                    .report(DiagnosticKind::InvalidRepeatBounds, cst.text_range())
                    .message(format!("{}; {err}", construct(cst, "repetition")))
                    .emit();
                Ok(None)
            }
        }
    }

    fn translate_element(&mut self, element: &Element) -> Result<Option<Rule>> {
        let cst = element.as_cst();
        let value = element
            .value()
            .ok_or_else(|| structural(cst, "element is empty"))?;

        match value {
            ElementValue::RuleName(token) => {
                let name = token.text().to_string();
                self.references.push((name.clone(), token.text_range()));
                Ok(Some(Rule::symbol(name)))
            }
            ElementValue::Group(group) => {
                let body = group
                    .body()
                    .ok_or_else(|| structural(group.as_cst(), "group is empty"))?;
                self.translate_alternation(&body)
            }
            ElementValue::Opt(opt) => {
                let mut bodies = opt.bodies();
                let (Some(body), None) = (bodies.next(), bodies.next()) else {
                    return Err(structural(
                        opt.as_cst(),
                        "option must hold exactly one alternation",
                    ));
                };
                Ok(self.translate_alternation(&body)?.map(Rule::optional))
            }
            ElementValue::CharVal(char_val) => {
                let content = char_val.value();
                let decoded = decode_char_val(content.as_ref().map(|t| t.text()));
                Ok(self.value_or_report(decoded, char_val.as_cst(), "char-val"))
            }
            ElementValue::NumVal(num_val) => {
                let decoded = decode_num_val(&num_val_text(&num_val));
                Ok(self.value_or_report(decoded, num_val.as_cst(), "num-val"))
            }
            ElementValue::ProseVal(prose) => {
                self.unsupported(DiagnosticKind::ProseValue, prose.as_cst(), "prose-val");
                Ok(None)
            }
        }
    }

    fn value_or_report(
        &mut self,
        decoded: std::result::Result<Rule, ValueError>,
        node: &SyntaxNode,
        label: &str,
    ) -> Option<Rule> {
        let err = match decoded {
            Ok(rule) => return Some(rule),
            Err(err) => err,
        };
        let kind = match err {
            ValueError::UnsupportedBase(_) => DiagnosticKind::UnsupportedNumericBase,
            ValueError::Overlong(_) => DiagnosticKind::OverlongNumericValue,
            ValueError::Malformed => DiagnosticKind::MalformedNumericValue,
            ValueError::InvalidCodepoint(_) => DiagnosticKind::InvalidCodepoint,
            ValueError::EmptyLiteral => DiagnosticKind::EmptyLiteral,
        };
        self.unsupported(kind, node, label);
        None
    }

    fn unsupported(&mut self, kind: DiagnosticKind, node: &SyntaxNode, label: &str) {
        self.diagnostics
            .report(kind, node.text_range())
            .message(construct(node, label))
            .emit();
    }

    fn policy(&self, mut rule: GrammarRule) -> GrammarRule {
        rule.hidden = self.session.is_hidden(&rule.name);
        rule.inline = self.session.is_inline(&rule.name);
        rule
    }

    fn finish(mut self) -> (Grammar, Diagnostics) {
        let core_rules: Vec<GrammarRule> = if self.session.core_rules() {
            core_rules()
                .into_iter()
                .filter(|rule| !self.defined.contains_key(&rule_key(&rule.name)))
                .map(|rule| self.policy(rule))
                .collect()
        } else {
            Vec::new()
        };

        self.report_undefined();

        let conflicts = self
            .session
            .conflicts()
            .map(|group| group.iter().map(|key| self.spelling(key)).collect())
            .collect();

        let grammar = Grammar {
            name: self.session.name().to_string(),
            start: self.spelling(self.session.start()),
            include_core_rules: self.session.core_rules(),
            rules: self.rules,
            core_rules,
            conflicts,
        };
        (grammar, self.diagnostics)
    }

    /// One warning per undefined name, at its first reference.
    fn report_undefined(&mut self) {
        let mut reported: Vec<String> = Vec::new();
        for (name, range) in &self.references {
            let key = rule_key(name);
            let is_core = self.session.core_rules()
                && CORE_RULE_NAMES.iter().any(|core| same_rule(core, name));
            if self.defined.contains_key(&key) || is_core || reported.contains(&key) {
                continue;
            }
            self.diagnostics
                .report(DiagnosticKind::UndefinedReference, *range)
                .message(name)
                .emit();
            reported.push(key);
        }
    }

    /// Definition spelling for a name, or the name itself when undefined.
    fn spelling(&self, name: &str) -> String {
        if let Some(rule) = self.rules.iter().find(|rule| same_rule(&rule.name, name)) {
            return rule.name.clone();
        }
        if self.session.core_rules()
            && let Some(core) = CORE_RULE_NAMES.iter().find(|core| same_rule(core, name))
        {
            return core.to_string();
        }
        name.to_string()
    }
}

/// "`%d65` (num-val)": the offending text and what kind of construct it is.
fn construct(node: &SyntaxNode, label: &str) -> String {
    format!("`{}` ({label})", node.text().to_string().trim())
}

fn num_val_text(num_val: &NumVal) -> String {
    let base = num_val.base().map(|t| t.text().to_string()).unwrap_or_default();
    num_val
        .parts()
        .fold(base, |mut text, part| {
            text.push_str(part.text());
            text
        })
}

fn structural(node: &SyntaxNode, what: &str) -> Error {
    let range = node.text_range();
    Error::StructuralViolation(format!(
        "{what} at {}..{}",
        u32::from(range.start()),
        u32::from(range.end())
    ))
}
