use indoc::indoc;

use super::{GeneratorDiagnostic, classify};

#[test]
fn empty_rule_match() {
    let text = indoc! {"
        Error: The rule `foo` matches the empty string.

        Tree-sitter does not support syntactic rules that match the empty string
        unless they are used only as the grammar's start rule.
    "};
    assert_eq!(classify(text), GeneratorDiagnostic::EmptyRuleMatch("foo".into()));
}

#[test]
fn missing_conflict_wins_over_other_resolutions() {
    let text = indoc! {"
        Unresolved conflict for symbol sequence:

          word  •  word  …

        Possible interpretations:

          1:  (list  word)  •  word  …
          2:  (item  word)  •  word  …

        Possible resolutions:

          1:  Specify a higher precedence in `list` than in the other rules.
          2:  Specify a higher precedence in `item` than in the other rules.
          3:  Specify a left or right associativity in `list`
          4:  Add a conflict for these rules: `list`, `item`
    "};
    assert_eq!(
        classify(text),
        GeneratorDiagnostic::MissingConflictDeclaration(vec!["list".into(), "item".into()])
    );
}

#[test]
fn conflict_names_deduplicated() {
    let text = "Add a conflict for these rules: `_a`, `b`, `_a`";
    assert_eq!(
        classify(text),
        GeneratorDiagnostic::MissingConflictDeclaration(vec!["_a".into(), "b".into()])
    );
}

#[test]
fn precedence_only() {
    let text = indoc! {"
        Possible resolutions:

          1:  Specify a higher precedence in `binary` than in the other rules.
          2:  Specify a left or right associativity in `binary`
    "};
    assert_eq!(classify(text), GeneratorDiagnostic::NeedsPrecedence("binary".into()));
}

#[test]
fn associativity_only() {
    let text = "  1:  Specify a left or right associativity in `sum`";
    assert_eq!(classify(text), GeneratorDiagnostic::NeedsAssociativity("sum".into()));

    let text = "specify associativity for `sum`";
    assert_eq!(classify(text), GeneratorDiagnostic::NeedsAssociativity("sum".into()));
}

#[test]
fn unrecognized() {
    assert_eq!(classify(""), GeneratorDiagnostic::Unrecognized);
    assert_eq!(
        classify("Error: Undefined symbol `ghost`"),
        GeneratorDiagnostic::Unrecognized
    );
    // A conflict line without names is not actionable.
    assert_eq!(
        classify("Add a conflict for these rules: ???"),
        GeneratorDiagnostic::Unrecognized
    );
}

#[test]
fn display() {
    let diagnostic = GeneratorDiagnostic::MissingConflictDeclaration(vec!["a".into(), "b".into()]);
    insta::assert_snapshot!(diagnostic.to_string(), @"rules need a conflict declaration: `a`, `b`");
}
