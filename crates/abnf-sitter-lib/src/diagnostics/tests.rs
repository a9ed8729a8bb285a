use rowan::TextRange;

use super::*;

fn span(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedElement, span(0, 5))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    assert_eq!(
        diagnostics.iter().next().unwrap().message(),
        "expected an element"
    );
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnsupportedNumericBase, span(0, 5))
        .message("`%d65` (num-val)")
        .emit();

    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(
        diag.message(),
        "only hexadecimal values are supported: `%d65` (num-val)"
    );
    assert!(diag.is_warning());
    assert!(!diagnostics.has_errors());
}

#[test]
fn unsupported_constructs_are_warnings() {
    let kinds = [
        DiagnosticKind::IncrementalAlternative,
        DiagnosticKind::UnsupportedNumericBase,
        DiagnosticKind::OverlongNumericValue,
        DiagnosticKind::MalformedNumericValue,
        DiagnosticKind::InvalidCodepoint,
        DiagnosticKind::ProseValue,
        DiagnosticKind::EmptyLiteral,
        DiagnosticKind::InvalidRepeatBounds,
        DiagnosticKind::EmptyRepetition,
        DiagnosticKind::DuplicateRule,
    ];
    for kind in kinds {
        assert!(kind.is_unsupported_construct(), "{kind:?}");
        assert_eq!(kind.default_severity(), Severity::Warning, "{kind:?}");
    }
    assert!(!DiagnosticKind::UndefinedReference.is_unsupported_construct());
    assert!(!DiagnosticKind::UnclosedGroup.is_unsupported_construct());
}

#[test]
fn named_templates() {
    assert_eq!(
        DiagnosticKind::DuplicateRule.message(Some("rule")),
        "`rule` is already defined"
    );
    assert_eq!(
        DiagnosticKind::UndefinedReference.message(Some("digits")),
        "`digits` is not defined"
    );
    assert_eq!(
        DiagnosticKind::UnclosedGroup.message(Some("group opened here")),
        "missing closing `)`; group opened here"
    );
}

#[test]
fn builder_with_related() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedGroup, span(0, 5))
        .message("primary")
        .related_to("related info", span(6, 10))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    let result = diagnostics.printer("hello world!").render();
    insta::assert_snapshot!(result, @r"
    error: missing closing `)`; primary
      |
    1 | hello world!
      | ^^^^^ ---- related info
    ");
}

#[test]
fn printer_plain_without_source() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ProseValue, span(4, 10))
        .message("`<text>` (prose-val)")
        .emit();
    diagnostics
        .report(DiagnosticKind::UndefinedReference, span(12, 15))
        .message("abc")
        .emit();

    let result = DiagnosticsPrinter::new(&diagnostics).render();
    insta::assert_snapshot!(result, @r"
    warning at 4..10: prose values cannot be translated: `<text>` (prose-val)
    warning at 12..15: `abc` is not defined
    ");
}

#[test]
fn printer_with_path() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, span(0, 5))
        .message("`hello`")
        .emit();

    let result = diagnostics
        .printer("hello world")
        .path("test.abnf")
        .render();
    insta::assert_snapshot!(result, @r"
    error: unexpected token: `hello`
     --> test.abnf:1:1
      |
    1 | hello world
      | ^^^^^
    ");
}

#[test]
fn printer_zero_width_span() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedElement, span(0, 0))
        .message("zero width error")
        .emit();

    let result = diagnostics.printer("hello").render();
    insta::assert_snapshot!(result, @r"
    error: expected an element: zero width error
      |
    1 | hello
      | ^
    ");
}

#[test]
fn counts_and_contains() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedElement, span(0, 1))
        .emit();
    diagnostics
        .report(DiagnosticKind::EmptyLiteral, span(2, 4))
        .emit();

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.warning_count(), 1);
    assert!(diagnostics.contains(DiagnosticKind::EmptyLiteral));
    assert!(!diagnostics.contains(DiagnosticKind::ProseValue));
}

#[test]
fn extend_merges_in_order() {
    let mut first = Diagnostics::new();
    first.report(DiagnosticKind::ProseValue, span(0, 1)).emit();
    let mut second = Diagnostics::new();
    second.report(DiagnosticKind::EmptyLiteral, span(1, 2)).emit();

    first.extend(second);
    let kinds: Vec<_> = first.iter().map(|d| d.kind()).collect();
    assert_eq!(
        kinds,
        vec![DiagnosticKind::ProseValue, DiagnosticKind::EmptyLiteral]
    );
}
