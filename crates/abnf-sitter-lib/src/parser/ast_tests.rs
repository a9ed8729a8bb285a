use super::ast::ElementValue;
use super::{Repeat, Rule, parse};

fn first_rule(source: &str) -> Rule {
    let (parse, diagnostics) = parse(source).unwrap();
    assert!(diagnostics.is_empty(), "{}", diagnostics.render(source));
    parse.root().rules().next().unwrap()
}

fn first_repeat(source: &str) -> Repeat {
    let rule = first_rule(source);
    rule.as_cst()
        .descendants()
        .find_map(Repeat::cast)
        .expect("source has a repeat")
}

fn bounds(repeat: &Repeat) -> (Option<String>, bool, Option<String>) {
    (
        repeat.lower().map(|t| t.text().to_string()),
        repeat.star().is_some(),
        repeat.upper().map(|t| t.text().to_string()),
    )
}

#[test]
fn repeat_bounds() {
    assert_eq!(
        bounds(&first_repeat("a = 2*4x")),
        (Some("2".into()), true, Some("4".into()))
    );
    assert_eq!(bounds(&first_repeat("a = 3x")), (Some("3".into()), false, None));
    assert_eq!(bounds(&first_repeat("a = *x")), (None, true, None));
    assert_eq!(bounds(&first_repeat("a = *7x")), (None, true, Some("7".into())));
    assert_eq!(bounds(&first_repeat("a = 1*x")), (Some("1".into()), true, None));
}

#[test]
fn defined_as_kinds() {
    let rule = first_rule("a = b");
    assert!(!rule.defined_as().unwrap().is_incremental());

    let rule = first_rule("a =/ b");
    assert!(rule.defined_as().unwrap().is_incremental());
}

#[test]
fn element_values() {
    let rule = first_rule(r#"a = name (g) [o] "s" %x41 <p>"#);
    let concat = rule.body().unwrap().concatenations().next().unwrap();
    let values: Vec<_> = concat
        .repetitions()
        .map(|r| r.element().unwrap().value().unwrap())
        .collect();

    assert!(matches!(&values[0], ElementValue::RuleName(t) if t.text() == "name"));
    assert!(matches!(&values[1], ElementValue::Group(_)));
    assert!(matches!(&values[2], ElementValue::Opt(_)));
    assert!(matches!(&values[3], ElementValue::CharVal(_)));
    assert!(matches!(&values[4], ElementValue::NumVal(_)));
    assert!(matches!(&values[5], ElementValue::ProseVal(_)));
}

#[test]
fn char_val_content() {
    let rule = first_rule(r#"a = "abc" """#);
    let concat = rule.body().unwrap().concatenations().next().unwrap();
    let contents: Vec<_> = concat
        .repetitions()
        .map(|r| match r.element().unwrap().value().unwrap() {
            ElementValue::CharVal(c) => c.value().map(|t| t.text().to_string()),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(contents, [Some("abc".to_string()), None]);
}

#[test]
fn num_val_parts() {
    let rule = first_rule("a = %x41.42");
    let num = rule
        .as_cst()
        .descendants()
        .find_map(super::NumVal::cast)
        .unwrap();
    assert_eq!(num.base().unwrap().text(), "x");
    let parts: Vec<_> = num.parts().map(|t| t.text().to_string()).collect();
    assert_eq!(parts, ["41", ".", "42"]);
}

#[test]
fn group_and_option_bodies() {
    let rule = first_rule("a = (b / c) [d]");
    let group = rule.as_cst().descendants().find_map(super::Group::cast).unwrap();
    assert_eq!(group.body().unwrap().concatenations().count(), 2);

    let opt = rule.as_cst().descendants().find_map(super::Opt::cast).unwrap();
    assert_eq!(opt.bodies().count(), 1);
}
