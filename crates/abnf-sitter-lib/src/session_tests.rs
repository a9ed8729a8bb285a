use crate::session::*;

fn session() -> Session {
    Session::new("/tmp/grammar", "uri", "URI")
}

#[test]
fn names_are_stored_by_key() {
    let s = session().with_hidden(["Path-Abempty"]).with_inline(["_Segment"]);

    assert!(s.is_hidden("path_abempty"));
    assert!(s.is_hidden("PATH-ABEMPTY"));
    assert!(s.is_inline("segment"));
    assert_eq!(s.hidden_rules().collect::<Vec<_>>(), ["path_abempty"]);
}

#[test]
fn with_inline_rule_leaves_other_fields() {
    let s = session().with_hidden(["a"]).with_conflicts([["b", "c"]]);
    let next = s.with_inline_rule("foo");

    assert!(next.is_inline("foo"));
    assert!(!s.is_inline("foo"));
    assert_eq!(next.location(), s.location());
    assert_eq!(next.start(), s.start());
    assert_eq!(
        next.hidden_rules().collect::<Vec<_>>(),
        s.hidden_rules().collect::<Vec<_>>()
    );
    assert_eq!(
        next.conflicts().collect::<Vec<_>>(),
        s.conflicts().collect::<Vec<_>>()
    );
}

#[test]
fn repeated_fix_is_unchanged() {
    let s = session().with_inline_rule("foo");
    assert_eq!(s.with_inline_rule("FOO"), s);
}

#[test]
fn conflict_groups_are_sets() {
    let s = session().with_conflict(&["b", "a"]);
    assert_eq!(s.with_conflict(&["A", "B", "a"]), s);
    assert_eq!(
        s.conflicts().collect::<Vec<_>>(),
        [&["a".to_string(), "b".to_string()][..]]
    );
}

#[test]
fn builder_defaults() {
    let s = session();
    assert!(!s.core_rules());
    assert_eq!(s.name(), "uri");
    assert_eq!(s.inline_rules().count(), 0);
    assert!(session().with_core_rules(true).core_rules());
}
