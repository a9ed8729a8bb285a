use crate::parser::cst::{AbnfLang, SyntaxKind::*, TokenSet};
use crate::parser::cst::token_sets::{ELEMENT_FIRST, REPETITION_FIRST};
use rowan::Language;

#[test]
fn token_set_contains() {
    let set = TokenSet::new(&[ParenOpen, ParenClose, Star]);
    assert!(set.contains(ParenOpen));
    assert!(set.contains(ParenClose));
    assert!(set.contains(Star));
    assert!(!set.contains(Slash));
    assert!(!set.contains(Id));
}

#[test]
fn token_set_union() {
    let a = TokenSet::new(&[ParenOpen, ParenClose]);
    let b = TokenSet::new(&[Star, Number]);
    let c = a.union(b);
    assert!(c.contains(ParenOpen));
    assert!(c.contains(Number));
    assert!(!c.contains(Slash));
}

#[test]
fn token_set_ignores_node_kinds() {
    assert!(!TokenSet::EMPTY.contains(Root));
    assert!(!ELEMENT_FIRST.contains(Element));
}

#[test]
fn repetition_first_extends_element_first() {
    assert!(REPETITION_FIRST.contains(Number));
    assert!(REPETITION_FIRST.contains(Star));
    assert!(REPETITION_FIRST.contains(Percent));
    assert!(!ELEMENT_FIRST.contains(Star));
}

#[test]
fn is_trivia() {
    assert!(Whitespace.is_trivia());
    assert!(Newline.is_trivia());
    assert!(Comment.is_trivia());
    assert!(!Id.is_trivia());
    assert!(!Error.is_trivia());
}

#[test]
fn is_error() {
    assert!(Error.is_error());
    assert!(Garbage.is_error());
    assert!(!Id.is_error());
    assert!(!Whitespace.is_error());
}

#[test]
fn syntax_kind_count_under_64() {
    assert!(
        (__LAST as u16) < 64,
        "SyntaxKind has {} variants, exceeds TokenSet capacity of 64",
        __LAST as u16
    );
}

#[test]
fn language_roundtrip() {
    for kind in [ParenOpen, Id, Comment, Root, Rule, ProseVal] {
        let raw = AbnfLang::kind_to_raw(kind);
        assert_eq!(AbnfLang::kind_from_raw(raw), kind);
    }
}

#[test]
#[should_panic]
fn kind_from_raw_rejects_out_of_range() {
    AbnfLang::kind_from_raw(rowan::SyntaxKind(__LAST as u16));
}

#[test]
fn token_set_debug_lists_kinds() {
    let set = TokenSet::new(&[Equals, EqualsSlash]);
    assert_eq!(format!("{set:?}"), "{EqualsSlash, Equals}");
}
