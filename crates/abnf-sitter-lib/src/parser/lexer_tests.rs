use super::lexer::{lex, token_text};

fn tokens(source: &str) -> String {
    lex(source)
        .iter()
        .map(|t| format!("{:?} {:?}", t.kind, token_text(source, t)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn rule_with_repeat() {
    insta::assert_snapshot!(tokens("rule-name =/ 1*2DIGIT"), @r#"
    Id "rule-name"
    Whitespace " "
    EqualsSlash "=/"
    Whitespace " "
    Number "1"
    Star "*"
    Number "2"
    Id "DIGIT"
    "#);
}

#[test]
fn quoted_string_is_split() {
    insta::assert_snapshot!(tokens(r#""abc""#), @r#"
    DoubleQuote "\""
    StrVal "abc"
    DoubleQuote "\""
    "#);
}

#[test]
fn empty_quoted_string_has_no_content() {
    insta::assert_snapshot!(tokens(r#""""#), @r#"
    DoubleQuote "\""
    DoubleQuote "\""
    "#);
}

#[test]
fn dotted_numeric_value_is_split() {
    insta::assert_snapshot!(tokens("%x41.42.43"), @r#"
    Percent "%"
    NumBase "x"
    NumDigits "41"
    Dot "."
    NumDigits "42"
    Dot "."
    NumDigits "43"
    "#);
}

#[test]
fn ranged_numeric_value_is_split() {
    insta::assert_snapshot!(tokens("%x20-7E"), @r#"
    Percent "%"
    NumBase "x"
    NumDigits "20"
    Dash "-"
    NumDigits "7E"
    "#);
}

#[test]
fn decimal_numeric_value_keeps_base() {
    insta::assert_snapshot!(tokens("%d65"), @r#"
    Percent "%"
    NumBase "d"
    NumDigits "65"
    "#);
}

#[test]
fn comments_and_newlines() {
    insta::assert_snapshot!(tokens("; comment\r\nb\n"), @r#"
    Comment "; comment"
    Newline "\r\n"
    Id "b"
    Newline "\n"
    "#);
}

#[test]
fn prose_value() {
    insta::assert_snapshot!(tokens("<any text>"), @r#"Prose "<any text>""#);
}

#[test]
fn garbage_is_coalesced() {
    insta::assert_snapshot!(tokens("a @@ b"), @r#"
    Id "a"
    Whitespace " "
    Garbage "@@"
    Whitespace " "
    Id "b"
    "#);
}

#[test]
fn group_and_option_delimiters() {
    insta::assert_snapshot!(tokens("([a])/b"), @r#"
    ParenOpen "("
    BracketOpen "["
    Id "a"
    BracketClose "]"
    ParenClose ")"
    Slash "/"
    Id "b"
    "#);
}
