use indoc::indoc;

use super::core::Parser;
use super::lexer::lex;
use super::{CstPrinter, parse, parse_with_parser};
use crate::Error;
use crate::diagnostics::{DiagnosticKind, DiagnosticsPrinter};

fn dump(source: &str) -> String {
    let (parse, diagnostics) = parse(source).unwrap();
    assert!(diagnostics.is_empty(), "{}", diagnostics.render(source));
    CstPrinter::new(&parse.syntax()).dump()
}

fn dump_errors(source: &str) -> String {
    let (_, diagnostics) = parse(source).unwrap();
    DiagnosticsPrinter::new(&diagnostics).render()
}

#[test]
fn alternation_inside_group() {
    insta::assert_snapshot!(dump(r#"start = "a" *("b" / "c")"#), @r#"
    Root
      Rule
        Id "start"
        DefinedAs
          Equals "="
        Alternation
          Concatenation
            Repetition
              Element
                CharVal
                  DoubleQuote "\""
                  StrVal "a"
                  DoubleQuote "\""
            Repetition
              Repeat
                Star "*"
              Element
                Group
                  ParenOpen "("
                  Alternation
                    Concatenation
                      Repetition
                        Element
                          CharVal
                            DoubleQuote "\""
                            StrVal "b"
                            DoubleQuote "\""
                    Slash "/"
                    Concatenation
                      Repetition
                        Element
                          CharVal
                            DoubleQuote "\""
                            StrVal "c"
                            DoubleQuote "\""
                  ParenClose ")"
    "#);
}

#[test]
fn trivia_is_kept() {
    let (parse, _) = parse("a = b ; comment\n").unwrap();
    let res = CstPrinter::new(&parse.syntax()).with_trivia(true).dump();
    insta::assert_snapshot!(res, @r#"
    Root
      Rule
        Id "a"
        Whitespace " "
        DefinedAs
          Equals "="
        Whitespace " "
        Alternation
          Concatenation
            Repetition
              Element
                Id "b"
      Whitespace " "
      Comment "; comment"
      Newline "\n"
    "#);
}

#[test]
fn spans_are_printed() {
    let (parse, _) = parse("a = b").unwrap();
    let res = CstPrinter::new(&parse.syntax()).with_spans(true).dump();
    insta::assert_snapshot!(res, @r#"
    Root [0..5]
      Rule [0..5]
        Id [0..1] "a"
        DefinedAs [2..3]
          Equals [2..3] "="
        Alternation [4..5]
          Concatenation [4..5]
            Repetition [4..5]
              Element [4..5]
                Id [4..5] "b"
    "#);
}

#[test]
fn rules_split_on_name_and_defined_as() {
    let input = indoc! {r#"
        greeting = hello SP
                   world
        hello    = "hello"
        world    =/ "world"
    "#};

    let (parse, diagnostics) = parse(input).unwrap();
    assert!(diagnostics.is_empty());

    let names: Vec<_> = parse
        .root()
        .rules()
        .map(|r| r.name().unwrap().text().to_string())
        .collect();
    assert_eq!(names, ["greeting", "hello", "world"]);

    let first = parse.root().rules().next().unwrap();
    let concat = first.body().unwrap().concatenations().next().unwrap();
    assert_eq!(concat.repetitions().count(), 3);
}

#[test]
fn repeat_forms() {
    insta::assert_snapshot!(dump("a = 2*4x 3y *z 1*w *5v"), @r#"
    Root
      Rule
        Id "a"
        DefinedAs
          Equals "="
        Alternation
          Concatenation
            Repetition
              Repeat
                Number "2"
                Star "*"
                Number "4"
              Element
                Id "x"
            Repetition
              Repeat
                Number "3"
              Element
                Id "y"
            Repetition
              Repeat
                Star "*"
              Element
                Id "z"
            Repetition
              Repeat
                Number "1"
                Star "*"
              Element
                Id "w"
            Repetition
              Repeat
                Star "*"
                Number "5"
              Element
                Id "v"
    "#);
}

#[test]
fn terminal_values() {
    insta::assert_snapshot!(dump("a = %x41.42 [%x20-7E] <prose>"), @r#"
    Root
      Rule
        Id "a"
        DefinedAs
          Equals "="
        Alternation
          Concatenation
            Repetition
              Element
                NumVal
                  Percent "%"
                  NumBase "x"
                  NumDigits "41"
                  Dot "."
                  NumDigits "42"
            Repetition
              Element
                Opt
                  BracketOpen "["
                  Alternation
                    Concatenation
                      Repetition
                        Element
                          NumVal
                            Percent "%"
                            NumBase "x"
                            NumDigits "20"
                            Dash "-"
                            NumDigits "7E"
                  BracketClose "]"
            Repetition
              Element
                ProseVal
                  Prose "<prose>"
    "#);
}

#[test]
fn unclosed_group() {
    insta::assert_snapshot!(dump_errors("a = (b"), @"error at 4..6: missing closing `)`; reached end of input (related: group started here at 4..5)");
}

#[test]
fn unclosed_option_before_next_rule() {
    let input = indoc! {"
        a = [b
        c = d
    "};
    insta::assert_snapshot!(dump_errors(input), @"error at 4..8: missing closing `]`; next rule begins before it (related: option started here at 4..5)");
}

#[test]
fn stray_tokens_between_rules() {
    let input = indoc! {"
        a = b
        ) c = d
    "};
    let (parse, diagnostics) = parse(input).unwrap();
    insta::assert_snapshot!(DiagnosticsPrinter::new(&diagnostics).render(), @"error at 6..7: expected a rule definition: rules look like `name = elements`");
    assert_eq!(parse.root().rules().count(), 2);
}

#[test]
fn garbage_inside_rule() {
    let (parse, diagnostics) = parse("a = b @ c").unwrap();
    assert!(diagnostics.contains(DiagnosticKind::UnexpectedToken));
    insta::assert_snapshot!(DiagnosticsPrinter::new(&diagnostics).render(), @"error at 6..7: unexpected token: `@`");

    let rule = parse.root().rules().next().unwrap();
    let concat = rule.body().unwrap().concatenations().next().unwrap();
    assert_eq!(concat.repetitions().count(), 2);
}

#[test]
fn rule_without_body() {
    insta::assert_snapshot!(dump_errors("a = "), @"error at 4..4: expected an element: rule has no definition");
}

#[test]
fn trailing_slash() {
    insta::assert_snapshot!(dump_errors("a = b /"), @"error at 7..7: expected an element: after `/`");
}

#[test]
fn repeat_without_element() {
    insta::assert_snapshot!(dump_errors("a = 3*"), @"error at 6..6: expected an element: after repeat operator");
}

#[test]
fn empty_input() {
    insta::assert_snapshot!(dump(""), @"Root");
}

#[test]
fn comment_only_input() {
    insta::assert_snapshot!(dump("; nothing here\n"), @"Root");
}

#[test]
fn recursion_limit_is_fatal() {
    let source = "a = ((((((b))))))";
    let parser = Parser::new(source, lex(source)).with_recursion_fuel(Some(4));
    let result = parse_with_parser(parser);
    assert!(matches!(result, Err(Error::RecursionLimitExceeded)));
}

#[test]
fn default_fuel_handles_reasonable_nesting() {
    let source = format!("a = {}b{}", "(".repeat(64), ")".repeat(64));
    let (_, diagnostics) = parse(&source).unwrap();
    assert!(diagnostics.is_empty());
}
