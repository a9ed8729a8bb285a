//! Grammar productions for ABNF.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! Productions follow RFC 5234 §4:
//!
//! ```text
//! rulelist      = *rule
//! rule          = rulename defined-as alternation
//! alternation   = concatenation *("/" concatenation)
//! concatenation = repetition *repetition
//! repetition    = [repeat] element
//! repeat        = 1*DIGIT / (*DIGIT "*" *DIGIT)
//! element       = rulename / group / option / char-val / num-val / prose-val
//! ```
//!
//! Line structure is not significant: a rule ends where the next `name =`
//! (or `name =/`) begins.

use super::core::Parser;
use super::cst::token_sets::{ELEMENT_FIRST, REPETITION_FIRST};
use super::cst::{SyntaxKind, TokenSet};
use crate::diagnostics::DiagnosticKind;

impl Parser<'_> {
    pub fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Root);

        loop {
            self.skip_trivia_to_buffer();
            if self.should_stop() {
                break;
            }

            // LL(2): Id followed by `=` or `=/` starts a rule
            if self.at_rule_start() {
                self.parse_rule();
            } else {
                self.error_recover(
                    DiagnosticKind::ExpectedRule,
                    "rules look like `name = elements`",
                    TokenSet::EMPTY,
                );
            }
        }

        self.eat_trivia();
        self.finish_node();
    }

    /// `name = alternation` or `name =/ alternation`
    fn parse_rule(&mut self) {
        self.start_node(SyntaxKind::Rule);

        self.assert_current(SyntaxKind::Id);
        self.bump();

        let defined_as = self.current();
        assert!(
            matches!(defined_as, SyntaxKind::Equals | SyntaxKind::EqualsSlash),
            "parse_rule: expected `=` or `=/` but found {:?} (caller should verify)",
            defined_as
        );
        self.start_node(SyntaxKind::DefinedAs);
        self.bump();
        self.finish_node();

        if self.at_repetition_start() {
            self.parse_alternation();
        } else {
            self.error_msg(DiagnosticKind::ExpectedElement, "rule has no definition");
        }

        self.finish_node();
    }

    fn at_repetition_start(&mut self) -> bool {
        self.currently_is_one_of(REPETITION_FIRST) && !self.at_rule_start()
    }

    /// `concatenation *("/" concatenation)`
    fn parse_alternation(&mut self) {
        if !self.enter_recursion() {
            self.start_node(SyntaxKind::Error);
            while !self.should_stop() {
                self.bump();
            }
            self.finish_node();
            return;
        }

        self.start_node(SyntaxKind::Alternation);
        self.parse_concatenation();

        while self.currently_is(SyntaxKind::Slash) && !self.has_fatal_error() {
            self.bump();
            if self.at_repetition_start() {
                self.parse_concatenation();
            } else {
                self.error_msg(DiagnosticKind::ExpectedElement, "after `/`");
            }
        }

        self.finish_node();
        self.exit_recursion();
    }

    /// One or more repetitions. The caller guarantees the first one.
    fn parse_concatenation(&mut self) {
        self.start_node(SyntaxKind::Concatenation);

        loop {
            if self.has_fatal_error() {
                break;
            }
            if self.at_repetition_start() {
                self.parse_repetition();
                continue;
            }
            if self.currently_is(SyntaxKind::Garbage) {
                let text = self.current_text();
                self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, format!("`{text}`"));
                continue;
            }
            break;
        }

        self.finish_node();
    }

    /// `[repeat] element`
    fn parse_repetition(&mut self) {
        self.start_node(SyntaxKind::Repetition);

        if matches!(self.current(), SyntaxKind::Number | SyntaxKind::Star) {
            self.parse_repeat();
        }

        if self.currently_is_one_of(ELEMENT_FIRST) && !self.at_rule_start() {
            self.parse_element();
        } else {
            self.error_msg(DiagnosticKind::ExpectedElement, "after repeat operator");
        }

        self.finish_node();
    }

    /// `n`, `*`, `n*`, `*m` or `n*m`
    fn parse_repeat(&mut self) {
        self.start_node(SyntaxKind::Repeat);
        self.eat_token(SyntaxKind::Number);
        if self.eat_token(SyntaxKind::Star) {
            self.eat_token(SyntaxKind::Number);
        }
        self.finish_node();
    }

    fn parse_element(&mut self) {
        self.start_node(SyntaxKind::Element);

        match self.current() {
            SyntaxKind::Id => self.bump(),
            SyntaxKind::ParenOpen => self.parse_group(),
            SyntaxKind::BracketOpen => self.parse_option(),
            SyntaxKind::DoubleQuote => self.parse_char_val(),
            SyntaxKind::Percent => self.parse_num_val(),
            SyntaxKind::Prose => self.parse_prose_val(),
            other => panic!(
                "parse_element: {:?} is not in ELEMENT_FIRST (caller should verify)",
                other
            ),
        }

        self.finish_node();
    }

    /// `( alternation )`
    fn parse_group(&mut self) {
        self.start_node(SyntaxKind::Group);
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump();

        self.parse_delimited_alternation("inside `( )`");
        self.close_delimiter(SyntaxKind::ParenClose);
        self.finish_node();
    }

    /// `[ alternation ]`
    fn parse_option(&mut self) {
        self.start_node(SyntaxKind::Opt);
        self.push_delimiter(SyntaxKind::BracketOpen);
        self.bump();

        self.parse_delimited_alternation("inside `[ ]`");
        self.close_delimiter(SyntaxKind::BracketClose);
        self.finish_node();
    }

    fn parse_delimited_alternation(&mut self, context: &str) {
        if self.at_repetition_start() {
            self.parse_alternation();
        } else {
            self.error_msg(DiagnosticKind::ExpectedElement, context);
        }
    }

    fn close_delimiter(&mut self, close: SyntaxKind) {
        let open = self.pop_delimiter();
        if self.eat_token(close) {
            return;
        }

        let Some(open) = open else {
            self.expect(close, "closing delimiter");
            return;
        };

        let (kind, construct) = match open.kind {
            SyntaxKind::ParenOpen => (DiagnosticKind::UnclosedGroup, "group"),
            _ => (DiagnosticKind::UnclosedOption, "option"),
        };
        let found = if self.eof() {
            "reached end of input".to_string()
        } else if self.at_rule_start() {
            "next rule begins before it".to_string()
        } else {
            format!("found `{}`", self.current_text())
        };
        self.error_unclosed_delimiter(kind, found, format!("{construct} started here"), open.span);
    }

    /// `"text"`; the lexer always yields both quotes.
    fn parse_char_val(&mut self) {
        self.start_node(SyntaxKind::CharVal);
        self.bump();
        self.eat_token(SyntaxKind::StrVal);
        self.expect(SyntaxKind::DoubleQuote, "closing `\"`");
        self.finish_node();
    }

    /// `%x41`, `%x41.42.43`, `%x20-7E`
    fn parse_num_val(&mut self) {
        self.start_node(SyntaxKind::NumVal);
        self.bump();
        self.expect(SyntaxKind::NumBase, "numeric base after `%`");
        while !self.should_stop()
            && matches!(
                self.nth_raw(0),
                SyntaxKind::NumDigits | SyntaxKind::Dot | SyntaxKind::Dash
            )
        {
            self.bump();
        }
        self.finish_node();
    }

    fn parse_prose_val(&mut self) {
        self.start_node(SyntaxKind::ProseVal);
        self.bump();
        self.finish_node();
    }
}
