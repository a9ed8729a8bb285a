use std::collections::VecDeque;
use std::path::Path;

use indoc::indoc;

use super::{
    Controller, Generator, GeneratorDiagnostic, GeneratorRun, GiveUpReason, Outcome, Reporter,
    SilentReporter, Width,
};
use crate::assemble::OutputFormat;
use crate::diagnostics::Diagnostics;
use crate::session::Session;
use crate::{AbnfGrammar, Error, Result};

/// Replays canned runs and records the descriptor each run saw on disk.
#[derive(Default)]
struct ScriptedGenerator {
    runs: VecDeque<GeneratorRun>,
    seen: Vec<String>,
}

impl ScriptedGenerator {
    fn new(runs: impl IntoIterator<Item = GeneratorRun>) -> Self {
        Self {
            runs: runs.into_iter().collect(),
            seen: Vec::new(),
        }
    }
}

impl Generator for ScriptedGenerator {
    fn generate(&mut self, location: &Path, descriptor: &str) -> Result<GeneratorRun> {
        self.seen
            .push(std::fs::read_to_string(location.join(descriptor))?);
        Ok(self.runs.pop_front().unwrap_or_else(GeneratorRun::success))
    }
}

/// Events as one line each.
#[derive(Default)]
struct Log(Vec<String>);

impl Reporter for Log {
    fn translated(&mut self, _session: &Session, diagnostics: &Diagnostics) {
        self.0.push(format!("translated: {} diagnostics", diagnostics.len()));
    }

    fn invoking(&mut self, attempt: usize, descriptor: &Path) {
        let file = descriptor.file_name().unwrap().to_string_lossy();
        self.0.push(format!("invoking #{attempt}: {file}"));
    }

    fn failed(&mut self, attempt: usize, output: &str) {
        self.0.push(format!("failed #{attempt}: {}", output.trim()));
    }

    fn inlined(&mut self, rule: &str) {
        self.0.push(format!("inlined: {rule}"));
    }

    fn conflict_added(&mut self, rules: &[String]) {
        self.0.push(format!("conflict: {}", rules.join(", ")));
    }
}

const SOURCE: &str = indoc! {r#"
    top = foo "x" bar
    foo = *"a"
    bar = "b" / "c"
"#};

fn run(
    runs: Vec<GeneratorRun>,
    session: Session,
) -> (Outcome, Vec<String>, Vec<String>) {
    let abnf = AbnfGrammar::parse(SOURCE).unwrap();
    let mut controller = Controller::new(ScriptedGenerator::new(runs));
    let mut log = Log::default();
    let outcome = controller.run(&abnf, session, &mut log).unwrap();
    let seen = controller.generator().seen.clone();
    (outcome, seen, log.0)
}

#[test]
fn accepted_first_time() {
    let dir = tempfile::tempdir().unwrap();
    let location = dir.path().join("nested/out");
    let session = Session::new(&location, "demo", "top");

    let (outcome, seen, log) = run(vec![], session.clone());

    let Outcome::Done(report) = outcome else {
        panic!("expected success");
    };
    assert_eq!(report.attempts, 1);
    assert_eq!(report.session, session);
    assert_eq!(report.descriptor, location.join("grammar.js"));

    let written = std::fs::read_to_string(&report.descriptor).unwrap();
    assert_eq!(seen, [written.clone()]);
    assert_eq!(report.width, Width::of(&written));
    insta::assert_snapshot!(log.join("\n"), @r"
    translated: 0 diagnostics
    invoking #1: grammar.js
    ");
}

#[test]
fn empty_rule_is_inlined_once() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::new(dir.path(), "demo", "top");

    let (outcome, seen, log) = run(
        vec![GeneratorRun::failure(
            "Error: The rule `foo` matches the empty string.\n",
        )],
        session.clone(),
    );

    let Outcome::Done(report) = outcome else {
        panic!("expected success after one retry");
    };
    assert_eq!(report.attempts, 2);
    assert_eq!(report.session, session.with_inline_rule("foo"));
    assert_eq!(report.session.inline_rules().collect::<Vec<_>>(), ["foo"]);
    assert_eq!(report.session.hidden_rules().count(), 0);
    assert_eq!(report.session.conflicts().count(), 0);

    assert!(seen[0].contains("foo: $ => repeat('a'),"));
    assert!(seen[1].contains("const inline_foo = $ => repeat('a');"));
    insta::assert_snapshot!(log.join("\n"), @r"
    translated: 0 diagnostics
    invoking #1: grammar.js
    failed #1: Error: The rule `foo` matches the empty string.
    inlined: foo
    invoking #2: grammar.js
    ");
}

#[test]
fn conflict_is_declared() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::new(dir.path(), "demo", "top");

    let (outcome, seen, log) = run(
        vec![GeneratorRun::failure(
            "  3:  Add a conflict for these rules: `top`, `bar`\n",
        )],
        session.clone(),
    );

    let Outcome::Done(report) = outcome else {
        panic!("expected success after one retry");
    };
    assert_eq!(report.session, session.with_conflict(&["bar", "top"]));
    assert!(seen[1].contains("[$.bar, $.top],"));
    assert_eq!(log[3], "conflict: top, bar");
}

#[test]
fn json_format_writes_grammar_json() {
    let dir = tempfile::tempdir().unwrap();
    let abnf = AbnfGrammar::parse(SOURCE).unwrap();
    let mut controller =
        Controller::new(ScriptedGenerator::default()).with_format(OutputFormat::Json);
    let outcome = controller
        .run(&abnf, Session::new(dir.path(), "demo", "top"), &mut SilentReporter)
        .unwrap();

    let Outcome::Done(report) = outcome else {
        panic!("expected success");
    };
    assert_eq!(report.descriptor, dir.path().join("grammar.json"));
    assert!(controller.generator().seen[0].contains("\"type\": \"SEQ\""));
}

#[test]
fn repeated_fix_is_no_progress() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::new(dir.path(), "demo", "top");
    let empty = "The rule `foo` matches the empty string.";

    let (outcome, seen, _) = run(
        vec![GeneratorRun::failure(empty), GeneratorRun::failure(empty)],
        session,
    );

    let Outcome::GivenUp(give_up) = outcome else {
        panic!("expected give up");
    };
    assert_eq!(give_up.attempts, 2);
    assert_eq!(
        give_up.reason,
        GiveUpReason::NoProgress(GeneratorDiagnostic::EmptyRuleMatch("foo".into()))
    );
    assert_eq!(give_up.output, empty);
    assert_eq!(seen.len(), 2);
}

#[test]
fn unknown_rule_stops() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::new(dir.path(), "demo", "top");

    let (outcome, _, _) = run(
        vec![GeneratorRun::failure("The rule `ghost` matches the empty string.")],
        session,
    );

    let Outcome::GivenUp(give_up) = outcome else {
        panic!("expected give up");
    };
    assert_eq!(give_up.reason, GiveUpReason::UnknownRule("ghost".into()));
    assert_eq!(give_up.attempts, 1);
}

#[test]
fn precedence_is_actionable_only() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::new(dir.path(), "demo", "top");
    let text = "  1:  Specify a higher precedence in `bar` than in the other rules.";

    let (outcome, seen, log) = run(vec![GeneratorRun::failure(text)], session.clone());

    let Outcome::GivenUp(give_up) = outcome else {
        panic!("expected give up");
    };
    assert_eq!(
        give_up.reason,
        GiveUpReason::Actionable(GeneratorDiagnostic::NeedsPrecedence("bar".into()))
    );
    assert_eq!(give_up.session, session);
    assert_eq!(seen.len(), 1);
    assert_eq!(log.last().unwrap(), &format!("failed #1: {}", text.trim()));
}

#[test]
fn unrecognized_output_is_kept_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::new(dir.path(), "demo", "top");
    let text = "Error: something unexpected\n  at line 3\n";

    let (outcome, _, _) = run(vec![GeneratorRun::failure(text)], session);

    let Outcome::GivenUp(give_up) = outcome else {
        panic!("expected give up");
    };
    assert_eq!(give_up.reason, GiveUpReason::Unrecognized);
    assert_eq!(give_up.output, text);
}

#[test]
fn attempt_limit() {
    let dir = tempfile::tempdir().unwrap();
    let abnf = AbnfGrammar::parse(SOURCE).unwrap();
    let runs = vec![
        GeneratorRun::failure("The rule `foo` matches the empty string."),
        GeneratorRun::failure("The rule `bar` matches the empty string."),
    ];
    let mut controller = Controller::new(ScriptedGenerator::new(runs)).with_max_attempts(2);
    let outcome = controller
        .run(&abnf, Session::new(dir.path(), "demo", "top"), &mut SilentReporter)
        .unwrap();

    let Outcome::GivenUp(give_up) = outcome else {
        panic!("expected give up");
    };
    assert_eq!(give_up.reason, GiveUpReason::AttemptLimit(2));
    assert_eq!(give_up.attempts, 2);
    assert!(give_up.session.is_inline("foo"));
    assert!(give_up.session.is_inline("bar"));
    insta::assert_snapshot!(give_up.reason.to_string(), @"gave up after 2 attempts");
}

#[test]
fn translation_diagnostics_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    let source = "top = foo / %d65\nfoo = \"a\"\n";
    let abnf = AbnfGrammar::parse(source).unwrap();
    let runs = vec![GeneratorRun::failure("The rule `foo` matches the empty string.")];
    let mut controller = Controller::new(ScriptedGenerator::new(runs));
    let mut log = Log::default();
    controller
        .run(&abnf, Session::new(dir.path(), "demo", "top"), &mut log)
        .unwrap();

    let translated: Vec<_> = log.0.iter().filter(|e| e.starts_with("translated")).collect();
    assert_eq!(translated, ["translated: 1 diagnostics"]);
}

#[test]
fn parse_errors_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let abnf = AbnfGrammar::parse("top = (foo").unwrap();
    let mut controller = Controller::new(ScriptedGenerator::default());
    let result = controller.run(&abnf, Session::new(dir.path(), "demo", "top"), &mut SilentReporter);

    assert!(matches!(result, Err(Error::AbnfParseError(_))));
    assert!(controller.generator().seen.is_empty());
}

#[test]
fn descriptor_format_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let abnf = AbnfGrammar::parse(SOURCE).unwrap();
    let mut controller =
        Controller::new(ScriptedGenerator::default()).with_format(OutputFormat::Descriptor);
    let result = controller.run(&abnf, Session::new(dir.path(), "demo", "top"), &mut SilentReporter);
    assert!(matches!(result, Err(Error::Config(_))));
}
