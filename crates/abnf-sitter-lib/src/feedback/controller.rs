//! The diagnostic-feedback loop.
//!
//! Each attempt translates the grammar under the current session, writes the
//! descriptor, and runs the generator. Failures the generator explains in a
//! known way are repaired by deriving a new session; anything else ends the
//! loop with the generator's text intact.

use std::fs;
use std::path::{Path, PathBuf};

use abnf_sitter_core::Grammar;

use super::classify::{GeneratorDiagnostic, classify};
use super::generator::Generator;
use crate::assemble::{OutputFormat, assemble};
use crate::config::DEFAULT_MAX_ATTEMPTS;
use crate::diagnostics::Diagnostics;
use crate::session::Session;
use crate::{AbnfGrammar, Error, Result};

/// Loop states. `Done` and `GivenUp` are terminal.
#[derive(Debug)]
enum State {
    Idle,
    Invoking { descriptor: Descriptor },
    Diagnosing { descriptor: Descriptor, output: String },
    Done(GenerationReport),
    GivenUp(GiveUp),
}

#[derive(Debug)]
struct Descriptor {
    grammar: Grammar,
    path: PathBuf,
    width: Width,
}

/// Size of the emitted descriptor text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Width {
    /// Longest line, in characters.
    pub max_line: usize,
    pub bytes: usize,
}

impl Width {
    pub fn of(text: &str) -> Self {
        Self {
            max_line: text.lines().map(|line| line.chars().count()).max().unwrap_or(0),
            bytes: text.len(),
        }
    }
}

/// A successful generation.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub attempts: usize,
    /// Session that produced the accepted descriptor, including every automatic fix.
    pub session: Session,
    pub descriptor: PathBuf,
    pub width: Width,
}

/// Why the loop stopped without a parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GiveUpReason {
    /// The generator asked for a precedence or associativity annotation.
    Actionable(GeneratorDiagnostic),
    /// The generator failed in a way that is not understood.
    Unrecognized,
    /// The fix was already applied and the generator still reports it.
    NoProgress(GeneratorDiagnostic),
    /// The generator named a rule the descriptor does not define.
    UnknownRule(String),
    /// The attempt cap was reached while fixes were still being applied.
    AttemptLimit(usize),
}

impl std::fmt::Display for GiveUpReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GiveUpReason::Actionable(diagnostic) => {
                write!(f, "{diagnostic}; add it to the grammar by hand")
            }
            GiveUpReason::Unrecognized => write!(f, "generator failure is not automatically fixable"),
            GiveUpReason::NoProgress(diagnostic) => {
                write!(f, "{diagnostic}, and the fix is already applied")
            }
            GiveUpReason::UnknownRule(rule) => {
                write!(f, "generator names `{rule}`, which the grammar does not define")
            }
            GiveUpReason::AttemptLimit(limit) => write!(f, "gave up after {limit} attempts"),
        }
    }
}

/// A failed generation.
#[derive(Debug, Clone)]
pub struct GiveUp {
    pub reason: GiveUpReason,
    pub attempts: usize,
    /// Session of the last attempt.
    pub session: Session,
    /// Raw generator output of the last attempt.
    pub output: String,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Done(GenerationReport),
    GivenUp(GiveUp),
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }
}

/// Progress events. The library never prints; front ends decide how to show these.
pub trait Reporter {
    /// Translation diagnostics, reported once per grammar.
    fn translated(&mut self, _session: &Session, _diagnostics: &Diagnostics) {}
    fn invoking(&mut self, _attempt: usize, _descriptor: &Path) {}
    /// Verbatim generator output of a failed attempt.
    fn failed(&mut self, _attempt: usize, _output: &str) {}
    fn inlined(&mut self, _rule: &str) {}
    fn conflict_added(&mut self, _rules: &[String]) {}
}

/// Discards every event.
pub struct SilentReporter;

impl Reporter for SilentReporter {}

/// Drives one grammar through the generator until it is accepted or cannot be fixed.
pub struct Controller<G> {
    generator: G,
    format: OutputFormat,
    max_attempts: usize,
}

impl<G: Generator> Controller<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            format: OutputFormat::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Run the loop. `Err` is reserved for fatal problems (parse errors,
    /// structural violations, I/O); generator failures end in `Outcome::GivenUp`.
    pub fn run(
        &mut self,
        abnf: &AbnfGrammar<'_>,
        session: Session,
        reporter: &mut dyn Reporter,
    ) -> Result<Outcome> {
        if self.format == OutputFormat::Descriptor {
            return Err(Error::Config(
                "the generator cannot read `descriptor` output".into(),
            ));
        }

        let mut session = session;
        let mut attempts = 0;
        let mut state = State::Idle;

        loop {
            state = match state {
                State::Idle => {
                    if attempts == self.max_attempts {
                        State::GivenUp(GiveUp {
                            reason: GiveUpReason::AttemptLimit(self.max_attempts),
                            attempts,
                            session: session.clone(),
                            output: String::new(),
                        })
                    } else {
                        attempts += 1;
                        let descriptor = self.write_descriptor(abnf, &session, attempts, reporter)?;
                        State::Invoking { descriptor }
                    }
                }
                State::Invoking { descriptor } => {
                    reporter.invoking(attempts, &descriptor.path);
                    let run = self
                        .generator
                        .generate(session.location(), self.format.file_name())?;
                    if run.success {
                        State::Done(GenerationReport {
                            attempts,
                            session: session.clone(),
                            descriptor: descriptor.path,
                            width: descriptor.width,
                        })
                    } else {
                        reporter.failed(attempts, &run.output);
                        State::Diagnosing {
                            descriptor,
                            output: run.output,
                        }
                    }
                }
                State::Diagnosing { descriptor, output } => {
                    match next_session(&session, &descriptor.grammar, &output) {
                        Ok((next, fix)) => {
                            match &fix {
                                Fix::Inline(rule) => reporter.inlined(rule),
                                Fix::Conflict(rules) => reporter.conflict_added(rules),
                            }
                            session = next;
                            State::Idle
                        }
                        Err(reason) => State::GivenUp(GiveUp {
                            reason,
                            attempts,
                            session: session.clone(),
                            output,
                        }),
                    }
                }
                State::Done(report) => return Ok(Outcome::Done(report)),
                State::GivenUp(give_up) => return Ok(Outcome::GivenUp(give_up)),
            };
        }
    }

    fn write_descriptor(
        &self,
        abnf: &AbnfGrammar<'_>,
        session: &Session,
        attempt: usize,
        reporter: &mut dyn Reporter,
    ) -> Result<Descriptor> {
        let (grammar, diagnostics) = abnf.translate(session)?;
        if attempt == 1 {
            reporter.translated(session, &diagnostics);
        }

        let text = assemble(&grammar, self.format)?;
        fs::create_dir_all(session.location())?;
        let path = session.location().join(self.format.file_name());
        fs::write(&path, &text)?;

        Ok(Descriptor {
            grammar,
            path,
            width: Width::of(&text),
        })
    }
}

enum Fix {
    Inline(String),
    Conflict(Vec<String>),
}

/// Session for the next attempt, or why there is none.
fn next_session(
    session: &Session,
    grammar: &Grammar,
    output: &str,
) -> std::result::Result<(Session, Fix), GiveUpReason> {
    let diagnostic = classify(output);
    let (next, fix) = match &diagnostic {
        GeneratorDiagnostic::EmptyRuleMatch(name) => {
            let rule = defined(grammar, name)?;
            (session.with_inline_rule(&rule), Fix::Inline(rule))
        }
        GeneratorDiagnostic::MissingConflictDeclaration(names) => {
            let rules = names
                .iter()
                .map(|name| defined(grammar, name))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            (session.with_conflict(&rules), Fix::Conflict(rules))
        }
        GeneratorDiagnostic::NeedsPrecedence(_) | GeneratorDiagnostic::NeedsAssociativity(_) => {
            return Err(GiveUpReason::Actionable(diagnostic));
        }
        GeneratorDiagnostic::Unrecognized => return Err(GiveUpReason::Unrecognized),
    };

    if next == *session {
        return Err(GiveUpReason::NoProgress(diagnostic));
    }
    Ok((next, fix))
}

/// Definition spelling of a generator-reported name.
fn defined(grammar: &Grammar, name: &str) -> std::result::Result<String, GiveUpReason> {
    grammar
        .find_rule(name)
        .map(|rule| rule.name.clone())
        .ok_or_else(|| GiveUpReason::UnknownRule(name.to_string()))
}
