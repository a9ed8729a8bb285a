//! Translate, run the generator, and apply automatic fixes until it succeeds.

use std::path::PathBuf;

use abnf_sitter_core::Colors;
use abnf_sitter_lib::{
    CommandGenerator, Config, Controller, GenerationReport, GiveUp, GiveUpReason, GrammarConfig,
    OutputFormat, Outcome, Session, read_source,
};

use super::reporter::StderrReporter;
use super::{CommandError, EXIT_GIVEN_UP, fail, parse_grammar};

pub enum GenerateInput {
    Config(PathBuf),
    Grammar(GrammarConfig),
}

pub struct GenerateArgs {
    pub input: GenerateInput,
    pub format: Option<OutputFormat>,
    pub generator: Option<Vec<String>>,
    pub max_attempts: Option<usize>,
    pub color: bool,
}

pub fn run(args: GenerateArgs) {
    let colors = Colors::new(args.color);
    let config = resolve_config(args).unwrap_or_else(|e| fail(e, colors));
    let generator = CommandGenerator::new(&config.generator).unwrap_or_else(|e| fail(e, colors));

    let mut status = 0;
    for grammar in &config.grammars {
        let code = match generate(grammar, &config, generator.clone(), colors) {
            Ok((initial, Outcome::Done(report))) => {
                print_done(grammar, &initial, &report, colors);
                0
            }
            Ok((_, Outcome::GivenUp(give_up))) => {
                print_given_up(grammar, &give_up, colors);
                EXIT_GIVEN_UP
            }
            Err(e) => {
                eprintln!("{}error{}: {}", colors.red, colors.reset, e);
                1
            }
        };
        status = worst_status(status, code);
    }

    if status != 0 {
        std::process::exit(status);
    }
}

/// Configuration file or single grammar, with command-line overrides applied.
pub fn resolve_config(args: GenerateArgs) -> Result<Config, CommandError> {
    let mut config = match args.input {
        GenerateInput::Config(path) => Config::load(&path)?,
        GenerateInput::Grammar(grammar) => Config {
            grammars: vec![grammar],
            ..Config::default()
        },
    };
    if let Some(generator) = args.generator {
        config.generator = generator;
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(max_attempts) = args.max_attempts {
        config.max_attempts = max_attempts;
    }
    Ok(config)
}

/// Fatal errors outrank a give-up, which outranks success.
pub fn worst_status(current: i32, next: i32) -> i32 {
    if current == 1 || next == 1 {
        1
    } else {
        current.max(next)
    }
}

fn generate(
    grammar: &GrammarConfig,
    config: &Config,
    generator: CommandGenerator,
    colors: Colors,
) -> Result<(Session, Outcome), CommandError> {
    let source = read_source(&grammar.source)?;
    let abnf = parse_grammar(&source, &grammar.source, colors.is_enabled())?;
    let session = grammar.session()?;

    let mut controller = Controller::new(generator)
        .with_format(config.format)
        .with_max_attempts(config.max_attempts);
    let mut reporter = StderrReporter::new(&source, &grammar.source, colors);
    let outcome = controller.run(&abnf, session.clone(), &mut reporter)?;
    Ok((session, outcome))
}

fn print_done(grammar: &GrammarConfig, initial: &Session, report: &GenerationReport, colors: Colors) {
    let c = colors;
    eprintln!(
        "{}generated{} {}{}{} after {} attempt{} (widest line {}, {} bytes)",
        c.green,
        c.reset,
        c.blue,
        grammar.location.display(),
        c.reset,
        report.attempts,
        if report.attempts == 1 { "" } else { "s" },
        report.width.max_line,
        report.width.bytes
    );

    let inlined: Vec<&str> = report
        .session
        .inline_rules()
        .filter(|rule| !initial.is_inline(rule))
        .collect();
    let conflicts: Vec<String> = report
        .session
        .conflicts()
        .filter(|group| !initial.conflicts().any(|known| known == *group))
        .map(|group| format!("[{}]", group.join(", ")))
        .collect();
    if !inlined.is_empty() || !conflicts.is_empty() {
        eprintln!(
            "{}note{}: add these to the grammar's configuration to skip the retries",
            c.yellow, c.reset
        );
        if !inlined.is_empty() {
            eprintln!("  inline: {}", inlined.join(", "));
        }
        if !conflicts.is_empty() {
            eprintln!("  conflicts: {}", conflicts.join(", "));
        }
    }
}

fn print_given_up(grammar: &GrammarConfig, give_up: &GiveUp, colors: Colors) {
    let c = colors;
    eprintln!(
        "{}gave up{} on {}{}{}: {}",
        c.red,
        c.reset,
        c.blue,
        grammar.source.display(),
        c.reset,
        give_up.reason
    );
    match &give_up.reason {
        GiveUpReason::Actionable(_) => eprintln!(
            "{}help{}: precedence and associativity need `prec` annotations, which ABNF cannot express; edit the generated grammar or restructure the rule",
            c.yellow, c.reset
        ),
        GiveUpReason::Unrecognized => eprintln!(
            "{}help{}: the generator output above is shown unchanged",
            c.yellow, c.reset
        ),
        _ => {}
    }
}
