//! The external parser generator.

use std::path::Path;
use std::process::Command;

use crate::{Error, Result};

/// What one generator run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorRun {
    pub success: bool,
    /// Diagnostic text, drained in full before the run is reported.
    pub output: String,
}

impl GeneratorRun {
    pub fn success() -> Self {
        Self {
            success: true,
            output: String::new(),
        }
    }

    pub fn failure(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
        }
    }
}

/// Runs the generator against a descriptor file that has already been written.
pub trait Generator {
    /// `descriptor` is a file name relative to `location`, the working directory.
    fn generate(&mut self, location: &Path, descriptor: &str) -> Result<GeneratorRun>;
}

/// Runs a command with the descriptor file name appended, e.g. `tree-sitter generate grammar.js`.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
}

impl CommandGenerator {
    pub fn new(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| Error::Config("generator command is empty".into()))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for CommandGenerator {
    fn default() -> Self {
        Self {
            program: "tree-sitter".into(),
            args: vec!["generate".into()],
        }
    }
}

impl Generator for CommandGenerator {
    fn generate(&mut self, location: &Path, descriptor: &str) -> Result<GeneratorRun> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(descriptor)
            .current_dir(location)
            .output()
            .map_err(|source| Error::GeneratorSpawn {
                command: self.command_line(),
                source,
            })?;

        // The generator writes diagnostics to stderr; fall back to stdout for
        // wrappers that redirect it.
        let stderr = String::from_utf8_lossy(&output.stderr);
        let text = if stderr.trim().is_empty() {
            String::from_utf8_lossy(&output.stdout).into_owned()
        } else {
            stderr.into_owned()
        };

        Ok(GeneratorRun {
            success: output.status.success(),
            output: text,
        })
    }
}
