//! JSON configuration for batch generation.
//!
//! ```json
//! {
//!   "generator": ["tree-sitter", "generate"],
//!   "format": "js",
//!   "grammars": [
//!     { "source": "uri.abnf", "location": "out/uri", "start": "URI-reference", "core_rules": true }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assemble::OutputFormat;
use crate::session::Session;
use crate::{Error, Result};

pub const DEFAULT_MAX_ATTEMPTS: usize = 64;

fn default_generator() -> Vec<String> {
    vec!["tree-sitter".to_string(), "generate".to_string()]
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

/// One grammar to translate and generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrammarConfig {
    /// ABNF source file.
    pub source: PathBuf,
    /// Directory the descriptor is written to and the generator runs in.
    pub location: PathBuf,
    /// Rule the generated `source_file` forwards to.
    pub start: String,
    /// Language name. Defaults to the source file stem.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub core_rules: bool,
    #[serde(default)]
    pub hidden: Vec<String>,
    #[serde(default)]
    pub inline: Vec<String>,
    #[serde(default)]
    pub conflicts: Vec<Vec<String>>,
}

impl GrammarConfig {
    pub fn new(source: impl Into<PathBuf>, location: impl Into<PathBuf>, start: &str) -> Self {
        Self {
            source: source.into(),
            location: location.into(),
            start: start.to_string(),
            name: None,
            core_rules: false,
            hidden: Vec::new(),
            inline: Vec::new(),
            conflicts: Vec::new(),
        }
    }

    /// Language name: explicit, or the source file stem.
    pub fn language_name(&self) -> Result<String> {
        if let Some(name) = &self.name {
            return Ok(name.clone());
        }
        self.source
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                Error::Config(format!(
                    "cannot derive a grammar name from `{}`",
                    self.source.display()
                ))
            })
    }

    /// Initial session for this grammar.
    pub fn session(&self) -> Result<Session> {
        Ok(
            Session::new(&self.location, self.language_name()?, &self.start)
                .with_core_rules(self.core_rules)
                .with_hidden(&self.hidden)
                .with_inline(&self.inline)
                .with_conflicts(&self.conflicts),
        )
    }

    fn resolve_paths(&mut self, base: &Path) {
        self.source = base.join(&self.source);
        self.location = base.join(&self.location);
    }
}

/// Generator settings plus the grammars to process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Generator command and arguments; the descriptor file name is appended.
    #[serde(default = "default_generator")]
    pub generator: Vec<String>,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    pub grammars: Vec<GrammarConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generator: default_generator(),
            format: OutputFormat::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            grammars: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Load a configuration file. Relative paths resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            Error::Config(format!("cannot read `{}`: {err}", path.display()))
        })?;
        let mut config = Self::from_json(&text)?;
        let base = path.parent().unwrap_or(Path::new(""));
        for grammar in &mut config.grammars {
            grammar.resolve_paths(base);
        }
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.generator.is_empty() {
            return Err(Error::Config("`generator` must name a command".into()));
        }
        if self.max_attempts == 0 {
            return Err(Error::Config("`max_attempts` must be at least 1".into()));
        }
        if self.format == OutputFormat::Descriptor {
            return Err(Error::Config(
                "`descriptor` output is not generator input; use `js` or `json`".into(),
            ));
        }
        Ok(())
    }
}
