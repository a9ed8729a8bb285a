//! Human-facing progress on stderr.

use std::path::{Path, PathBuf};

use abnf_sitter_core::Colors;
use abnf_sitter_lib::{Diagnostics, Reporter, Session};

use super::print_diagnostics;

/// Prints controller events for one grammar.
pub struct StderrReporter<'a> {
    source: &'a str,
    path: PathBuf,
    colors: Colors,
}

impl<'a> StderrReporter<'a> {
    pub fn new(source: &'a str, path: &Path, colors: Colors) -> Self {
        Self {
            source,
            path: path.to_path_buf(),
            colors,
        }
    }
}

impl Reporter for StderrReporter<'_> {
    fn translated(&mut self, _session: &Session, diagnostics: &Diagnostics) {
        print_diagnostics(diagnostics, self.source, &self.path, self.colors.is_enabled());
    }

    fn invoking(&mut self, attempt: usize, descriptor: &Path) {
        let c = self.colors;
        eprintln!(
            "{}attempt {attempt}{}: generating from {}{}{}",
            c.dim,
            c.reset,
            c.blue,
            descriptor.display(),
            c.reset
        );
    }

    fn failed(&mut self, _attempt: usize, output: &str) {
        let c = self.colors;
        for line in output.trim_end().lines() {
            eprintln!("  {}{line}{}", c.dim, c.reset);
        }
    }

    fn inlined(&mut self, rule: &str) {
        let c = self.colors;
        eprintln!("{}fix{}: inlining `{rule}`", c.green, c.reset);
    }

    fn conflict_added(&mut self, rules: &[String]) {
        let c = self.colors;
        eprintln!(
            "{}fix{}: declaring conflict [{}]",
            c.green,
            c.reset,
            rules.join(", ")
        );
    }
}
