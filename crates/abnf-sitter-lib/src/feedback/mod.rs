//! Diagnostic-feedback generation.
//!
//! States: `Idle` → `Invoking` → `Done`, or `Invoking` → `Diagnosing`, which
//! either loops back to `Idle` with a repaired session or ends in `GivenUp`.
//!
//! Automatic repairs:
//! - a rule matching the empty string is inlined
//! - a conflict the generator asks for is declared
//!
//! Precedence and associativity requests stop the loop with guidance.

mod classify;
mod controller;
mod generator;

#[cfg(test)]
mod classify_tests;
#[cfg(test)]
mod controller_tests;

pub use classify::{GeneratorDiagnostic, classify};
pub use controller::{
    Controller, GenerationReport, GiveUp, GiveUpReason, Outcome, Reporter, SilentReporter, Width,
};
pub use generator::{CommandGenerator, Generator, GeneratorRun};
