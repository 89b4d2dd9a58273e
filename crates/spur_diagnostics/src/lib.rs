//! Structured build diagnostics.
//!
//! Build phases report defects (duplicate artifact writes, unresolvable access
//! strategies, missing synthesized artifacts) as [`Diagnostic`]s. The
//! thread-safe [`DiagnosticSink`] accumulates them across parallel build steps
//! and [`TerminalRenderer`] formats them for the CLI.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{codes, DiagnosticCode, Phase};
pub use diagnostic::Diagnostic;
pub use renderer::TerminalRenderer;
pub use severity::Severity;
pub use sink::DiagnosticSink;
