//! How serious a build defect is.
//!
//! A release build tolerates a duplicate artifact write as a warning. Anything
//! that stops a phase is an error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a [`Diagnostic`](crate::Diagnostic), ordered from least to most severe.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// Additional context that does not indicate a problem.
    Note,
    /// A defect that the build tolerates, e.g. a duplicate write outside validation mode.
    Warning,
    /// A defect that aborts the build step that raised it.
    Error,
}

impl Severity {
    /// Returns `true` if this severity is [`Error`](Severity::Error).
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Note => write!(f, "note"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}
