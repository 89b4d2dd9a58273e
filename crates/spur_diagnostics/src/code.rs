//! Diagnostic codes prefixed by the build phase that raises them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The build phase a diagnostic originates from, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Phase {
    /// Artifact caching, prefixed with `C`.
    Cache,
    /// Metadata scanning and access-strategy resolution, prefixed with `S`.
    Scan,
    /// Registry construction, prefixed with `R`.
    Registry,
    /// Runtime provider, prefixed with `P`.
    Provider,
}

impl Phase {
    /// Returns the single-character prefix for this phase.
    pub fn prefix(self) -> char {
        match self {
            Phase::Cache => 'C',
            Phase::Scan => 'S',
            Phase::Registry => 'R',
            Phase::Provider => 'P',
        }
    }
}

/// A phase prefix plus a numeric identifier, displayed as e.g. `C101`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The phase this diagnostic belongs to.
    pub phase: Phase,
    /// The numeric identifier within the phase.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub const fn new(phase: Phase, number: u16) -> Self {
        Self { phase, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.phase.prefix(), self.number)
    }
}

/// Well-known codes raised by the build pipeline.
pub mod codes {
    use super::{DiagnosticCode, Phase};

    /// The same artifact name was written twice in one build.
    pub const DUPLICATE_ARTIFACT_WRITE: DiagnosticCode = DiagnosticCode::new(Phase::Cache, 101);
    /// A stored artifact is missing, unreadable or fails its checksum.
    pub const CORRUPT_ARTIFACT: DiagnosticCode = DiagnosticCode::new(Phase::Cache, 102);
    /// The build output holds an artifact the manifest does not list.
    pub const STALE_ARTIFACT: DiagnosticCode = DiagnosticCode::new(Phase::Cache, 103);
    /// No access strategy could be determined for a property.
    pub const STRATEGY_RESOLUTION: DiagnosticCode = DiagnosticCode::new(Phase::Scan, 201);
    /// An embeddable component was prepared but has no registry entry.
    pub const UNREGISTERED_COMPONENT: DiagnosticCode = DiagnosticCode::new(Phase::Scan, 202);
    /// The type model is malformed (unknown superclass, cyclic hierarchy, duplicate entity).
    pub const MALFORMED_MODEL: DiagnosticCode = DiagnosticCode::new(Phase::Scan, 203);
    /// A synthesized artifact could not be located or loaded.
    pub const ARTIFACT_RESOLUTION: DiagnosticCode = DiagnosticCode::new(Phase::Registry, 301);
    /// An accessor artifact disagrees with the scanned property order.
    pub const LAYOUT_MISMATCH: DiagnosticCode = DiagnosticCode::new(Phase::Registry, 302);
    /// An optimizer was requested before the registry was installed.
    pub const UNINITIALIZED_PROVIDER: DiagnosticCode = DiagnosticCode::new(Phase::Provider, 401);
}
