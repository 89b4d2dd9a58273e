//! Errors raised while scanning the type model.

use spur_common::TypeName;
use spur_diagnostics::{codes, Diagnostic};
use spur_model::ModelError;

/// Errors that abort a scan.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// No access strategy could be determined for a property.
    #[error("could not resolve property access for `{declaring_type}#{property}`: {reason}")]
    StrategyResolution {
        /// The type declaring the property.
        declaring_type: TypeName,
        /// The property name.
        property: String,
        /// Why resolution failed.
        reason: String,
    },

    /// The type model is malformed.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ScanError {
    /// Converts the error into a diagnostic for build reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ScanError::StrategyResolution {
                declaring_type,
                property,
                reason,
            } => Diagnostic::error(codes::STRATEGY_RESOLUTION, "could not resolve property access")
                .with_subject(format!("{declaring_type}#{property}"))
                .with_note(reason.clone()),
            ScanError::Model(err) => Diagnostic::error(codes::MALFORMED_MODEL, err.to_string()),
        }
    }
}
