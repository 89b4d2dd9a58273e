//! Runtime provider errors.

use spur_diagnostics::{codes, Diagnostic};

/// Misuse of the [`RuntimeProvider`](crate::RuntimeProvider) state machine.
///
/// Both variants are programming errors in the host, never user-facing
/// conditions. An unknown type is not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// An optimizer was requested before the registry was installed.
    #[error("optimizer for `{type_name}` requested before the registry was installed")]
    Uninitialized {
        /// The type that was asked for.
        type_name: String,
    },

    /// A second registry was installed.
    #[error("the optimizer registry is already installed")]
    AlreadyInitialized,
}

impl ProviderError {
    /// Converts the error into a diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(codes::UNINITIALIZED_PROVIDER, self.to_string());
        match self {
            ProviderError::Uninitialized { type_name } => diag
                .with_subject(type_name.as_str())
                .with_help("install the registry during startup, before serving requests"),
            ProviderError::AlreadyInitialized => diag,
        }
    }
}
