//! Errors raised while synthesizing artifacts and building the registry.

use spur_cache::CacheError;
use spur_common::{ArtifactName, TypeName};
use spur_diagnostics::{codes, Diagnostic};

/// Why a synthesized type could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No symbol of that name is known to the loader.
    #[error("symbol `{symbol}` not found")]
    NotFound {
        /// The symbol looked up.
        symbol: String,
    },

    /// The artifact behind the symbol is in neither the cache nor the build output.
    #[error("artifact {artifact} was never emitted")]
    ArtifactMissing {
        /// The missing artifact.
        artifact: ArtifactName,
    },

    /// The symbol was found but has no no-argument constructor.
    #[error("symbol `{symbol}` has no no-argument constructor")]
    NoConstructor {
        /// The symbol looked up.
        symbol: String,
    },

    /// The symbol's constructor builds a different kind of optimizer.
    #[error("symbol `{symbol}` does not construct an {expected}")]
    WrongKind {
        /// The symbol looked up.
        symbol: String,
        /// The optimizer kind that was expected.
        expected: &'static str,
    },
}

/// Errors that abort registry construction. No partial registry is returned.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A synthesized artifact's constructor could not be resolved.
    #[error("could not resolve the optimizer for `{type_name}` from {artifact}")]
    ArtifactResolution {
        /// The original (unsuffixed) type name.
        type_name: TypeName,
        /// The artifact that was looked up.
        artifact: ArtifactName,
        /// The loader failure.
        #[source]
        source: LoadError,
    },

    /// A synthesized accessor addresses properties in a different order than
    /// the scan planned.
    #[error("accessor for `{type_name}` has layout {actual:?}, planned {expected:?}")]
    LayoutMismatch {
        /// The type whose accessor disagrees.
        type_name: TypeName,
        /// Property order from the scan.
        expected: Vec<String>,
        /// Property order reported by the accessor.
        actual: Vec<String>,
    },
}

impl RegistryError {
    /// Converts the error into a diagnostic for build reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            RegistryError::ArtifactResolution {
                type_name,
                artifact,
                source,
            } => Diagnostic::error(
                codes::ARTIFACT_RESOLUTION,
                format!("synthesized optimizer for `{type_name}` could not be resolved"),
            )
            .with_subject(artifact.as_str())
            .with_note(source.to_string())
            .with_help("an earlier build phase failed to synthesize this artifact"),
            RegistryError::LayoutMismatch { type_name, .. } => {
                Diagnostic::error(codes::LAYOUT_MISMATCH, self.to_string())
                    .with_subject(type_name.as_str())
                    .with_help("the scanner and the synthesizer must use the same property order")
            }
        }
    }
}

/// Errors raised while driving the synthesizer.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    /// Writing an artifact through the cache failed.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The synthesizer could not produce code for a type.
    #[error("could not synthesize optimizer for `{type_name}`: {reason}")]
    Failed {
        /// The type being synthesized.
        type_name: TypeName,
        /// Why synthesis failed.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn resolution_error_names_type_and_keeps_cause() {
        let err = RegistryError::ArtifactResolution {
            type_name: TypeName::new("shop.Order"),
            artifact: ArtifactName::new("shop.Order$SpurInstantiator"),
            source: LoadError::NotFound {
                symbol: "shop.Order$SpurInstantiator".to_string(),
            },
        };
        assert!(err.to_string().contains("`shop.Order`"));
        assert!(err.source().unwrap().to_string().contains("not found"));

        let diag = err.to_diagnostic();
        assert_eq!(diag.subject.as_deref(), Some("shop/Order$SpurInstantiator"));
        assert_eq!(diag.code.to_string(), "R301");
    }
}
