//! Error types for cache operations.

use std::path::PathBuf;

use spur_common::ArtifactName;

/// Errors that can occur during cache operations.
///
/// Reads are fail-safe and never produce these: a corrupt or missing artifact
/// is a cache miss.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The same artifact name was written twice in one build.
    ///
    /// Only returned in validation mode, and only after the second write has
    /// been stored and forwarded.
    #[error("artifact {name} was already synthesized and cached in this build")]
    DuplicateArtifactWrite {
        /// The artifact written twice.
        name: ArtifactName,
    },

    /// An I/O error occurred while reading or writing the build output.
    #[error("artifact I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The artifact manifest could not be parsed as valid JSON.
    #[error("failed to parse artifact manifest: {reason}")]
    ManifestParse {
        /// Description of the parse failure.
        reason: String,
    },

    /// A header could not be encoded.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}
