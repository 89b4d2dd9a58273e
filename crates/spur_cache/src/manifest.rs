//! Manifest of the artifacts a build produced.
//!
//! Stored as `manifest.json` next to the artifacts in the build output so
//! later tooling can enumerate and verify them without re-running synthesis.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use spur_common::{ArtifactName, ContentHash};

use crate::error::CacheError;

/// Name of the manifest file within the output directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Every artifact written in one build, with its checksum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactManifest {
    /// Version of the tool that produced the artifacts.
    pub producer_version: String,

    /// Per-artifact state, keyed by canonical artifact name.
    pub artifacts: BTreeMap<ArtifactName, ArtifactEntry>,
}

/// Recorded state of a single artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    /// Content hash of the payload.
    pub checksum: ContentHash,

    /// Payload length in bytes.
    pub len: u64,
}

impl ArtifactManifest {
    /// Creates an empty manifest.
    pub fn new(producer_version: &str) -> Self {
        Self {
            producer_version: producer_version.to_string(),
            artifacts: BTreeMap::new(),
        }
    }

    /// Records one artifact payload.
    pub fn record(&mut self, name: ArtifactName, payload: &[u8]) {
        self.artifacts.insert(
            name,
            ArtifactEntry {
                checksum: ContentHash::from_bytes(payload),
                len: payload.len() as u64,
            },
        );
    }

    /// Returns `true` if the payload matches the recorded checksum.
    pub fn verify(&self, name: &ArtifactName, payload: &[u8]) -> bool {
        self.artifacts
            .get(name)
            .is_some_and(|e| e.checksum == ContentHash::from_bytes(payload))
    }

    /// Loads the manifest from an output directory, returning `None` if it is
    /// missing or unreadable.
    pub fn load(output_dir: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(output_dir.join(MANIFEST_FILE)).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Loads the manifest, reporting why it could not be read.
    pub fn load_strict(output_dir: &Path) -> Result<Self, CacheError> {
        let path = output_dir.join(MANIFEST_FILE);
        let content =
            std::fs::read_to_string(&path).map_err(|e| CacheError::Io { path, source: e })?;
        serde_json::from_str(&content).map_err(|e| CacheError::ManifestParse {
            reason: e.to_string(),
        })
    }

    /// Saves the manifest into an output directory, creating it if needed.
    pub fn save(&self, output_dir: &Path) -> Result<(), CacheError> {
        std::fs::create_dir_all(output_dir).map_err(|e| CacheError::Io {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        let json = serde_json::to_string_pretty(self).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;
        let path = output_dir.join(MANIFEST_FILE);
        std::fs::write(&path, json).map_err(|e| CacheError::Io { path, source: e })
    }
}
