//! On-disk build output for synthesized artifacts.
//!
//! Each artifact is written to `<output_dir>/<dotted name>.art` behind a
//! header holding magic bytes, the format version, the producing tool version
//! and a checksum of the payload.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use spur_common::{ArtifactName, ContentHash};
use tracing::debug;

use crate::error::CacheError;
use crate::manifest::ArtifactManifest;
use crate::sink::{ArtifactLookup, ArtifactSink};

/// Magic bytes identifying a spur artifact file.
const ARTIFACT_MAGIC: [u8; 4] = *b"SPUR";

/// Current artifact file format version.
const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// File extension of artifact files.
const ARTIFACT_EXT: &str = "art";

/// Header prepended to every stored artifact for validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactHeader {
    /// Magic bytes: must be `b"SPUR"`.
    pub magic: [u8; 4],

    /// Artifact file format version.
    pub format_version: u32,

    /// Version of the tool that produced this artifact.
    pub producer_version: String,

    /// Content hash of the payload.
    pub checksum: ContentHash,
}

/// Directory-backed [`ArtifactSink`] holding the build output.
pub struct ArtifactStore {
    output_dir: PathBuf,
    producer_version: String,
}

impl ArtifactStore {
    /// Creates a store rooted at `output_dir`. Nothing is created on disk
    /// until the first write.
    pub fn new(output_dir: &Path, producer_version: &str) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            producer_version: producer_version.to_string(),
        }
    }

    /// Returns the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the file path for an artifact.
    pub fn artifact_path(&self, name: &ArtifactName) -> PathBuf {
        self.output_dir
            .join(format!("{}.{ARTIFACT_EXT}", name.dotted()))
    }

    fn encode(&self, payload: &[u8]) -> Result<Vec<u8>, CacheError> {
        let header = ArtifactHeader {
            magic: ARTIFACT_MAGIC,
            format_version: ARTIFACT_FORMAT_VERSION,
            producer_version: self.producer_version.clone(),
            checksum: ContentHash::from_bytes(payload),
        };
        let header_bytes = bincode::serde::encode_to_vec(&header, bincode::config::standard())
            .map_err(|e| CacheError::Serialization {
                reason: e.to_string(),
            })?;

        // 4-byte header length (little-endian) + header + payload
        let header_len = header_bytes.len() as u32;
        let mut output = Vec::with_capacity(4 + header_bytes.len() + payload.len());
        output.extend_from_slice(&header_len.to_le_bytes());
        output.extend_from_slice(&header_bytes);
        output.extend_from_slice(payload);
        Ok(output)
    }

    /// Reads an artifact, validating its header.
    ///
    /// Returns `None` if the file doesn't exist, the header is invalid, the
    /// format version doesn't match, or the checksum doesn't verify.
    pub fn read_artifact(&self, name: &ArtifactName) -> Option<Vec<u8>> {
        let raw = std::fs::read(self.artifact_path(name)).ok()?;
        if raw.len() < 4 {
            return None;
        }

        let header_len = u32::from_le_bytes(raw[..4].try_into().ok()?) as usize;
        if raw.len() < 4 + header_len {
            return None;
        }

        let header: ArtifactHeader =
            bincode::serde::decode_from_slice(&raw[4..4 + header_len], bincode::config::standard())
                .ok()?
                .0;

        if header.magic != ARTIFACT_MAGIC || header.format_version != ARTIFACT_FORMAT_VERSION {
            return None;
        }

        let payload = &raw[4 + header_len..];
        if ContentHash::from_bytes(payload) != header.checksum {
            return None;
        }

        Some(payload.to_vec())
    }

    /// Lists the artifact names present in the output directory.
    pub fn list(&self) -> Result<Vec<ArtifactName>, CacheError> {
        if !self.output_dir.exists() {
            return Ok(Vec::new());
        }
        let entries = std::fs::read_dir(&self.output_dir).map_err(|e| CacheError::Io {
            path: self.output_dir.clone(),
            source: e,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| CacheError::Io {
                    path: self.output_dir.clone(),
                    source: e,
                })?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some(ARTIFACT_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(ArtifactName::new(stem));
            }
        }
        names.sort();
        Ok(names)
    }

    /// Removes artifacts left behind by earlier builds.
    ///
    /// Any artifact file not listed in `manifest` is deleted, so a stale
    /// artifact can't stand in for one this build failed to synthesize.
    /// Returns the number of files removed.
    pub fn prune(&self, manifest: &ArtifactManifest) -> Result<usize, CacheError> {
        let mut removed = 0;
        for name in self.list()? {
            if manifest.artifacts.contains_key(&name) {
                continue;
            }
            let path = self.artifact_path(&name);
            std::fs::remove_file(&path).map_err(|e| CacheError::Io { path, source: e })?;
            removed += 1;
        }
        Ok(removed)
    }
}

impl ArtifactSink for ArtifactStore {
    fn write(&self, name: &ArtifactName, payload: &[u8]) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| CacheError::Io {
            path: self.output_dir.clone(),
            source: e,
        })?;
        let path = self.artifact_path(name);
        let output = self.encode(payload)?;
        std::fs::write(&path, &output).map_err(|e| CacheError::Io { path, source: e })?;
        debug!(artifact = %name, dir = %self.output_dir.display(), "stored artifact");
        Ok(())
    }
}

impl ArtifactLookup for ArtifactStore {
    fn class_data(&self, name: &str) -> Option<Vec<u8>> {
        self.read_artifact(&ArtifactName::new(name))
    }
}
