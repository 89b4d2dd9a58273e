//! The write and read contracts around the cache.

use std::sync::Arc;

use spur_common::ArtifactName;

use crate::error::CacheError;

/// Destination for synthesized artifacts.
///
/// Implementations must tolerate concurrent writes of distinct names from
/// independent build steps.
pub trait ArtifactSink: Send + Sync {
    /// Writes one artifact payload.
    fn write(&self, name: &ArtifactName, payload: &[u8]) -> Result<(), CacheError>;
}

impl<T: ArtifactSink + ?Sized> ArtifactSink for &T {
    fn write(&self, name: &ArtifactName, payload: &[u8]) -> Result<(), CacheError> {
        (**self).write(name, payload)
    }
}

impl<T: ArtifactSink + ?Sized> ArtifactSink for Arc<T> {
    fn write(&self, name: &ArtifactName, payload: &[u8]) -> Result<(), CacheError> {
        (**self).write(name, payload)
    }
}

/// Read access to synthesized artifacts by name.
///
/// Names may be given in dotted or path-separated spelling.
pub trait ArtifactLookup {
    /// Returns the raw payload of an artifact, or `None` if it is unknown.
    fn class_data(&self, name: &str) -> Option<Vec<u8>>;

    /// Returns `true` if the artifact is known.
    fn contains(&self, name: &str) -> bool {
        self.class_data(name).is_some()
    }
}

/// A sink that drops every payload. Useful when the cache itself is the only
/// consumer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ArtifactSink for NullSink {
    fn write(&self, _name: &ArtifactName, _payload: &[u8]) -> Result<(), CacheError> {
        Ok(())
    }
}
