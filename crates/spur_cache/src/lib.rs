//! Caching of synthesized artifacts.
//!
//! Every artifact the optimizer synthesizer emits passes through an
//! [`ArtifactCache`], which keeps a copy keyed by artifact name and forwards
//! the write to the underlying [`ArtifactSink`]. Later build phases read the
//! payload back through [`ArtifactLookup`] without re-running the writer.
//! [`ArtifactStore`] is the on-disk sink holding the build output.

#![warn(missing_docs)]

pub mod cache;
pub mod error;
pub mod manifest;
pub mod sink;
pub mod store;

pub use cache::{ArtifactCache, WriteMode};
pub use error::CacheError;
pub use manifest::{ArtifactEntry, ArtifactManifest};
pub use sink::{ArtifactLookup, ArtifactSink, NullSink};
pub use store::ArtifactStore;
