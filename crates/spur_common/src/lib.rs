//! Shared foundational types used across the spur build pipeline.
//!
//! This crate provides type and artifact names, content hashing of synthesized
//! payloads, and the interned type identities that key the runtime registry.

#![warn(missing_docs)]

pub mod hash;
pub mod ident;
pub mod name;

pub use hash::ContentHash;
pub use ident::{TypeId, TypeIndex, TypeInterner};
pub use name::{ArtifactName, TypeName};
