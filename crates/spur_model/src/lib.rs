//! The boot-time type model consumed by the metadata scanner.
//!
//! The model describes mapped entity types (their runtime type, members and
//! property closure) and embeddable components. It is produced outside this
//! workspace; [`BootModel`] is a serde-loadable implementation of the
//! [`TypeModel`] contract.

#![warn(missing_docs)]

pub mod entity;
pub mod error;
pub mod model;
pub mod property;
pub mod strategy;
pub mod ty;

pub use entity::{Component, EntityBinding};
pub use error::ModelError;
pub use model::{BootModel, TypeModel};
pub use property::{BackReference, BuiltinStrategy, Property, PropertyKind};
pub use strategy::{AccessStrategy, Member};
pub use ty::{DeclaringType, MappedType, RuntimeType};
