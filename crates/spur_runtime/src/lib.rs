//! Serving build-time optimizers at run time.
//!
//! The [`RuntimeProvider`] answers "which optimizer handles this type" from
//! an [`OptimizerRegistry`](spur_registry::OptimizerRegistry) computed at
//! build time. It never synthesizes code and never touches the artifact
//! cache; an absent answer tells the caller to use generic reflection.

#![warn(missing_docs)]

pub mod error;
pub mod provider;
pub mod service;

pub use error::ProviderError;
pub use provider::RuntimeProvider;
pub use service::OptimizerService;
