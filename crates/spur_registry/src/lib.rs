//! Build-time synthesis contract and the optimizer registry.
//!
//! After the scan, an external [`OptimizerSynthesizer`] emits one
//! instantiation artifact (and optionally an accessor artifact) per plan into
//! the artifact cache. Once synthesis has finished, [`OptimizerRegistry::build`]
//! resolves each artifact's constructor through a [`TypeLoader`] and freezes
//! the result into an immutable type → [`OptimizerRecord`] map.

#![warn(missing_docs)]

pub mod error;
pub mod handle;
pub mod loader;
pub mod naming;
pub mod optimizer;
pub mod registry;
pub mod synth;

pub use error::{LoadError, RegistryError, SynthesisError};
pub use handle::{AccessorHandle, InstantiatorHandle, OptimizerRecord};
pub use loader::{
    AccessorCtor, ArtifactCheckedLoader, Constructor, InstantiatorCtor, LoadedType, SymbolTable,
    TypeLoader,
};
pub use naming::ArtifactNaming;
pub use optimizer::{AccessOptimizer, InstantiationOptimizer, Value};
pub use registry::OptimizerRegistry;
pub use synth::{synthesize_all, OptimizerSynthesizer, Synthesized};
