//! Access-strategy resolution and entity metadata scanning.
//!
//! The [`Scanner`] walks a [`TypeModel`](spur_model::TypeModel) and produces
//! one [`PropertyAccessPlan`] per entity type: an ordered map from property
//! name to the [`AccessStrategy`](spur_model::AccessStrategy) the synthesized
//! accessor uses for it. Embeddable components are prepared but not planned.

#![warn(missing_docs)]

pub mod error;
pub mod plan;
pub mod resolver;
pub mod scanner;
pub mod selector;

pub use error::ScanError;
pub use plan::PropertyAccessPlan;
pub use resolver::resolve_strategy;
pub use scanner::{ComponentState, ScanOutput, ScannedComponent, Scanner};
pub use selector::{DefaultSelector, Selected, StrategySelector};
