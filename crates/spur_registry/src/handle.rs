//! Resolved constructor handles and per-type optimizer records.

use std::fmt;
use std::sync::OnceLock;

use spur_common::TypeName;

use crate::loader::{AccessorCtor, InstantiatorCtor};
use crate::optimizer::{AccessOptimizer, InstantiationOptimizer};

/// The resolved no-argument constructor of one type's synthesized
/// instantiation artifact.
///
/// Owned by exactly one [`OptimizerRecord`]. The optimizer it constructs is
/// created on first use of [`optimizer`](Self::optimizer) and shared after that.
pub struct InstantiatorHandle {
    type_name: TypeName,
    ctor: InstantiatorCtor,
    shared: OnceLock<Box<dyn InstantiationOptimizer>>,
}

impl InstantiatorHandle {
    pub(crate) fn new(type_name: TypeName, ctor: InstantiatorCtor) -> Self {
        Self {
            type_name,
            ctor,
            shared: OnceLock::new(),
        }
    }

    /// The original (unsuffixed) type the handle was resolved for.
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Returns the shared optimizer, constructing it on first call.
    pub fn optimizer(&self) -> &dyn InstantiationOptimizer {
        self.shared.get_or_init(|| (self.ctor)()).as_ref()
    }
}

impl fmt::Debug for InstantiatorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstantiatorHandle")
            .field("type_name", &self.type_name)
            .field("constructed", &self.shared.get().is_some())
            .finish()
    }
}

/// The resolved no-argument constructor of one type's synthesized accessor.
pub struct AccessorHandle {
    type_name: TypeName,
    ctor: AccessorCtor,
    shared: OnceLock<Box<dyn AccessOptimizer>>,
}

impl AccessorHandle {
    pub(crate) fn new(type_name: TypeName, ctor: AccessorCtor) -> Self {
        Self {
            type_name,
            ctor,
            shared: OnceLock::new(),
        }
    }

    /// The original (unsuffixed) type the handle was resolved for.
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Returns the shared accessor, constructing it on first call.
    pub fn optimizer(&self) -> &dyn AccessOptimizer {
        self.shared.get_or_init(|| (self.ctor)()).as_ref()
    }
}

impl fmt::Debug for AccessorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorHandle")
            .field("type_name", &self.type_name)
            .field("constructed", &self.shared.get().is_some())
            .finish()
    }
}

/// Everything the registry knows about one type.
///
/// Either half may be absent. A record with neither means the caller has to
/// fall back to generic reflection.
#[derive(Debug, Default)]
pub struct OptimizerRecord {
    /// The instantiation optimizer constructor.
    pub instantiator: Option<InstantiatorHandle>,
    /// The bulk property accessor constructor.
    pub accessor: Option<AccessorHandle>,
}

impl OptimizerRecord {
    /// Returns `true` if neither optimizer is available.
    pub fn is_empty(&self) -> bool {
        self.instantiator.is_none() && self.accessor.is_none()
    }
}
