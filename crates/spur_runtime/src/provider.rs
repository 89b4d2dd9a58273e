//! The two-state runtime provider.

use std::sync::{Arc, OnceLock};

use spur_model::RuntimeType;
use spur_registry::{OptimizerRecord, OptimizerRegistry};
use tracing::{debug, info};

use crate::error::ProviderError;

/// Serves optimizers from an installed [`OptimizerRegistry`].
///
/// Starts uninitialized; [`install`](Self::install) moves it to serving
/// exactly once. Lookups after that read the immutable registry without
/// locking.
#[derive(Debug, Default)]
pub struct RuntimeProvider {
    registry: OnceLock<Arc<OptimizerRegistry>>,
}

impl RuntimeProvider {
    /// Creates an uninitialized provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider that is already serving `registry`.
    pub fn serving(registry: Arc<OptimizerRegistry>) -> Self {
        let provider = Self::new();
        // A fresh cell cannot already be set.
        let _ = provider.registry.set(registry);
        provider
    }

    /// Hands the build-computed registry to the provider.
    pub fn install(&self, registry: Arc<OptimizerRegistry>) -> Result<(), ProviderError> {
        let types = registry.len();
        self.registry
            .set(registry)
            .map_err(|_| ProviderError::AlreadyInitialized)?;
        info!(types, "optimizer provider serving");
        Ok(())
    }

    /// Returns `true` once a registry has been installed.
    pub fn is_serving(&self) -> bool {
        self.registry.get().is_some()
    }

    /// Returns the installed registry.
    pub fn registry(&self) -> Option<&Arc<OptimizerRegistry>> {
        self.registry.get()
    }

    /// Looks up the optimizers for `ty`.
    ///
    /// `Ok(None)` means "use generic reflection": the type is unknown, has no
    /// optimizer, or is an array type, which this provider always declines.
    /// Asking before a registry is installed is an error.
    pub fn optimizer_for(&self, ty: &RuntimeType) -> Result<Option<&OptimizerRecord>, ProviderError> {
        let registry = self
            .registry
            .get()
            .ok_or_else(|| ProviderError::Uninitialized {
                type_name: ty.name.to_string(),
            })?;
        if ty.is_array() {
            debug!(ty = %ty.name, dimensions = ty.array_dimensions, "declining array type");
            return Ok(None);
        }
        Ok(registry.optimizer_for(ty.name.as_str()))
    }

    /// Lookup by explicit getter and setter names.
    ///
    /// Optimizers are only ever produced for whole types, so this always
    /// answers with generic reflection.
    pub fn optimizer_for_accessors(
        &self,
        _ty: &RuntimeType,
        _getters: &[&str],
        _setters: &[&str],
    ) -> Option<&OptimizerRecord> {
        None
    }
}
