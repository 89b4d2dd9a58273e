//! The host service that owns the registry for the life of the process.

use std::sync::Arc;

use spur_registry::OptimizerRegistry;

use crate::error::ProviderError;
use crate::provider::RuntimeProvider;

/// Owns the [`RuntimeProvider`] and the registry it serves.
///
/// Created before startup, started once with the registry computed at build
/// time, and kept alive until shutdown. Callers borrow the provider from it.
#[derive(Debug, Default)]
pub struct OptimizerService {
    provider: RuntimeProvider,
}

impl OptimizerService {
    /// Creates a service whose provider is still uninitialized.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `registry` and starts serving it.
    pub fn start(&self, registry: OptimizerRegistry) -> Result<(), ProviderError> {
        self.provider.install(Arc::new(registry))
    }

    /// The provider callers look optimizers up through.
    pub fn provider(&self) -> &RuntimeProvider {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spur_common::TypeName;
    use spur_model::RuntimeType;
    use spur_registry::{ArtifactNaming, SymbolTable};

    #[test]
    fn started_service_serves_lookups() {
        let service = OptimizerService::new();
        assert!(service
            .provider()
            .optimizer_for(&RuntimeType::object("shop.Order"))
            .is_err());

        let empty: [TypeName; 0] = [];
        let registry =
            OptimizerRegistry::build(&empty, &SymbolTable::new(), &ArtifactNaming::default())
                .unwrap();
        service.start(registry).unwrap();

        assert!(service
            .provider()
            .optimizer_for(&RuntimeType::object("shop.Order"))
            .unwrap()
            .is_none());
    }
}
