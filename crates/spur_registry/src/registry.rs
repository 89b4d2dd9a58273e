//! The immutable type → optimizer map.

use std::fmt;

use spur_access::ScanOutput;
use spur_common::{ArtifactName, TypeId, TypeIndex, TypeInterner, TypeName};
use tracing::{debug, info};

use crate::error::{LoadError, RegistryError};
use crate::handle::{AccessorHandle, InstantiatorHandle, OptimizerRecord};
use crate::loader::{Constructor, TypeLoader};
use crate::naming::ArtifactNaming;

/// Build-time computed mapping from type name to [`OptimizerRecord`].
///
/// Built once after all synthesis for a build has finished and never mutated
/// afterwards, so lookups need no synchronization.
pub struct OptimizerRegistry {
    index: TypeIndex,
    records: Vec<OptimizerRecord>,
}

impl OptimizerRegistry {
    /// Resolves the synthesized optimizers of every type in `types`.
    ///
    /// The instantiation artifact is mandatory: if it cannot be resolved the
    /// whole build fails with [`RegistryError::ArtifactResolution`] naming the
    /// type, and no registry is returned. The accessor artifact is optional;
    /// a type without one is registered with an instantiator only.
    pub fn build<'t, L, I>(
        types: I,
        loader: &L,
        naming: &ArtifactNaming,
    ) -> Result<Self, RegistryError>
    where
        L: TypeLoader + ?Sized,
        I: IntoIterator<Item = &'t TypeName>,
    {
        let interner = TypeInterner::new();
        let mut records = Vec::new();

        for type_name in types {
            let id = interner.intern(type_name);
            if id.index() < records.len() {
                debug!(ty = %type_name, "type listed twice, keeping first registration");
                continue;
            }

            let instantiator = resolve_instantiator(type_name, loader, naming)?;
            let accessor = resolve_accessor(type_name, loader, naming)?;
            debug!(
                ty = %type_name,
                accessor = accessor.is_some(),
                "registered optimizer"
            );
            records.push(OptimizerRecord {
                instantiator: Some(instantiator),
                accessor,
            });
        }

        let index = interner.freeze();
        info!(types = records.len(), "optimizer registry built");
        Ok(Self { index, records })
    }

    /// Builds the registry for every entity type planned by a scan.
    pub fn from_scan<L: TypeLoader + ?Sized>(
        scan: &ScanOutput,
        loader: &L,
        naming: &ArtifactNaming,
    ) -> Result<Self, RegistryError> {
        Self::build(scan.plans.iter().map(|p| p.type_name()), loader, naming)
    }

    /// Looks up the optimizers of a type by its dotted name.
    ///
    /// Returns `None` for an unknown type or one with no usable optimizer.
    pub fn optimizer_for(&self, type_name: &str) -> Option<&OptimizerRecord> {
        let id = self.index.get(type_name)?;
        self.records.get(id.index()).filter(|r| !r.is_empty())
    }

    /// Returns the dense identity of a registered type.
    pub fn id_of(&self, type_name: &str) -> Option<TypeId> {
        self.index.get(type_name)
    }

    /// Looks up the optimizers of a type by identity.
    pub fn record(&self, id: TypeId) -> Option<&OptimizerRecord> {
        self.records.get(id.index())
    }

    /// Iterates the registered type names in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.index.names()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no type is registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exercises every registered optimizer against the scan.
    ///
    /// Each instantiator creates one instance, and each accessor must report
    /// its properties in the order the scan planned.
    pub fn verify(&self, scan: &ScanOutput) -> Result<(), RegistryError> {
        for plan in &scan.plans {
            let Some(record) = self.optimizer_for(plan.type_name().as_str()) else {
                continue;
            };
            if let Some(instantiator) = &record.instantiator {
                drop(instantiator.optimizer().new_instance());
            }
            let Some(accessor) = &record.accessor else {
                continue;
            };
            let expected: Vec<String> =
                plan.property_names().into_iter().map(str::to_string).collect();
            let actual = accessor.optimizer().property_names();
            if expected != actual {
                return Err(RegistryError::LayoutMismatch {
                    type_name: plan.type_name().clone(),
                    expected,
                    actual,
                });
            }
        }
        debug!(types = scan.plans.len(), "optimizer layouts verified");
        Ok(())
    }
}

impl fmt::Debug for OptimizerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptimizerRegistry")
            .field("types", &self.records.len())
            .finish()
    }
}

fn resolve_instantiator<L: TypeLoader + ?Sized>(
    type_name: &TypeName,
    loader: &L,
    naming: &ArtifactNaming,
) -> Result<InstantiatorHandle, RegistryError> {
    let artifact = naming.instantiator(type_name);
    let symbol = artifact.dotted();
    let fail = |source| RegistryError::ArtifactResolution {
        type_name: type_name.clone(),
        artifact: artifact.clone(),
        source,
    };

    let loaded = loader.resolve(&symbol).map_err(fail)?;
    match loaded.constructor {
        Some(Constructor::Instantiator(ctor)) => {
            Ok(InstantiatorHandle::new(type_name.clone(), ctor))
        }
        Some(Constructor::Accessor(_)) => Err(fail(LoadError::WrongKind {
            symbol,
            expected: "instantiation optimizer",
        })),
        None => Err(fail(LoadError::NoConstructor { symbol })),
    }
}

fn resolve_accessor<L: TypeLoader + ?Sized>(
    type_name: &TypeName,
    loader: &L,
    naming: &ArtifactNaming,
) -> Result<Option<AccessorHandle>, RegistryError> {
    let artifact: ArtifactName = naming.accessor(type_name);
    let symbol = artifact.dotted();
    let fail = |source| RegistryError::ArtifactResolution {
        type_name: type_name.clone(),
        artifact: artifact.clone(),
        source,
    };

    match loader.resolve(&symbol) {
        Ok(loaded) => match loaded.constructor {
            Some(Constructor::Accessor(ctor)) => {
                Ok(Some(AccessorHandle::new(type_name.clone(), ctor)))
            }
            Some(Constructor::Instantiator(_)) => Err(fail(LoadError::WrongKind {
                symbol,
                expected: "access optimizer",
            })),
            None => Err(fail(LoadError::NoConstructor { symbol })),
        },
        Err(LoadError::NotFound { .. } | LoadError::ArtifactMissing { .. }) => Ok(None),
        Err(other) => Err(fail(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{ArtifactCheckedLoader, SymbolTable};
    use crate::optimizer::{AccessOptimizer, InstantiationOptimizer, Value};
    use spur_access::{DefaultSelector, Scanner};
    use spur_cache::{ArtifactCache, NullSink, WriteMode};
    use spur_config::PropertyOrder;
    use spur_model::{BootModel, EntityBinding, MappedType, Property};
    use std::any::Any;
    use std::error::Error;

    struct Order {
        id: u64,
    }

    struct OrderInstantiator;

    impl InstantiationOptimizer for OrderInstantiator {
        fn new_instance(&self) -> Box<dyn Any + Send> {
            Box::new(Order { id: 0 })
        }
    }

    fn order_instantiator() -> Box<dyn InstantiationOptimizer> {
        Box::new(OrderInstantiator)
    }

    struct OrderAccessor(&'static [&'static str]);

    impl AccessOptimizer for OrderAccessor {
        fn property_names(&self) -> Vec<String> {
            self.0.iter().map(|s| s.to_string()).collect()
        }

        fn get_property_values(&self, target: &dyn Any) -> Vec<Value> {
            let order = target.downcast_ref::<Order>().unwrap();
            vec![Box::new(order.id)]
        }

        fn set_property_values(&self, target: &mut dyn Any, mut values: Vec<Value>) {
            let order = target.downcast_mut::<Order>().unwrap();
            order.id = *values.remove(0).downcast::<u64>().unwrap();
        }
    }

    fn order_accessor() -> Box<dyn AccessOptimizer> {
        Box::new(OrderAccessor(&["id"]))
    }

    fn misordered_accessor() -> Box<dyn AccessOptimizer> {
        Box::new(OrderAccessor(&["total", "id"]))
    }

    fn names(list: &[&str]) -> Vec<TypeName> {
        list.iter().map(|n| TypeName::new(*n)).collect()
    }

    #[test]
    fn present_and_absent_types() {
        let table = SymbolTable::new()
            .with_instantiator("shop.Order$SpurInstantiator", order_instantiator)
            .with_accessor("shop.Order$SpurAccessor", order_accessor);
        let registry =
            OptimizerRegistry::build(&names(&["shop.Order"]), &table, &ArtifactNaming::default())
                .unwrap();

        let record = registry.optimizer_for("shop.Order").unwrap();
        let instance = record.instantiator.as_ref().unwrap().optimizer().new_instance();
        assert!(instance.downcast_ref::<Order>().is_some());

        let accessor = record.accessor.as_ref().unwrap().optimizer();
        let mut order = Order { id: 1 };
        accessor.set_property_values(&mut order, vec![Box::new(42u64)]);
        let values = accessor.get_property_values(&order);
        assert_eq!(values[0].downcast_ref::<u64>(), Some(&42));

        assert!(registry.optimizer_for("shop.Customer").is_none());
        assert!(registry.optimizer_for("shop.Order$SpurInstantiator").is_none());
    }

    #[test]
    fn accessor_artifact_is_optional() {
        let table =
            SymbolTable::new().with_instantiator("shop.Order$SpurInstantiator", order_instantiator);
        let registry =
            OptimizerRegistry::build(&names(&["shop.Order"]), &table, &ArtifactNaming::default())
                .unwrap();
        let record = registry.optimizer_for("shop.Order").unwrap();
        assert!(record.instantiator.is_some());
        assert!(record.accessor.is_none());
    }

    #[test]
    fn missing_instantiator_aborts_and_names_the_type() {
        let table =
            SymbolTable::new().with_instantiator("shop.Order$SpurInstantiator", order_instantiator);
        let err = OptimizerRegistry::build(
            &names(&["shop.Order", "shop.Customer"]),
            &table,
            &ArtifactNaming::default(),
        )
        .unwrap_err();

        match &err {
            RegistryError::ArtifactResolution {
                type_name,
                artifact,
                ..
            } => {
                assert_eq!(type_name.as_str(), "shop.Customer");
                assert_eq!(artifact.dotted(), "shop.Customer$SpurInstantiator");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            err.source().unwrap().downcast_ref::<LoadError>(),
            Some(LoadError::NotFound { .. })
        ));
    }

    #[test]
    fn instantiator_without_constructor_is_fatal() {
        let table = SymbolTable::new().with_opaque("shop.Order$SpurInstantiator");
        let err =
            OptimizerRegistry::build(&names(&["shop.Order"]), &table, &ArtifactNaming::default())
                .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::ArtifactResolution {
                source: LoadError::NoConstructor { .. },
                ..
            }
        ));
    }

    #[test]
    fn accessor_symbol_without_constructor_is_fatal() {
        let table = SymbolTable::new()
            .with_instantiator("shop.Order$SpurInstantiator", order_instantiator)
            .with_opaque("shop.Order$SpurAccessor");
        assert!(OptimizerRegistry::build(
            &names(&["shop.Order"]),
            &table,
            &ArtifactNaming::default()
        )
        .is_err());
    }

    #[test]
    fn swapped_constructor_kinds_are_rejected() {
        let table = SymbolTable::new()
            .with_accessor("shop.Order$SpurInstantiator", order_accessor);
        let err =
            OptimizerRegistry::build(&names(&["shop.Order"]), &table, &ArtifactNaming::default())
                .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::ArtifactResolution {
                source: LoadError::WrongKind { .. },
                ..
            }
        ));
    }

    #[test]
    fn unemitted_artifact_fails_through_checked_loader() {
        let table =
            SymbolTable::new().with_instantiator("shop.Order$SpurInstantiator", order_instantiator);
        let cache = ArtifactCache::new(NullSink, WriteMode::Validate);
        let loader = ArtifactCheckedLoader::new(&cache, &table);

        let err =
            OptimizerRegistry::build(&names(&["shop.Order"]), &loader, &ArtifactNaming::default())
                .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::ArtifactResolution {
                source: LoadError::ArtifactMissing { .. },
                ..
            }
        ));

        cache.write("shop/Order$SpurInstantiator", b"code").unwrap();
        assert!(
            OptimizerRegistry::build(&names(&["shop.Order"]), &loader, &ArtifactNaming::default())
                .is_ok()
        );
    }

    #[test]
    fn ids_are_dense_in_registration_order() {
        let table = SymbolTable::new()
            .with_instantiator("shop.Order$SpurInstantiator", order_instantiator)
            .with_instantiator("shop.Customer$SpurInstantiator", order_instantiator);
        let registry = OptimizerRegistry::build(
            &names(&["shop.Order", "shop.Customer", "shop.Order"]),
            &table,
            &ArtifactNaming::default(),
        )
        .unwrap();

        assert_eq!(registry.len(), 2);
        let id = registry.id_of("shop.Customer").unwrap();
        assert_eq!(id.index(), 1);
        assert!(registry.record(id).is_some());
        assert_eq!(
            registry.type_names().collect::<Vec<_>>(),
            vec!["shop.Order", "shop.Customer"]
        );
    }

    fn scanned() -> ScanOutput {
        let mut model = BootModel::new().with_entity(
            EntityBinding::new(MappedType::new("shop.Order").with_field("id"))
                .with_property(Property::basic("id")),
        );
        let selector = DefaultSelector::new();
        Scanner::new(&selector, PropertyOrder::Sorted)
            .scan(&mut model)
            .unwrap()
    }

    #[test]
    fn verify_accepts_matching_layout() {
        let scan = scanned();
        let table = SymbolTable::new()
            .with_instantiator("shop.Order$SpurInstantiator", order_instantiator)
            .with_accessor("shop.Order$SpurAccessor", order_accessor);
        let registry =
            OptimizerRegistry::from_scan(&scan, &table, &ArtifactNaming::default()).unwrap();
        registry.verify(&scan).unwrap();
    }

    #[test]
    fn verify_rejects_layout_mismatch() {
        let scan = scanned();
        let table = SymbolTable::new()
            .with_instantiator("shop.Order$SpurInstantiator", order_instantiator)
            .with_accessor("shop.Order$SpurAccessor", misordered_accessor);
        let registry =
            OptimizerRegistry::from_scan(&scan, &table, &ArtifactNaming::default()).unwrap();
        let err = registry.verify(&scan).unwrap_err();
        match err {
            RegistryError::LayoutMismatch {
                expected, actual, ..
            } => {
                assert_eq!(expected, vec!["id"]);
                assert_eq!(actual, vec!["total", "id"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
