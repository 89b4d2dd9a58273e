//! Walks the type model and plans property access per entity type.

use spur_common::TypeName;
use spur_config::PropertyOrder;
use spur_diagnostics::{codes, Diagnostic, Severity};
use spur_model::{DeclaringType, TypeModel};
use tracing::{debug, info};

use crate::error::ScanError;
use crate::plan::PropertyAccessPlan;
use crate::resolver::resolve_strategy;
use crate::selector::StrategySelector;

/// Registration state of a scanned embeddable component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ComponentState {
    /// Property order finalized; no plan or registry entry is built for it.
    Unregistered,
}

/// An embeddable component seen by the scanner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannedComponent {
    /// The component's type name.
    pub type_name: TypeName,
    /// Property names in their finalized order.
    pub property_order: Vec<String>,
    /// Registration state.
    pub state: ComponentState,
}

impl ScannedComponent {
    /// Describes the component as a note-level diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(
            Severity::Note,
            codes::UNREGISTERED_COMPONENT,
            "embeddable prepared without an optimizer; generic reflection applies",
        )
        .with_subject(self.type_name.as_str())
    }
}

/// Result of one scan.
#[derive(Clone, Debug, Default)]
pub struct ScanOutput {
    /// One plan per entity type, in model declaration order.
    pub plans: Vec<PropertyAccessPlan>,
    /// Every embeddable component, prepared.
    pub components: Vec<ScannedComponent>,
}

impl ScanOutput {
    /// Looks up the plan of a type.
    pub fn plan(&self, type_name: &str) -> Option<&PropertyAccessPlan> {
        self.plans.iter().find(|p| p.type_name().as_str() == type_name)
    }
}

/// Builds property-access plans from a type model.
pub struct Scanner<'s> {
    selector: &'s dyn StrategySelector,
    order: PropertyOrder,
}

impl<'s> Scanner<'s> {
    /// Creates a scanner resolving named strategies through `selector`.
    pub fn new(selector: &'s dyn StrategySelector, order: PropertyOrder) -> Self {
        Self { selector, order }
    }

    /// Scans every entity binding, then prepares every embeddable component.
    ///
    /// The first property whose strategy cannot be resolved aborts the scan.
    pub fn scan<M: TypeModel + ?Sized>(&self, model: &mut M) -> Result<ScanOutput, ScanError> {
        let mut plans = Vec::with_capacity(model.entity_bindings().len());
        for entity in model.entity_bindings() {
            let lineage = model.lineage(entity)?;
            let declaring = DeclaringType::new(lineage.iter().map(|e| &e.mapped_type).collect());

            let strategies = model
                .property_closure(entity)?
                .into_iter()
                .map(|property| resolve_strategy(property, &declaring, self.selector))
                .collect::<Result<Vec<_>, _>>()?;

            let plan = PropertyAccessPlan::new(
                entity.type_name().clone(),
                &entity.entity_name,
                self.order,
                strategies,
            );
            debug!(
                entity = %entity.entity_name,
                properties = plan.len(),
                "planned property access"
            );
            plans.push(plan);
        }

        let mut components = Vec::new();
        model.visit_components(&mut |component| {
            component.prepare();
            components.push(ScannedComponent {
                type_name: component.type_name.clone(),
                property_order: component.property_order(),
                state: ComponentState::Unregistered,
            });
        });

        info!(
            entities = plans.len(),
            components = components.len(),
            "scanned type model"
        );
        Ok(ScanOutput { plans, components })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::DefaultSelector;
    use spur_model::{
        AccessStrategy, BootModel, Component, EntityBinding, MappedType, Member, Property,
    };

    fn model() -> BootModel {
        BootModel::new()
            .with_entity(
                EntityBinding::new(MappedType::new("shop.Base").with_field("id"))
                    .with_property(Property::basic("id")),
            )
            .with_entity(
                EntityBinding::new(
                    MappedType::new("shop.Order")
                        .with_field("total")
                        .with_accessors("status"),
                )
                .extending("shop.Base")
                .with_property(Property::basic("total"))
                .with_property(Property::basic("status"))
                .with_property(Property::backref(
                    "_linesBackref",
                    "shop.Customer.orders",
                    "shop.Customer",
                )),
            )
            .with_component(Component::new(
                "shop.Address",
                vec![Property::basic("zip"), Property::basic("city")],
            ))
    }

    #[test]
    fn plans_are_sorted_by_name() {
        let selector = DefaultSelector::new();
        let output = Scanner::new(&selector, PropertyOrder::Sorted)
            .scan(&mut model())
            .unwrap();

        let order = output.plan("shop.Order").unwrap();
        assert_eq!(
            order.property_names(),
            vec!["_linesBackref", "id", "status", "total"]
        );
        assert_eq!(output.plans.len(), 2);
    }

    #[test]
    fn declared_order_follows_closure() {
        let selector = DefaultSelector::new();
        let output = Scanner::new(&selector, PropertyOrder::Declared)
            .scan(&mut model())
            .unwrap();

        let order = output.plan("shop.Order").unwrap();
        assert_eq!(
            order.property_names(),
            vec!["id", "total", "status", "_linesBackref"]
        );
    }

    #[test]
    fn inherited_property_resolves_against_supertype_members() {
        let selector = DefaultSelector::new();
        let output = Scanner::new(&selector, PropertyOrder::Sorted)
            .scan(&mut model())
            .unwrap();

        let id = output.plan("shop.Order").unwrap().get("id").unwrap();
        assert_eq!(
            id,
            &AccessStrategy::Mixed {
                declaring_type: TypeName::new("shop.Order"),
                property: "id".to_string(),
                member: Member::Field,
            }
        );
    }

    #[test]
    fn backref_plan_entry_carries_owner() {
        let selector = DefaultSelector::new();
        let output = Scanner::new(&selector, PropertyOrder::Sorted)
            .scan(&mut model())
            .unwrap();

        let backref = output
            .plan("shop.Order")
            .unwrap()
            .get("_linesBackref")
            .unwrap();
        assert_eq!(backref.owner(), Some(("shop.Customer.orders", "shop.Customer")));
    }

    #[test]
    fn components_are_prepared_but_unregistered() {
        let selector = DefaultSelector::new();
        let mut model = model();
        let output = Scanner::new(&selector, PropertyOrder::Sorted)
            .scan(&mut model)
            .unwrap();

        assert_eq!(output.components.len(), 1);
        let address = &output.components[0];
        assert_eq!(address.state, ComponentState::Unregistered);
        assert_eq!(address.property_order, vec!["city", "zip"]);
        assert!(model.components[0].is_prepared());
        assert!(output.plan("shop.Address").is_none());
    }

    #[test]
    fn unresolvable_property_aborts_scan() {
        let selector = DefaultSelector::new();
        let mut model = BootModel::new().with_entity(
            EntityBinding::new(MappedType::new("shop.Order"))
                .with_property(Property::basic("ghost")),
        );
        let err = Scanner::new(&selector, PropertyOrder::Sorted)
            .scan(&mut model)
            .unwrap_err();
        assert!(err.to_string().contains("shop.Order#ghost"));
    }

    #[test]
    fn broken_hierarchy_aborts_scan() {
        let selector = DefaultSelector::new();
        let mut model = BootModel::new()
            .with_entity(EntityBinding::new(MappedType::new("shop.Order")).extending("shop.Gone"));
        let err = Scanner::new(&selector, PropertyOrder::Sorted)
            .scan(&mut model)
            .unwrap_err();
        assert!(matches!(err, ScanError::Model(_)));
    }
}
