//! Ordered property-access plans.

use serde::Serialize;
use spur_common::TypeName;
use spur_config::PropertyOrder;
use spur_model::AccessStrategy;

/// For one entity type, the ordered map from property name to access strategy.
///
/// The order is the positional layout the synthesized accessor expects, so a
/// plan is immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PropertyAccessPlan {
    type_name: TypeName,
    entity_name: String,
    order: PropertyOrder,
    entries: Vec<(String, AccessStrategy)>,
}

impl PropertyAccessPlan {
    /// Builds a plan from strategies listed in property-closure order.
    ///
    /// A property appearing again later in the closure (a redeclaration)
    /// replaces the earlier strategy but keeps its position.
    pub fn new(
        type_name: TypeName,
        entity_name: &str,
        order: PropertyOrder,
        strategies: Vec<AccessStrategy>,
    ) -> Self {
        let mut entries: Vec<(String, AccessStrategy)> = Vec::with_capacity(strategies.len());
        for strategy in strategies {
            let name = strategy.property().to_string();
            match entries.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = strategy,
                None => entries.push((name, strategy)),
            }
        }
        if order == PropertyOrder::Sorted {
            entries.sort_by(|a, b| a.0.cmp(&b.0));
        }
        Self {
            type_name,
            entity_name: entity_name.to_string(),
            order,
            entries,
        }
    }

    /// The mapped type the plan belongs to.
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// The entity name the type is bound under.
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// The ordering policy the plan was built with.
    pub fn order(&self) -> PropertyOrder {
        self.order
    }

    /// Looks up the strategy for a property.
    pub fn get(&self, property: &str) -> Option<&AccessStrategy> {
        self.entries
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, strategy)| strategy)
    }

    /// Property names in plan order.
    pub fn property_names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Iterates `(property, strategy)` pairs in plan order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AccessStrategy)> {
        self.entries.iter().map(|(name, s)| (name.as_str(), s))
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` for a type with no persistent properties.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
