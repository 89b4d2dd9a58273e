//! The type-model contract and its serde-loadable implementation.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entity::{Component, EntityBinding};
use crate::error::ModelError;
use crate::property::Property;

/// Read access to entity bindings plus the component preparation hook.
///
/// Iteration order is the model's declaration order.
pub trait TypeModel {
    /// All entity bindings.
    fn entity_bindings(&self) -> &[EntityBinding];

    /// Calls `visitor` on every embeddable component, allowing it to prepare
    /// the component.
    fn visit_components(&mut self, visitor: &mut dyn FnMut(&mut Component));

    /// Looks up an entity binding by entity name.
    fn entity(&self, entity_name: &str) -> Option<&EntityBinding> {
        self.entity_bindings()
            .iter()
            .find(|e| e.entity_name == entity_name)
    }

    /// Returns `entity` followed by its superclass entities, most-derived first.
    fn lineage<'a>(&'a self, entity: &'a EntityBinding) -> Result<Vec<&'a EntityBinding>, ModelError> {
        let mut chain = vec![entity];
        let mut current = entity;
        while let Some(superclass) = &current.superclass {
            let next = self
                .entity(superclass)
                .ok_or_else(|| ModelError::UnknownSuperclass {
                    entity: current.entity_name.clone(),
                    superclass: superclass.clone(),
                })?;
            if chain.iter().any(|e| e.entity_name == next.entity_name) {
                return Err(ModelError::CyclicHierarchy(entity.entity_name.clone()));
            }
            chain.push(next);
            current = next;
        }
        Ok(chain)
    }

    /// Returns the full property closure of `entity`: inherited properties
    /// first (root-most superclass first), then its own, each in declaration
    /// order.
    fn property_closure<'a>(&'a self, entity: &'a EntityBinding) -> Result<Vec<&'a Property>, ModelError> {
        let lineage = self.lineage(entity)?;
        Ok(lineage
            .iter()
            .rev()
            .flat_map(|e| e.properties.iter())
            .collect())
    }
}

/// A type model held in memory, loadable from JSON.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BootModel {
    /// Entity bindings in declaration order.
    #[serde(default)]
    pub entities: Vec<EntityBinding>,
    /// Embeddable components in declaration order.
    #[serde(default)]
    pub components: Vec<Component>,
}

impl BootModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity binding.
    pub fn with_entity(mut self, entity: EntityBinding) -> Self {
        self.entities.push(entity);
        self
    }

    /// Adds an embeddable component.
    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Parses a model from JSON and checks that entity names are unique.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let model: BootModel =
            serde_json::from_str(json).map_err(|e| ModelError::Parse(e.to_string()))?;
        let mut seen = HashSet::new();
        for entity in &model.entities {
            if !seen.insert(entity.entity_name.as_str()) {
                return Err(ModelError::DuplicateEntity(entity.entity_name.clone()));
            }
        }
        Ok(model)
    }

    /// Loads a JSON model file.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl TypeModel for BootModel {
    fn entity_bindings(&self) -> &[EntityBinding] {
        &self.entities
    }

    fn visit_components(&mut self, visitor: &mut dyn FnMut(&mut Component)) {
        for component in &mut self.components {
            visitor(component);
        }
    }
}
