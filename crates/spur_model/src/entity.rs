//! Entity bindings and embeddable components.

use serde::{Deserialize, Serialize};
use spur_common::TypeName;

use crate::property::Property;
use crate::ty::MappedType;

/// A mapped entity type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBinding {
    /// Entity name, unique within the model.
    pub entity_name: String,
    /// The runtime type the entity is mapped to.
    pub mapped_type: MappedType,
    /// Entity name of the mapped superclass, if any.
    #[serde(default)]
    pub superclass: Option<String>,
    /// Properties declared directly on this entity, in declaration order.
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl EntityBinding {
    /// Creates a binding whose entity name is the mapped type's name.
    pub fn new(mapped_type: MappedType) -> Self {
        Self {
            entity_name: mapped_type.name.to_string(),
            mapped_type,
            superclass: None,
            properties: Vec::new(),
        }
    }

    /// Declares the superclass entity.
    pub fn extending(mut self, superclass: &str) -> Self {
        self.superclass = Some(superclass.to_string());
        self
    }

    /// Appends a declared property.
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Returns the mapped type's name.
    pub fn type_name(&self) -> &TypeName {
        &self.mapped_type.name
    }
}

/// An embeddable component type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// The component's type name.
    pub type_name: TypeName,
    /// The component's properties.
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(skip)]
    prepared: bool,
}

impl Component {
    /// Creates an unprepared component.
    pub fn new(type_name: impl Into<TypeName>, properties: Vec<Property>) -> Self {
        Self {
            type_name: type_name.into(),
            properties,
            prepared: false,
        }
    }

    /// Finalizes the property order (sorted by name). Idempotent.
    pub fn prepare(&mut self) {
        if self.prepared {
            return;
        }
        self.properties.sort_by(|a, b| a.name.cmp(&b.name));
        self.prepared = true;
    }

    /// Returns `true` once [`prepare`](Self::prepare) has run.
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Returns the property names in their current order.
    pub fn property_order(&self) -> Vec<String> {
        self.properties.iter().map(|p| p.name.clone()).collect()
    }
}
