//! Persistent property descriptors.

use serde::{Deserialize, Serialize};

/// One persistent property of an entity or component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Property name.
    pub name: String,
    /// Whether the value is stored directly or derived from a collection owner.
    #[serde(default)]
    pub kind: PropertyKind,
    /// Access strategy declared on the property itself.
    #[serde(default)]
    pub strategy: Option<BuiltinStrategy>,
    /// Identifier of an access strategy to look up by name.
    #[serde(default)]
    pub accessor: Option<String>,
}

impl Property {
    /// A plain stored property with no declared strategy.
    pub fn basic(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: PropertyKind::Basic,
            strategy: None,
            accessor: None,
        }
    }

    /// A back-reference to the owner of `collection_role` on `entity_name`.
    pub fn backref(name: &str, collection_role: &str, entity_name: &str) -> Self {
        Self {
            kind: PropertyKind::Backref(BackReference::new(collection_role, entity_name)),
            ..Self::basic(name)
        }
    }

    /// The list-index counterpart of [`Property::backref`].
    pub fn index_backref(name: &str, collection_role: &str, entity_name: &str) -> Self {
        Self {
            kind: PropertyKind::IndexBackref(BackReference::new(collection_role, entity_name)),
            ..Self::basic(name)
        }
    }

    /// Declares a strategy on the property.
    pub fn with_strategy(mut self, strategy: BuiltinStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Names an accessor strategy to resolve by identifier.
    pub fn with_accessor(mut self, identifier: &str) -> Self {
        self.accessor = Some(identifier.to_string());
        self
    }
}

/// How a property's value is held.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    /// Stored on the instance.
    #[default]
    Basic,
    /// Derived from the owning side of a collection.
    Backref(BackReference),
    /// Index within the owning side of a list collection.
    IndexBackref(BackReference),
}

/// The collection a back-reference property is derived from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackReference {
    /// Role of the owning collection, e.g. `shop.Order.lines`.
    pub collection_role: String,
    /// Entity that owns the collection.
    pub entity_name: String,
}

impl BackReference {
    /// Creates a back-reference descriptor.
    pub fn new(collection_role: &str, entity_name: &str) -> Self {
        Self {
            collection_role: collection_role.to_string(),
            entity_name: entity_name.to_string(),
        }
    }
}

/// Access strategies every selector understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinStrategy {
    /// Read and write the field directly.
    Field,
    /// Go through the getter/setter pair.
    Property,
    /// Use whichever member is present, preferring the getter/setter pair.
    Mixed,
    /// The property has no backing member; reads yield nothing, writes are dropped.
    Noop,
}

impl BuiltinStrategy {
    /// Parses a built-in strategy identifier.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        match identifier {
            "field" => Some(Self::Field),
            "property" => Some(Self::Property),
            "mixed" => Some(Self::Mixed),
            "noop" => Some(Self::Noop),
            _ => None,
        }
    }
}
