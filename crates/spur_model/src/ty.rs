//! Runtime type descriptors.

use serde::{Deserialize, Serialize};
use spur_common::TypeName;
use std::collections::BTreeSet;

/// The runtime type an entity is mapped to, with the members it declares.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedType {
    /// Fully-qualified type name.
    pub name: TypeName,
    /// Names of the fields the type declares.
    #[serde(default)]
    pub fields: BTreeSet<String>,
    /// Property names for which the type declares a getter/setter pair.
    #[serde(default)]
    pub accessors: BTreeSet<String>,
}

impl MappedType {
    /// Creates a mapped type with no members.
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeSet::new(),
            accessors: BTreeSet::new(),
        }
    }

    /// Declares a field.
    pub fn with_field(mut self, name: &str) -> Self {
        self.fields.insert(name.to_string());
        self
    }

    /// Declares a getter/setter pair.
    pub fn with_accessors(mut self, property: &str) -> Self {
        self.accessors.insert(property.to_string());
        self
    }
}

/// A mapped type seen together with its supertypes, most-derived first.
///
/// Member lookups consider inherited members, as property closures do.
#[derive(Clone, Debug)]
pub struct DeclaringType<'a> {
    lineage: Vec<&'a MappedType>,
}

impl<'a> DeclaringType<'a> {
    /// Builds a view from the most-derived type and its supertypes in order.
    ///
    /// # Panics
    ///
    /// Panics if `lineage` is empty.
    pub fn new(lineage: Vec<&'a MappedType>) -> Self {
        assert!(!lineage.is_empty(), "declaring type needs at least one mapped type");
        Self { lineage }
    }

    /// Returns the most-derived type's name.
    pub fn name(&self) -> &'a TypeName {
        &self.lineage[0].name
    }

    /// Returns `true` if the type or a supertype declares the field.
    pub fn has_field(&self, property: &str) -> bool {
        self.lineage.iter().any(|t| t.fields.contains(property))
    }

    /// Returns `true` if the type or a supertype declares a getter/setter pair.
    pub fn has_accessors(&self, property: &str) -> bool {
        self.lineage.iter().any(|t| t.accessors.contains(property))
    }
}

/// The identity a runtime caller asks for an optimizer with.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RuntimeType {
    /// Element type name.
    pub name: TypeName,
    /// Number of array dimensions; zero for plain object types.
    pub array_dimensions: u8,
}

impl RuntimeType {
    /// A plain object type.
    pub fn object(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            array_dimensions: 0,
        }
    }

    /// A one-dimensional array of `element`.
    pub fn array_of(element: impl Into<TypeName>) -> Self {
        Self {
            name: element.into(),
            array_dimensions: 1,
        }
    }

    /// Returns `true` for array types.
    pub fn is_array(&self) -> bool {
        self.array_dimensions > 0
    }
}
