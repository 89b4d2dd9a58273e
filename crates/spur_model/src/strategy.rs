//! Resolved access strategies.
//!
//! An [`AccessStrategy`] carries everything a synthesized accessor needs to
//! read and write one property without going through generic reflection.

use serde::{Deserialize, Serialize};
use spur_common::TypeName;
use std::fmt;

/// The member a mixed strategy reads and writes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Member {
    /// The field.
    Field,
    /// The getter/setter pair.
    Accessors,
}

/// How one property is read and written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum AccessStrategy {
    /// Direct field access.
    Field {
        /// Type the property is accessed on.
        declaring_type: TypeName,
        /// Property name.
        property: String,
    },
    /// Getter/setter pair access.
    Accessors {
        /// Type the property is accessed on.
        declaring_type: TypeName,
        /// Property name.
        property: String,
    },
    /// Whichever member is present, fixed at resolution time.
    Mixed {
        /// Type the property is accessed on.
        declaring_type: TypeName,
        /// Property name.
        property: String,
        /// The member chosen.
        member: Member,
    },
    /// No backing member.
    Noop {
        /// Property name.
        property: String,
    },
    /// A custom strategy registered under an identifier.
    Named {
        /// Identifier the strategy was resolved from.
        identifier: String,
        /// Type the property is accessed on.
        declaring_type: TypeName,
        /// Property name.
        property: String,
    },
    /// Value taken from the owner of a collection.
    Backref {
        /// Property name.
        property: String,
        /// Role of the owning collection.
        collection_role: String,
        /// Entity owning the collection.
        entity_name: String,
    },
    /// Position within the owner's list collection.
    IndexBackref {
        /// Property name.
        property: String,
        /// Role of the owning collection.
        collection_role: String,
        /// Entity owning the collection.
        entity_name: String,
    },
}

impl AccessStrategy {
    /// Returns the property this strategy accesses.
    pub fn property(&self) -> &str {
        match self {
            AccessStrategy::Field { property, .. }
            | AccessStrategy::Accessors { property, .. }
            | AccessStrategy::Mixed { property, .. }
            | AccessStrategy::Noop { property }
            | AccessStrategy::Named { property, .. }
            | AccessStrategy::Backref { property, .. }
            | AccessStrategy::IndexBackref { property, .. } => property.as_str(),
        }
    }

    /// Returns the `(collection role, owning entity)` pair of a back-reference
    /// strategy.
    pub fn owner(&self) -> Option<(&str, &str)> {
        match self {
            AccessStrategy::Backref {
                collection_role,
                entity_name,
                ..
            }
            | AccessStrategy::IndexBackref {
                collection_role,
                entity_name,
                ..
            } => Some((collection_role.as_str(), entity_name.as_str())),
            _ => None,
        }
    }
}

impl fmt::Display for AccessStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessStrategy::Field { .. } => write!(f, "field"),
            AccessStrategy::Accessors { .. } => write!(f, "property"),
            AccessStrategy::Mixed { member, .. } => match member {
                Member::Field => write!(f, "mixed(field)"),
                Member::Accessors => write!(f, "mixed(property)"),
            },
            AccessStrategy::Noop { .. } => write!(f, "noop"),
            AccessStrategy::Named { identifier, .. } => write!(f, "named({identifier})"),
            AccessStrategy::Backref {
                collection_role, ..
            } => write!(f, "backref({collection_role})"),
            AccessStrategy::IndexBackref {
                collection_role, ..
            } => write!(f, "index-backref({collection_role})"),
        }
    }
}
