//! Picks the access strategy for one property.
//!
//! First match wins:
//! 1. a strategy declared on the property;
//! 2. a non-empty accessor identifier, looked up in the [`StrategySelector`];
//! 3. a back-reference property;
//! 4. an index back-reference property;
//! 5. the mixed strategy.

use spur_model::{
    AccessStrategy, BackReference, BuiltinStrategy, DeclaringType, Member, Property, PropertyKind,
};

use crate::error::ScanError;
use crate::selector::{Selected, StrategySelector};

/// Resolves the [`AccessStrategy`] for `property` on `declaring`.
pub fn resolve_strategy(
    property: &Property,
    declaring: &DeclaringType<'_>,
    selector: &dyn StrategySelector,
) -> Result<AccessStrategy, ScanError> {
    let accessor = property.accessor.as_deref().filter(|id| !id.is_empty());

    let resolved = if let Some(builtin) = property.strategy {
        builtin_strategy(builtin, property, declaring)
    } else if let Some(identifier) = accessor {
        match selector.resolve(identifier) {
            Some(Selected::Builtin(builtin)) => builtin_strategy(builtin, property, declaring),
            Some(Selected::Custom) => Ok(AccessStrategy::Named {
                identifier: identifier.to_string(),
                declaring_type: declaring.name().clone(),
                property: property.name.clone(),
            }),
            None => Err(format!("unknown access strategy '{identifier}'")),
        }
    } else {
        match &property.kind {
            PropertyKind::Backref(BackReference {
                collection_role,
                entity_name,
            }) => Ok(AccessStrategy::Backref {
                property: property.name.clone(),
                collection_role: collection_role.clone(),
                entity_name: entity_name.clone(),
            }),
            PropertyKind::IndexBackref(BackReference {
                collection_role,
                entity_name,
            }) => Ok(AccessStrategy::IndexBackref {
                property: property.name.clone(),
                collection_role: collection_role.clone(),
                entity_name: entity_name.clone(),
            }),
            PropertyKind::Basic => builtin_strategy(BuiltinStrategy::Mixed, property, declaring),
        }
    };

    resolved.map_err(|reason| ScanError::StrategyResolution {
        declaring_type: declaring.name().clone(),
        property: property.name.clone(),
        reason,
    })
}

fn builtin_strategy(
    builtin: BuiltinStrategy,
    property: &Property,
    declaring: &DeclaringType<'_>,
) -> Result<AccessStrategy, String> {
    let name = property.name.as_str();
    let declaring_type = declaring.name().clone();
    match builtin {
        BuiltinStrategy::Field if declaring.has_field(name) => Ok(AccessStrategy::Field {
            declaring_type,
            property: name.to_string(),
        }),
        BuiltinStrategy::Field => Err("no field with this name".to_string()),
        BuiltinStrategy::Property if declaring.has_accessors(name) => {
            Ok(AccessStrategy::Accessors {
                declaring_type,
                property: name.to_string(),
            })
        }
        BuiltinStrategy::Property => Err("no getter/setter pair for this name".to_string()),
        BuiltinStrategy::Mixed => {
            let member = if declaring.has_accessors(name) {
                Member::Accessors
            } else if declaring.has_field(name) {
                Member::Field
            } else {
                return Err("no field or getter/setter pair for this name".to_string());
            };
            Ok(AccessStrategy::Mixed {
                declaring_type,
                property: name.to_string(),
                member,
            })
        }
        BuiltinStrategy::Noop => Ok(AccessStrategy::Noop {
            property: name.to_string(),
        }),
    }
}
