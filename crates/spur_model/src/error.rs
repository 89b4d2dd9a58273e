//! Errors raised while loading or walking the type model.

/// Errors in the shape of the type model itself.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The model file could not be read.
    #[error("failed to read type model: {0}")]
    Io(#[from] std::io::Error),

    /// The model JSON could not be parsed.
    #[error("failed to parse type model: {0}")]
    Parse(String),

    /// Two entity bindings share an entity name.
    #[error("entity '{0}' is bound twice")]
    DuplicateEntity(String),

    /// An entity names a superclass entity that is not bound.
    #[error("entity '{entity}' extends unknown entity '{superclass}'")]
    UnknownSuperclass {
        /// The entity declaring the superclass.
        entity: String,
        /// The missing superclass entity name.
        superclass: String,
    },

    /// The superclass chain of an entity loops back on itself.
    #[error("entity '{0}' has a cyclic superclass chain")]
    CyclicHierarchy(String),
}
