//! Interned type identities.
//!
//! Type names are interned while the registry is being assembled and the
//! interner is then frozen into a read-only [`TypeIndex`], which is what the
//! runtime consults. Lookups after freezing take no locks.

use lasso::{RodeoReader, ThreadedRodeo};
use serde::{Deserialize, Serialize};

use crate::name::TypeName;

/// Dense identity of a registered data-model type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct TypeId(u32);

impl TypeId {
    /// Returns the slot this identity occupies in a registry's record table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// SAFETY: `TypeId` wraps a `u32` which is always a valid `usize` on 32-bit and
// 64-bit platforms. `try_from_usize` rejects values that don't fit in `u32`.
unsafe impl lasso::Key for TypeId {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(TypeId)
    }
}

/// Thread-safe interner used while a registry is under construction.
pub struct TypeInterner {
    rodeo: ThreadedRodeo<TypeId>,
}

impl TypeInterner {
    /// Creates a new empty interner.
    pub fn new() -> Self {
        Self {
            rodeo: ThreadedRodeo::new(),
        }
    }

    /// Interns a type name. Identities are handed out densely from zero in
    /// first-seen order.
    pub fn intern(&self, name: &TypeName) -> TypeId {
        self.rodeo.get_or_intern(name.as_str())
    }

    /// Returns the number of distinct names interned so far.
    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    /// Returns `true` if nothing has been interned.
    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }

    /// Freezes the interner. No further names can be added.
    pub fn freeze(self) -> TypeIndex {
        TypeIndex {
            reader: self.rodeo.into_reader(),
        }
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable name → [`TypeId`] index, safe for unsynchronized concurrent reads.
pub struct TypeIndex {
    reader: RodeoReader<TypeId>,
}

impl TypeIndex {
    /// Looks up the identity of a type by its dotted name.
    pub fn get(&self, name: &str) -> Option<TypeId> {
        self.reader.get(name)
    }

    /// Resolves an identity back to its type name.
    ///
    /// # Panics
    ///
    /// Panics if the `TypeId` was not produced by the interner this index was frozen from.
    pub fn resolve(&self, id: TypeId) -> &str {
        self.reader.resolve(&id)
    }

    /// Iterates the indexed names in identity order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.reader.strings()
    }

    /// Returns the number of indexed types.
    pub fn len(&self) -> usize {
        self.reader.len()
    }

    /// Returns `true` if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.reader.is_empty()
    }
}
