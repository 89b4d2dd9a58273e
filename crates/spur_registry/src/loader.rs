//! Resolving synthesized types by symbol name.
//!
//! Loading is an injected capability. [`SymbolTable`] is the link-time
//! implementation: the synthesized constructors are registered up front and
//! looked up by name, with no dynamic loading involved.

use std::collections::HashMap;

use spur_cache::ArtifactLookup;
use spur_common::ArtifactName;

use crate::error::LoadError;
use crate::optimizer::{AccessOptimizer, InstantiationOptimizer};

/// No-argument constructor of a synthesized instantiation optimizer.
pub type InstantiatorCtor = fn() -> Box<dyn InstantiationOptimizer>;

/// No-argument constructor of a synthesized access optimizer.
pub type AccessorCtor = fn() -> Box<dyn AccessOptimizer>;

/// The no-argument constructor a loaded type exposes.
#[derive(Clone, Copy)]
pub enum Constructor {
    /// Constructs an [`InstantiationOptimizer`].
    Instantiator(InstantiatorCtor),
    /// Constructs an [`AccessOptimizer`].
    Accessor(AccessorCtor),
}

/// A type resolved by symbol name.
#[derive(Clone)]
pub struct LoadedType {
    /// The symbol the type was resolved under.
    pub symbol: String,
    /// Its no-argument constructor, if it has one.
    pub constructor: Option<Constructor>,
}

/// Resolves a symbol name to a loaded type.
pub trait TypeLoader {
    /// Resolves `symbol`, the dotted `<type-name><suffix>` name.
    fn resolve(&self, symbol: &str) -> Result<LoadedType, LoadError>;
}

impl<T: TypeLoader + ?Sized> TypeLoader for &T {
    fn resolve(&self, symbol: &str) -> Result<LoadedType, LoadError> {
        (**self).resolve(symbol)
    }
}

/// Link-time symbol table of synthesized constructors.
#[derive(Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Option<Constructor>>,
}

impl SymbolTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an instantiation optimizer constructor.
    pub fn with_instantiator(mut self, symbol: &str, ctor: InstantiatorCtor) -> Self {
        self.insert(symbol, Some(Constructor::Instantiator(ctor)));
        self
    }

    /// Registers an access optimizer constructor.
    pub fn with_accessor(mut self, symbol: &str, ctor: AccessorCtor) -> Self {
        self.insert(symbol, Some(Constructor::Accessor(ctor)));
        self
    }

    /// Registers a symbol that exposes no usable constructor.
    pub fn with_opaque(mut self, symbol: &str) -> Self {
        self.insert(symbol, None);
        self
    }

    fn insert(&mut self, symbol: &str, constructor: Option<Constructor>) {
        self.symbols.insert(symbol.replace('/', "."), constructor);
    }

    /// Number of registered symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if no symbol is registered.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl TypeLoader for SymbolTable {
    fn resolve(&self, symbol: &str) -> Result<LoadedType, LoadError> {
        let constructor = self
            .symbols
            .get(symbol)
            .ok_or_else(|| LoadError::NotFound {
                symbol: symbol.to_string(),
            })?;
        Ok(LoadedType {
            symbol: symbol.to_string(),
            constructor: *constructor,
        })
    }
}

/// Loader that only resolves symbols whose artifact was actually emitted.
///
/// Checks `artifacts` (the build's cache or its output store) before
/// delegating, so a type whose synthesis was skipped fails to load even if
/// a constructor for it happens to be linked in.
pub struct ArtifactCheckedLoader<'a, L: ?Sized> {
    artifacts: &'a dyn ArtifactLookup,
    inner: &'a L,
}

impl<'a, L: TypeLoader + ?Sized> ArtifactCheckedLoader<'a, L> {
    /// Wraps `inner`, checking artifacts in `artifacts` first.
    pub fn new(artifacts: &'a dyn ArtifactLookup, inner: &'a L) -> Self {
        Self { artifacts, inner }
    }
}

impl<L: TypeLoader + ?Sized> TypeLoader for ArtifactCheckedLoader<'_, L> {
    fn resolve(&self, symbol: &str) -> Result<LoadedType, LoadError> {
        if !self.artifacts.contains(symbol) {
            return Err(LoadError::ArtifactMissing {
                artifact: ArtifactName::new(symbol),
            });
        }
        self.inner.resolve(symbol)
    }
}
