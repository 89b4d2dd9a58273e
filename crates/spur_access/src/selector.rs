//! Pluggable lookup of access strategies by identifier.

use std::collections::BTreeSet;

use spur_model::BuiltinStrategy;

/// What an identifier resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selected {
    /// One of the built-in strategies.
    Builtin(BuiltinStrategy),
    /// A strategy registered by an extension; synthesized accessors delegate to it by identifier.
    Custom,
}

/// Registry of access strategies keyed by identifier.
pub trait StrategySelector: Send + Sync {
    /// Resolves an identifier, or returns `None` if it is unknown.
    fn resolve(&self, identifier: &str) -> Option<Selected>;
}

/// Selector that understands the built-in identifiers plus any registered
/// custom ones.
#[derive(Debug, Default, Clone)]
pub struct DefaultSelector {
    custom: BTreeSet<String>,
}

impl DefaultSelector {
    /// Creates a selector with only the built-in identifiers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a custom strategy identifier.
    pub fn register(mut self, identifier: &str) -> Self {
        self.custom.insert(identifier.to_string());
        self
    }
}

impl StrategySelector for DefaultSelector {
    fn resolve(&self, identifier: &str) -> Option<Selected> {
        if let Some(builtin) = BuiltinStrategy::from_identifier(identifier) {
            return Some(Selected::Builtin(builtin));
        }
        self.custom.contains(identifier).then_some(Selected::Custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_take_precedence() {
        let selector = DefaultSelector::new().register("field");
        assert_eq!(
            selector.resolve("field"),
            Some(Selected::Builtin(BuiltinStrategy::Field))
        );
    }

    #[test]
    fn custom_identifiers_must_be_registered() {
        let selector = DefaultSelector::new().register("com.acme.AuditedAccess");
        assert_eq!(selector.resolve("com.acme.AuditedAccess"), Some(Selected::Custom));
        assert_eq!(selector.resolve("com.acme.Other"), None);
    }
}
