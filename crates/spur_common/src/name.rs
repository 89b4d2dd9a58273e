//! Type and artifact names.
//!
//! Type names use dotted notation (`shop.model.Order`). Artifact names are
//! stored in path notation (`shop/model/Order$SpurInstantiator`); any name
//! handed in with dots is canonicalized, so both spellings address the same
//! artifact.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully-qualified name of a data-model type, in dotted notation.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Creates a type name, converting any `/` separators to dots.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.contains('/') {
            Self(name.replace('/', "."))
        } else {
            Self(name)
        }
    }

    /// Returns the dotted name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the unqualified name (the part after the last dot).
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Unique identifier of one synthesized artifact, in canonical path notation.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactName(String);

impl ArtifactName {
    /// Creates an artifact name from either spelling.
    pub fn new(name: &str) -> Self {
        Self(name.replace('.', "/"))
    }

    /// Names the artifact synthesized for `ty` under the given suffix.
    pub fn for_type(ty: &TypeName, suffix: &str) -> Self {
        Self::new(&format!("{}{}", ty.as_str(), suffix))
    }

    /// Returns the canonical, path-separated spelling.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the dotted spelling, which is the symbol name the generated
    /// type is loaded under.
    pub fn dotted(&self) -> String {
        self.0.replace('/', ".")
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
