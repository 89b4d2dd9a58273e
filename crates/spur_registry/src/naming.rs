//! Artifact naming for synthesized optimizers.

use spur_common::{ArtifactName, TypeName};
use spur_config::ArtifactConfig;

/// The fixed suffixes synthesized artifacts are named with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNaming {
    instantiator_suffix: String,
    accessor_suffix: String,
}

impl ArtifactNaming {
    /// Creates a naming scheme from explicit suffixes.
    pub fn new(instantiator_suffix: &str, accessor_suffix: &str) -> Self {
        Self {
            instantiator_suffix: instantiator_suffix.to_string(),
            accessor_suffix: accessor_suffix.to_string(),
        }
    }

    /// Takes the suffixes from the `[artifacts]` configuration.
    pub fn from_config(config: &ArtifactConfig) -> Self {
        Self::new(&config.instantiator_suffix, &config.accessor_suffix)
    }

    /// `<type-name><instantiator-suffix>`
    pub fn instantiator(&self, ty: &TypeName) -> ArtifactName {
        ArtifactName::for_type(ty, &self.instantiator_suffix)
    }

    /// `<type-name><accessor-suffix>`
    pub fn accessor(&self, ty: &TypeName) -> ArtifactName {
        ArtifactName::for_type(ty, &self.accessor_suffix)
    }
}

impl Default for ArtifactNaming {
    fn default() -> Self {
        Self::from_config(&ArtifactConfig::default())
    }
}
