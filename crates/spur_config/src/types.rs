//! Configuration types deserialized from `spur.toml`.

use serde::{Deserialize, Serialize};

/// The top-level build configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpurConfig {
    /// Scan and cache behaviour.
    #[serde(default)]
    pub build: BuildConfig,
    /// Naming and placement of synthesized artifacts.
    #[serde(default)]
    pub artifacts: ArtifactConfig,
}

/// Scan and cache behaviour.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Validation mode: a duplicate artifact write fails the build instead of
    /// being recorded as a warning. Defaults to on in debug builds.
    #[serde(default = "default_validate")]
    pub validate: bool,
    /// Order in which a type's properties appear in its access plan.
    #[serde(default)]
    pub property_order: PropertyOrder,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            validate: default_validate(),
            property_order: PropertyOrder::default(),
        }
    }
}

/// Ordering policy for property access plans.
///
/// The synthesized accessor addresses properties by position, so scanner and
/// synthesizer must agree on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyOrder {
    /// Properties sorted by name.
    #[default]
    Sorted,
    /// The type's declared property-closure order.
    Declared,
}

/// Naming and placement of synthesized artifacts.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactConfig {
    /// Suffix appended to a type name to name its instantiation artifact.
    #[serde(default = "default_instantiator_suffix")]
    pub instantiator_suffix: String,
    /// Suffix appended to a type name to name its accessor artifact.
    #[serde(default = "default_accessor_suffix")]
    pub accessor_suffix: String,
    /// Directory the build output store writes artifacts to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            instantiator_suffix: default_instantiator_suffix(),
            accessor_suffix: default_accessor_suffix(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_validate() -> bool {
    cfg!(debug_assertions)
}

fn default_instantiator_suffix() -> String {
    "$SpurInstantiator".to_string()
}

fn default_accessor_suffix() -> String {
    "$SpurAccessor".to_string()
}

fn default_output_dir() -> String {
    "target/spur".to_string()
}
