//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::SpurConfig;
use std::path::Path;

/// File name looked up in the project directory.
pub const CONFIG_FILE: &str = "spur.toml";

/// Loads and validates `spur.toml` from a project directory.
///
/// A missing file is not an error: the defaults apply.
pub fn load_config(project_dir: &Path) -> Result<SpurConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    if !config_path.is_file() {
        return Ok(SpurConfig::default());
    }
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<SpurConfig, ConfigError> {
    let config: SpurConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &SpurConfig) -> Result<(), ConfigError> {
    let artifacts = &config.artifacts;
    if artifacts.instantiator_suffix.is_empty() {
        return Err(ConfigError::Validation(
            "artifacts.instantiator_suffix must not be empty".to_string(),
        ));
    }
    if artifacts.accessor_suffix.is_empty() {
        return Err(ConfigError::Validation(
            "artifacts.accessor_suffix must not be empty".to_string(),
        ));
    }
    if artifacts.instantiator_suffix == artifacts.accessor_suffix {
        return Err(ConfigError::Validation(format!(
            "instantiator and accessor artifacts share the suffix '{}'",
            artifacts.accessor_suffix
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PropertyOrder;

    #[test]
    fn empty_file_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.build.property_order, PropertyOrder::Sorted);
        assert_eq!(config.build.validate, cfg!(debug_assertions));
        assert_eq!(config.artifacts.instantiator_suffix, "$SpurInstantiator");
        assert_eq!(config.artifacts.accessor_suffix, "$SpurAccessor");
        assert_eq!(config.artifacts.output_dir, "target/spur");
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[build]
validate = false
property_order = "declared"

[artifacts]
instantiator_suffix = "$Make"
accessor_suffix = "$Access"
output_dir = "out/artifacts"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert!(!config.build.validate);
        assert_eq!(config.build.property_order, PropertyOrder::Declared);
        assert_eq!(config.artifacts.instantiator_suffix, "$Make");
        assert_eq!(config.artifacts.output_dir, "out/artifacts");
    }

    #[test]
    fn unknown_order_is_parse_error() {
        let err = load_config_from_str("[build]\nproperty_order = \"random\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_key_is_parse_error() {
        let err = load_config_from_str("[build]\nparallel = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_suffix_rejected() {
        let err = load_config_from_str("[artifacts]\naccessor_suffix = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn shared_suffix_rejected() {
        let toml = "[artifacts]\ninstantiator_suffix = \"$X\"\naccessor_suffix = \"$X\"\n";
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.build.property_order, PropertyOrder::Sorted);
    }

    #[test]
    fn loads_file_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[build]\nproperty_order = \"declared\"\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.build.property_order, PropertyOrder::Declared);
    }
}
