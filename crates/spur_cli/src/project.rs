//! Locating the project and its configuration.

use std::path::{Path, PathBuf};

use spur_config::{load_config, load_config_from_str, SpurConfig, CONFIG_FILE};

use crate::GlobalArgs;

/// A project directory with its loaded configuration.
pub struct Project {
    /// Directory relative paths in the configuration resolve against.
    pub root: PathBuf,
    /// The loaded configuration, or defaults if there is no `spur.toml`.
    pub config: SpurConfig,
}

impl Project {
    /// The configured build output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.config.artifacts.output_dir)
    }
}

/// Walks up from `start` looking for the nearest directory containing `spur.toml`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE).is_file() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Loads the project selected by the global CLI args.
///
/// `--config` may name a configuration file (loaded as is, whatever its
/// name) or a project directory. Without it, the nearest `spur.toml` above
/// the current directory is used; with none found, the current directory
/// and the defaults.
pub fn load_project(global: &GlobalArgs) -> Result<Project, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let path = PathBuf::from(config_path);
        if path.is_file() {
            let content = std::fs::read_to_string(&path)?;
            let config = load_config_from_str(&content)?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            return Ok(Project { root, config });
        }
        let config = load_config(&path)?;
        return Ok(Project { root: path, config });
    }

    let cwd = std::env::current_dir()?;
    let root = find_project_root(&cwd).unwrap_or(cwd);
    let config = load_config(&root)?;
    Ok(Project { root, config })
}
