use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// How classification buttons are offered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMode {
    /// Buttons for a preset die, available immediately.
    Fixed,
    /// User picks a die type first; buttons follow from it.
    #[default]
    DieSelect,
}

/// User configuration, read from `config.toml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SorterConfig {
    pub mode: LabelMode,
    /// Die used in [`LabelMode::Fixed`].
    pub fixed_sides: u32,
    /// Side counts offered by the die selector.
    pub die_types: Vec<u32>,
    /// Folder the picker opens in.
    pub start_directory: Option<PathBuf>,
}

impl Default for SorterConfig {
    fn default() -> Self {
        Self {
            mode: LabelMode::default(),
            fixed_sides: 6,
            die_types: vec![4, 6, 8, 10, 12, 20],
            start_directory: None,
        }
    }
}

impl SorterConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: SorterConfig = toml::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Loads `path`, or returns defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.fixed_sides == 0 {
            return Err(ConfigError::Invalid("fixed_sides must be at least 1".into()));
        }
        if self.die_types.is_empty() {
            return Err(ConfigError::Invalid("die_types must not be empty".into()));
        }
        if self.die_types.contains(&0) {
            return Err(ConfigError::Invalid("die_types must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn empty_file_yields_defaults() -> Result<()> {
        assert_eq!(SorterConfig::from_toml_str("")?, SorterConfig::default());
        Ok(())
    }

    #[test]
    fn fixed_mode_parses() -> Result<()> {
        let cfg = SorterConfig::from_toml_str(
            r#"
mode = "fixed"
fixed_sides = 20
start_directory = "/data/rolls"
"#,
        )?;
        assert_eq!(cfg.mode, LabelMode::Fixed);
        assert_eq!(cfg.fixed_sides, 20);
        assert_eq!(cfg.start_directory, Some(PathBuf::from("/data/rolls")));
        assert_eq!(cfg.die_types, SorterConfig::default().die_types);
        Ok(())
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            SorterConfig::from_toml_str("fixed_sides = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SorterConfig::from_toml_str("die_types = []"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SorterConfig::from_toml_str("mode = \"sideways\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_means_defaults() -> Result<()> {
        let dir = tempdir()?;
        let cfg = SorterConfig::load(dir.path().join("config.toml"))?;
        assert_eq!(cfg, SorterConfig::default());
        Ok(())
    }
}
