//! Configuration file support for solution-pruner.
//!
//! Provides YAML-based configuration through `solution-pruner.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::application::dto::OutputFormat;
use crate::shared::error::PrunerError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "solution-pruner.config.yml";

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub snapshot: Option<PathBuf>,
    pub format: Option<String>,
    pub unmanaged_only: Option<bool>,
    pub max_depth: Option<usize>,
    pub log_level: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Warn about unknown fields. Called once logging is initialised.
    pub fn warn_unknown_fields(&self) {
        for key in self.unknown_fields.keys() {
            log::warn!("Unknown config field '{}' will be ignored.", key);
        }
    }

    /// Output format named in the file, already validated on load.
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.format
            .as_deref()
            .and_then(|format| OutputFormat::from_str(format).ok())
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn invalid(message: String) -> anyhow::Error {
    PrunerError::Validation { message }.into()
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref format) = config.format {
        OutputFormat::from_str(format).map_err(|e| {
            invalid(format!(
                "{}\n\n💡 Hint: 'format' in the config file must be 'text' or 'json'.",
                e
            ))
        })?;
    }

    if config.max_depth == Some(0) {
        return Err(invalid(
            "max_depth must be at least 1.\n\n💡 Hint: Omit 'max_depth' to walk without a depth limit."
                .to_string(),
        ));
    }

    if let Some(ref level) = config.log_level {
        if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            return Err(invalid(format!(
                "Unknown log_level '{}'.\n\n💡 Hint: Use one of {}.",
                level,
                LOG_LEVELS.join(", ")
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, content).unwrap();
        config_path
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(
            &dir,
            r#"
snapshot: exports/org.json
format: json
unmanaged_only: true
max_depth: 3
log_level: debug
"#,
        );

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.snapshot, Some(PathBuf::from("exports/org.json")));
        assert_eq!(config.output_format(), Some(OutputFormat::Json));
        assert_eq!(config.unmanaged_only, Some(true));
        assert_eq!(config.max_depth, Some(3));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "format: text\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.output_format(), Some(OutputFormat::Text));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config_from_path(Path::new("/nonexistent/config.yml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "invalid: yaml: [[[broken");

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_invalid_format_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "format: markdown\n");

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("Invalid format: markdown"));
    }

    #[test]
    fn test_zero_max_depth_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "max_depth: 0\n");

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("max_depth must be at least 1"));
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "log_level: loud\n");

        let err = load_config_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("Unknown log_level 'loud'"));
    }

    #[test]
    fn test_unknown_fields_are_kept_for_warning() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(
            &dir,
            r#"
format: json
check_cve: true
exclude_packages: [pip]
"#,
        );

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("check_cve"));
        assert!(config.unknown_fields.contains_key("exclude_packages"));
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!(config.snapshot.is_none());
        assert!(config.format.is_none());
        assert!(config.unmanaged_only.is_none());
        assert!(config.max_depth.is_none());
        assert!(config.log_level.is_none());
        assert!(config.unknown_fields.is_empty());
    }
}
