#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for lcdb-test-data
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/lcdb-test-data/config.toml)
//! - Environment variables
//! - CLI flags (applied by the binary)

pub mod constants;
pub mod core;

pub use core::{AssetConfig, ColorChoice, EnvironmentConfig, GeneralConfig, WorkflowConfig};

use lcdb_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub environment: EnvironmentConfig,

    #[serde(default)]
    pub workflow: WorkflowConfig,

    #[serde(default)]
    pub assets: AssetConfig,
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join(constants::APP_NAME).join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid TOML for this schema.
    pub fn from_toml(contents: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot be used
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty conda executable or
    /// a runner that is not a bare file name inside the environment's `bin/`.
    pub fn validate(&self) -> Result<(), Error> {
        non_empty("environment.conda", self.environment.conda.clone())?;
        if !is_bare_name(&self.workflow.runner) {
            return Err(ConfigError::InvalidValue {
                field: "workflow.runner".to_string(),
                value: self.workflow.runner.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Merge values produced by `lookup`, keyed by environment variable name
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be parsed into the expected type.
    pub fn merge_env_from<F>(&mut self, lookup: F) -> Result<(), Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        // LCDB_COLOR
        if let Some(color) = lookup("LCDB_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "LCDB_COLOR".to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        if let Some(conda) = lookup("LCDB_CONDA") {
            self.environment.conda = non_empty("LCDB_CONDA", conda)?;
        }

        if let Some(python) = lookup("LCDB_PYTHON") {
            self.environment.python = non_empty("LCDB_PYTHON", python)?;
        }

        // Comma separated; an empty value clears the list
        if let Some(channels) = lookup("LCDB_CHANNELS") {
            self.environment.channels = channels
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(ToString::to_string)
                .collect();
        }

        if let Some(runner) = lookup("LCDB_RUNNER") {
            if !is_bare_name(&runner) {
                return Err(ConfigError::InvalidValue {
                    field: "LCDB_RUNNER".to_string(),
                    value: runner,
                }
                .into());
            }
            self.workflow.runner = runner;
        }

        if let Some(manifest) = lookup("LCDB_MANIFEST") {
            self.assets.manifest = Some(PathBuf::from(manifest));
        }

        if let Some(snakefile) = lookup("LCDB_SNAKEFILE") {
            self.assets.snakefile = Some(PathBuf::from(snakefile));
        }

        Ok(())
    }

    /// The interpreter spec passed to `conda create`
    #[must_use]
    pub fn python_spec(&self) -> String {
        format!("python={}", self.environment.python)
    }
}

/// A single path component that is neither empty nor `.`/`..`
#[must_use]
pub fn is_bare_name(name: &str) -> bool {
    Path::new(name).file_name() == Some(std::ffi::OsStr::new(name))
}

fn non_empty(field: &str, value: String) -> Result<String, Error> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value,
        }
        .into());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.environment.conda, "conda");
        assert_eq!(config.python_spec(), "python=3");
        assert!(config.environment.channels.is_empty());
        assert_eq!(config.workflow.runner, "snakemake");
        assert!(config.assets.manifest.is_none());
        assert_eq!(config.general.color, ColorChoice::Auto);
    }

    #[test]
    fn test_merge_env_overrides() {
        let mut config = Config::default();
        config
            .merge_env_from(lookup(&[
                ("LCDB_CONDA", "mamba"),
                ("LCDB_PYTHON", "3.12"),
                ("LCDB_CHANNELS", "conda-forge, bioconda,"),
                ("LCDB_COLOR", "never"),
            ]))
            .unwrap();

        assert_eq!(config.environment.conda, "mamba");
        assert_eq!(config.python_spec(), "python=3.12");
        assert_eq!(config.environment.channels, vec!["conda-forge", "bioconda"]);
        assert_eq!(config.general.color, ColorChoice::Never);
    }

    #[test]
    fn test_invalid_env_values() {
        let mut config = Config::default();
        assert!(config
            .merge_env_from(lookup(&[("LCDB_COLOR", "sometimes")]))
            .is_err());
        assert!(config.merge_env_from(lookup(&[("LCDB_CONDA", " ")])).is_err());
        assert!(config
            .merge_env_from(lookup(&[("LCDB_RUNNER", "/usr/bin/snakemake")]))
            .is_err());
    }

    #[test]
    fn test_runner_must_be_bare_name() {
        for runner in ["/usr/bin/snakemake", "../snakemake", "bin/snakemake", "..", ""] {
            let toml = format!("[workflow]\nrunner = {runner:?}\n");
            let err = Config::from_toml(&toml).unwrap_err();
            assert!(
                matches!(
                    &err,
                    Error::Config(ConfigError::InvalidValue { field, .. }) if field == "workflow.runner"
                ),
                "{runner}: {err:?}"
            );
        }
        assert!(Config::from_toml("[workflow]\nrunner = \"snakemake-minimal\"\n").is_ok());
        assert!(Config::from_toml("[environment]\nconda = \"\"\n").is_err());
    }

    #[test]
    fn test_parse_error() {
        let err = Config::from_toml("[environment\nconda = 1").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError { .. })));
    }
}
