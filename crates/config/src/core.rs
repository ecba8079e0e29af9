//! Configuration sections and their defaults

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Color output control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    Auto,
    Never,
}

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
        }
    }
}

/// How the conda environment is created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Program used to create environments, looked up through PATH
    #[serde(default = "default_conda")]
    pub conda: String,
    /// Interpreter version requested alongside the manifest (`python=<version>`)
    #[serde(default = "default_python")]
    pub python: String,
    /// Extra channels, each passed as `-c <channel>`
    #[serde(default)]
    pub channels: Vec<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            conda: default_conda(),
            python: default_python(),
            channels: Vec::new(),
        }
    }
}

/// How the workflow runner is invoked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Executable name resolved inside `<env>/bin`
    #[serde(default = "default_runner")]
    pub runner: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            runner: default_runner(),
        }
    }
}

/// Optional replacements for the embedded assets
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AssetConfig {
    pub manifest: Option<PathBuf>,
    pub snakefile: Option<PathBuf>,
}

// Default value functions for serde
fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

fn default_conda() -> String {
    "conda".to_string()
}

fn default_python() -> String {
    "3".to_string()
}

fn default_runner() -> String {
    "snakemake".to_string()
}
