use lcdb_hash::Fingerprint;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// How the environment step was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EnvironmentStatus {
    /// `conda create` ran and the marker was written
    Created { duration: Duration },
    /// A marker from an earlier run was found
    Reused,
}

impl EnvironmentStatus {
    #[must_use]
    pub fn is_reused(&self) -> bool {
        matches!(self, Self::Reused)
    }
}

/// Summary of a complete build
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    /// Absolute dataset directory
    pub target: PathBuf,
    /// Absolute environment prefix
    pub prefix: PathBuf,
    /// Fingerprint of the manifest bytes that were written
    pub fingerprint: Fingerprint,
    pub environment: EnvironmentStatus,
    pub snakefile: PathBuf,
    /// Wall time of the workflow runner
    pub workflow_duration: Duration,
}
