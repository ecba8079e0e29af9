use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::FailureContext;

/// Conda environment provisioning events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EnvironmentEvent {
    /// Manifest bytes were written and fingerprinted
    ManifestWritten {
        path: PathBuf,
        fingerprint: String,
        bytes: usize,
    },

    /// No marker was found, a fresh environment is being created
    BuildStarted { prefix: PathBuf, fingerprint: String },

    /// The create command succeeded and the marker was written
    Built { prefix: PathBuf, duration: Duration },

    /// A marker was found, creation was skipped
    Reused { prefix: PathBuf },

    /// Creation failed; the prefix is left on disk without a marker
    BuildFailed {
        prefix: PathBuf,
        failure: FailureContext,
    },
}
