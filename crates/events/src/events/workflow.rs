use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::FailureContext;

/// Dataset directory and workflow runner events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorkflowEvent {
    /// The target directory did not exist and was created
    TargetCreated { path: PathBuf },

    /// The workflow description was copied into the target directory
    WorkflowWritten { path: PathBuf, bytes: usize },

    /// The runner is about to start
    RunStarted {
        working_dir: PathBuf,
        runner: String,
        args: Vec<String>,
    },

    /// The runner exited successfully
    RunCompleted { duration: Duration },

    /// The runner failed
    RunFailed { failure: FailureContext },
}
