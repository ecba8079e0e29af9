use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Descriptor for an external command invocation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessCommandDescriptor {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl ProcessCommandDescriptor {
    /// Program followed by its arguments
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Space-joined rendering used for display and logs
    #[must_use]
    pub fn command_line(&self) -> String {
        self.tokens().join(" ")
    }
}

/// Child process lifecycle and output events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProcessEvent {
    /// The child was spawned
    Started { command: ProcessCommandDescriptor },

    /// One line of the child's combined stdout and stderr, without the
    /// trailing newline
    Output { line: String },

    /// The child exited; `code` is `None` when killed by a signal
    Exited {
        command: ProcessCommandDescriptor,
        code: Option<i32>,
        success: bool,
    },
}
