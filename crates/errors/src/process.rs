//! External process error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ProcessError {
    /// The child ran and exited with a non-zero status
    #[error("command `{}` exited with status {code}", .command.join(" "))]
    ExitStatus { command: Vec<String>, code: i32 },

    /// The child was killed before reporting an exit code (usually a signal)
    #[error("command `{}` was terminated without an exit code", .command.join(" "))]
    Terminated { command: Vec<String> },

    /// The child could not be started at all
    #[error("failed to spawn `{program}`: {message}")]
    SpawnFailed { program: String, message: String },
}

impl UserFacingError for ProcessError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::SpawnFailed { .. } => {
                Some("Make sure the program is installed and reachable through PATH.")
            }
            Self::ExitStatus { .. } => Some("See the command output above for the cause."),
            Self::Terminated { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::ExitStatus { .. } => "process.exit_status",
            Self::Terminated { .. } => "process.terminated",
            Self::SpawnFailed { .. } => "process.spawn_failed",
        };
        Some(code)
    }
}
