//! Dataset build error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error("environment has not been prepared; ensure the environment before running the workflow")]
    EnvironmentNotReady,

    #[error("workflow runner not found in environment: {path}")]
    RunnerNotFound { path: String },

    #[error("invalid target directory: {path}")]
    InvalidTarget { path: String },
}

impl UserFacingError for BuildError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::RunnerNotFound { .. } => Some(
                "Add the workflow runner to requirements.txt or set [workflow].runner to an executable the environment provides.",
            ),
            Self::InvalidTarget { .. } => Some("Pass a directory path as the build target."),
            Self::EnvironmentNotReady => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::EnvironmentNotReady => "build.environment_not_ready",
            Self::RunnerNotFound { .. } => "build.runner_not_found",
            Self::InvalidTarget { .. } => "build.invalid_target",
        };
        Some(code)
    }
}
