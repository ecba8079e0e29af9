use serde::{Deserialize, Serialize};

use crate::EventSource;
use lcdb_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    /// Stable error code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether retrying the operation might succeed.
    pub retryable: bool,
}

impl FailureContext {
    /// Construct a new failure context.
    #[must_use]
    pub fn new(
        code: Option<impl Into<String>>,
        message: impl Into<String>,
        hint: Option<impl Into<String>>,
        retryable: bool,
    ) -> Self {
        Self {
            code: code.map(Into::into),
            message: message.into(),
            hint: hint.map(Into::into),
            retryable,
        }
    }

    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self::new(
            error.user_code(),
            error.user_message().into_owned(),
            error.user_hint(),
            error.is_retryable(),
        )
    }
}

pub mod environment;
pub mod general;
pub mod process;
pub mod workflow;

pub use environment::*;
pub use general::*;
pub use process::*;
pub use workflow::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, errors, operations)
    General(GeneralEvent),

    /// Conda environment provisioning
    Environment(EnvironmentEvent),

    /// Target directory and workflow runner
    Workflow(WorkflowEvent),

    /// External process lifecycle and output lines
    Process(ProcessEvent),
}

impl AppEvent {
    /// Identify the source domain for this event (used for metadata/logging).
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::General(_) => EventSource::GENERAL,
            Self::Environment(_) => EventSource::ENVIRONMENT,
            Self::Workflow(_) => EventSource::WORKFLOW,
            Self::Process(_) => EventSource::PROCESS,
        }
    }

    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::General(GeneralEvent::Error { .. } | GeneralEvent::OperationFailed { .. })
            | Self::Environment(EnvironmentEvent::BuildFailed { .. })
            | Self::Workflow(WorkflowEvent::RunFailed { .. })
            | Self::Process(ProcessEvent::Exited { success: false, .. }) => Level::ERROR,

            Self::General(GeneralEvent::Warning { .. }) => Level::WARN,

            Self::Environment(EnvironmentEvent::ManifestWritten { .. })
            | Self::Process(ProcessEvent::Started { .. } | ProcessEvent::Exited { .. }) => {
                Level::DEBUG
            }

            // Child output is shown verbatim by the CLI, keep it out of the log stream
            Self::Process(ProcessEvent::Output { .. }) => Level::TRACE,

            _ => Level::INFO,
        }
    }
}
