//! Structured logging integration for events
//!
//! Converts domain events into tracing records with structured fields. Child
//! output lines are recorded at trace level only; they reach the terminal
//! through the event handler.

use lcdb_events::{
    AppEvent, EnvironmentEvent, EventMessage, GeneralEvent, ProcessEvent, WorkflowEvent,
};
use tracing::{debug, error, info, trace, warn};

/// Log an `AppEvent` using the tracing infrastructure with structured fields
pub fn log_event_with_tracing(message: &EventMessage) {
    let meta = &message.meta;
    let source = meta.source.as_str();

    match &message.event {
        AppEvent::General(event) => match event {
            GeneralEvent::Warning { message } => {
                warn!(source, correlation = ?meta.correlation_id, "{message}");
            }
            GeneralEvent::Error { message, details } => {
                error!(source, correlation = ?meta.correlation_id, details = ?details, "{message}");
            }
            GeneralEvent::OperationStarted { operation } => {
                info!(source, correlation = ?meta.correlation_id, "{operation} started");
            }
            GeneralEvent::OperationCompleted { operation, success } => {
                info!(source, correlation = ?meta.correlation_id, success, "{operation} completed");
            }
            GeneralEvent::OperationFailed { operation, error } => {
                error!(source, correlation = ?meta.correlation_id, error = %error, "{operation} failed");
            }
        },

        AppEvent::Environment(event) => match event {
            EnvironmentEvent::ManifestWritten {
                path,
                fingerprint,
                bytes,
            } => {
                debug!(
                    source,
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    path = %path.display(),
                    fingerprint = %fingerprint,
                    bytes,
                    "Manifest written"
                );
            }
            EnvironmentEvent::BuildStarted {
                prefix,
                fingerprint,
            } => {
                info!(
                    source,
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    fingerprint = %fingerprint,
                    "Building environment in {}",
                    prefix.display()
                );
            }
            EnvironmentEvent::Built { prefix, duration } => {
                info!(
                    source,
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    prefix = %prefix.display(),
                    duration_ms = duration.as_millis(),
                    "Built environment"
                );
            }
            EnvironmentEvent::Reused { prefix } => {
                info!(
                    source,
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    "Using existing environment {}",
                    prefix.display()
                );
            }
            EnvironmentEvent::BuildFailed { prefix, failure } => {
                error!(
                    source,
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    prefix = %prefix.display(),
                    retryable = failure.retryable,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Environment creation failed"
                );
            }
        },

        AppEvent::Workflow(event) => match event {
            WorkflowEvent::TargetCreated { path } => {
                info!(
                    source,
                    correlation = ?meta.correlation_id,
                    "Creating {}",
                    path.display()
                );
            }
            WorkflowEvent::WorkflowWritten { path, bytes } => {
                debug!(
                    source,
                    correlation = ?meta.correlation_id,
                    path = %path.display(),
                    bytes,
                    "Snakefile written"
                );
            }
            WorkflowEvent::RunStarted {
                working_dir,
                runner,
                args,
            } => {
                info!(
                    source,
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    runner = %runner,
                    args = ?args,
                    "Running snakemake in {}",
                    working_dir.display()
                );
            }
            WorkflowEvent::RunCompleted { duration } => {
                info!(
                    source,
                    correlation = ?meta.correlation_id,
                    duration_ms = duration.as_millis(),
                    "Workflow completed"
                );
            }
            WorkflowEvent::RunFailed { failure } => {
                error!(
                    source,
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    code = ?failure.code,
                    message = %failure.message,
                    "Workflow failed"
                );
            }
        },

        AppEvent::Process(event) => match event {
            ProcessEvent::Started { command } => {
                debug!(
                    source,
                    correlation = ?meta.correlation_id,
                    cwd = ?command.cwd,
                    "Spawned {}",
                    command.command_line()
                );
            }
            ProcessEvent::Output { line } => {
                trace!(source, "{line}");
            }
            ProcessEvent::Exited {
                command,
                code,
                success,
            } => {
                debug!(
                    source,
                    correlation = ?meta.correlation_id,
                    program = %command.program,
                    code = ?code,
                    success,
                    "Process exited"
                );
            }
        },
    }
}
