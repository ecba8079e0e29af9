//! Event handling and user feedback

use crate::logging::log_event_with_tracing;
use console::Style;
use lcdb_events::{
    AppEvent, EnvironmentEvent, EventMessage, GeneralEvent, ProcessEvent, WorkflowEvent,
};
use std::io::Write;

/// Event handler for streamed output and status lines
///
/// Child output, stdout and stderr combined, goes to stdout the moment it
/// arrives. Status lines go to stderr so stdout stays the child's.
pub struct EventHandler {
    /// Whether colors should be used in output
    colors_enabled: bool,
    /// Emit events as JSON lines instead of text
    json_mode: bool,
    /// Whether debug mode is enabled
    debug_enabled: bool,
}

impl EventHandler {
    pub fn new(colors_enabled: bool, json_mode: bool, debug_enabled: bool) -> Self {
        Self {
            colors_enabled,
            json_mode,
            debug_enabled,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, message: EventMessage) {
        log_event_with_tracing(&message);

        if self.json_mode {
            self.print_json(&message);
            return;
        }

        match &message.event {
            AppEvent::Process(ProcessEvent::Output { line }) => Self::print_output(line),
            AppEvent::Process(ProcessEvent::Started { command }) if self.debug_enabled => {
                self.show_status(&format!("$ {}", command.command_line()));
            }
            AppEvent::Process(_) => {}

            AppEvent::Workflow(event) => self.handle_workflow_event(event),
            AppEvent::Environment(event) => self.handle_environment_event(event),
            AppEvent::General(event) => self.handle_general_event(event),
        }
    }

    fn handle_workflow_event(&self, event: &WorkflowEvent) {
        match event {
            WorkflowEvent::TargetCreated { path } => {
                self.show_status(&format!("Creating {}", path.display()));
            }
            WorkflowEvent::RunStarted { working_dir, .. } => {
                self.show_status(&format!("Running snakemake in {}", working_dir.display()));
            }
            WorkflowEvent::RunCompleted { duration } => {
                self.show_success(&format!(
                    "Workflow completed in {:.1}s",
                    duration.as_secs_f64()
                ));
            }
            WorkflowEvent::RunFailed { failure } => {
                if self.debug_enabled {
                    self.show_error(&format!("Workflow failed: {}", failure.message));
                }
            }
            WorkflowEvent::WorkflowWritten { path, .. } => {
                if self.debug_enabled {
                    self.show_status(&format!("Wrote {}", path.display()));
                }
            }
        }
    }

    fn handle_environment_event(&self, event: &EnvironmentEvent) {
        match event {
            EnvironmentEvent::BuildStarted { prefix, .. } => {
                self.show_status(&format!("Building environment in {}", prefix.display()));
            }
            EnvironmentEvent::Built { duration, .. } => {
                self.show_success(&format!(
                    "Built environment in {:.1}s",
                    duration.as_secs_f64()
                ));
            }
            EnvironmentEvent::Reused { prefix } => {
                self.show_status(&format!("Using existing environment {}", prefix.display()));
            }
            EnvironmentEvent::BuildFailed { prefix, failure } => {
                if self.debug_enabled {
                    self.show_error(&format!(
                        "Environment creation failed in {}: {}",
                        prefix.display(),
                        failure.message
                    ));
                }
            }
            EnvironmentEvent::ManifestWritten {
                path, fingerprint, ..
            } => {
                if self.debug_enabled {
                    self.show_status(&format!("Wrote {} ({fingerprint})", path.display()));
                }
            }
        }
    }

    fn handle_general_event(&self, event: &GeneralEvent) {
        match event {
            // The message itself is printed by main once the build returns
            GeneralEvent::Error { message, details } => match details {
                Some(details) => self.show_error(details),
                None => self.show_error(message),
            },
            GeneralEvent::Warning { message } => {
                self.show_warning(&format!("Warning: {message}"));
            }
            GeneralEvent::OperationStarted { .. }
            | GeneralEvent::OperationCompleted { .. }
            | GeneralEvent::OperationFailed { .. } => {}
        }
    }

    fn print_json(&self, message: &EventMessage) {
        match serde_json::to_string(message) {
            Ok(json) => println!("{json}"),
            Err(e) => self.show_error(&format!("failed to serialize event: {e}")),
        }
    }

    fn print_output(line: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{line}");
        let _ = stdout.flush();
    }

    fn style(&self, style: Style) -> Style {
        if self.colors_enabled {
            style.force_styling(true)
        } else {
            Style::new().force_styling(false)
        }
    }

    fn show_status(&self, message: &str) {
        eprintln!("{}", self.style(Style::new().cyan()).apply_to(message));
    }

    fn show_success(&self, message: &str) {
        eprintln!("{}", self.style(Style::new().green()).apply_to(message));
    }

    fn show_warning(&self, message: &str) {
        eprintln!("{}", self.style(Style::new().yellow()).apply_to(message));
    }

    fn show_error(&self, message: &str) {
        eprintln!("{}", self.style(Style::new().red().bold()).apply_to(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcdb_events::{EventMeta, EventSource, FailureContext};
    use std::time::Duration;

    fn message(event: AppEvent) -> EventMessage {
        EventMessage::new(event)
    }

    #[test]
    fn test_handler_accepts_every_domain() {
        let mut handler = EventHandler::new(false, false, true);
        handler.handle_event(message(AppEvent::Process(ProcessEvent::Output {
            line: "rule all:".to_string(),
        })));
        handler.handle_event(message(AppEvent::Environment(EnvironmentEvent::Built {
            prefix: "/tmp/x/.conda-env/bdf917".into(),
            duration: Duration::from_secs(3),
        })));
        handler.handle_event(message(AppEvent::Workflow(WorkflowEvent::RunFailed {
            failure: FailureContext::new(Some("process.exit_status"), "exit 1", None::<String>, false),
        })));
        handler.handle_event(message(AppEvent::General(GeneralEvent::warning("careful"))));
    }

    #[test]
    fn test_json_mode_serializes_messages() {
        let mut handler = EventHandler::new(false, true, false);
        let msg = EventMessage {
            meta: EventMeta::new(tracing::Level::INFO, EventSource::WORKFLOW),
            event: AppEvent::Workflow(WorkflowEvent::TargetCreated {
                path: "/tmp/data".into(),
            }),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"domain\":\"workflow\""));
        handler.handle_event(msg);
    }
}
