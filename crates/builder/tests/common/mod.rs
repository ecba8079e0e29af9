//! Shared fixtures for builder tests

#![allow(dead_code)]

use async_trait::async_trait;
use lcdb_errors::Error;
use lcdb_events::{AppEvent, EventEmitter, EventMessage, EventReceiver, ProcessEvent};
use lcdb_platform::{CommandOutput, Platform, PlatformCommand, PlatformContext, ProcessOperations};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const MANIFEST: &[u8] = b"packageA\npackageB\n";
pub const SNAKEFILE: &[u8] = b"rule all:\n    input: []\n";

/// Process operations that record every command instead of running it
///
/// A successful `conda create` is simulated by creating the prefix's
/// `bin/snakemake` so the workflow step finds its runner.
#[derive(Clone, Default)]
pub struct RecordingProcess {
    calls: Arc<Mutex<Vec<PlatformCommand>>>,
    failing: Option<(String, i32)>,
}

impl RecordingProcess {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands whose program ends with `program` exit with `code`
    pub fn failing(program: &str, code: i32) -> Self {
        Self {
            calls: Arc::default(),
            failing: Some((program.to_string(), code)),
        }
    }

    pub fn calls(&self) -> Vec<PlatformCommand> {
        self.calls.lock().unwrap().clone()
    }

    pub fn platform(&self) -> Platform {
        Platform::new(Box::new(self.clone()))
    }

    fn exit_code(&self, cmd: &PlatformCommand) -> i32 {
        match &self.failing {
            Some((program, code)) if cmd.program().ends_with(program.as_str()) => *code,
            _ => 0,
        }
    }
}

fn populate_prefix(cmd: &PlatformCommand) {
    let args = cmd.get_args();
    let Some(pos) = args.iter().position(|a| a == "--prefix") else {
        return;
    };
    let cwd = cmd.get_current_dir().unwrap_or(Path::new("."));
    let bin = cwd.join(&args[pos + 1]).join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    std::fs::write(bin.join("snakemake"), b"").unwrap();
}

#[async_trait]
impl ProcessOperations for RecordingProcess {
    async fn execute_streaming(
        &self,
        ctx: &PlatformContext,
        cmd: &PlatformCommand,
    ) -> Result<CommandOutput, Error> {
        self.calls.lock().unwrap().push(cmd.clone());

        let code = self.exit_code(cmd);
        if code == 0 && cmd.get_args().first().map(String::as_str) == Some("create") {
            populate_prefix(cmd);
        }

        ctx.emit(AppEvent::Process(ProcessEvent::Output {
            line: format!("ran {}", cmd.command_line()),
        }));

        Ok(CommandOutput {
            code: Some(code),
            lines: 1,
            duration: Duration::from_millis(5),
        })
    }
}

/// Everything currently queued on the receiver
pub fn drain(rx: &mut EventReceiver) -> Vec<EventMessage> {
    let mut messages = Vec::new();
    while let Ok(message) = rx.try_recv() {
        messages.push(message);
    }
    messages
}

/// Path of the dataset directory inside a scratch directory
pub fn target_in(scratch: &Path) -> PathBuf {
    scratch.join("data")
}
