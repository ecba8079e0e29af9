//! Native process operations implementation
//!
//! Children write stdout and stderr into one shared pipe, so the parent reads
//! a single stream in the order the child produced it. Every line is emitted
//! the moment it is read, so a long `conda create` or Snakemake run shows
//! progress live.

use async_trait::async_trait;
use lcdb_errors::{Error, ProcessError};
use lcdb_events::{AppEvent, EventEmitter, ProcessEvent};
use std::io::{BufRead, BufReader, PipeReader};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;

use crate::core::PlatformContext;
use crate::process::{CommandOutput, PlatformCommand, ProcessOperations};

/// Native implementation of process operations
pub struct NativeProcessOperations;

impl NativeProcessOperations {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeProcessOperations {
    fn default() -> Self {
        Self::new()
    }
}

fn emit_line(ctx: &PlatformContext, raw: &[u8]) {
    let text = String::from_utf8_lossy(raw);
    let line = text.strip_suffix('\r').unwrap_or(&text).to_string();
    ctx.emit(AppEvent::Process(ProcessEvent::Output { line }));
}

/// Read the combined output until every write end is closed
fn forward_lines(ctx: &PlatformContext, reader: PipeReader) -> std::io::Result<usize> {
    let mut lines = 0usize;
    for segment in BufReader::new(reader).split(b'\n') {
        emit_line(ctx, &segment?);
        lines += 1;
    }
    Ok(lines)
}

#[async_trait]
impl ProcessOperations for NativeProcessOperations {
    async fn execute_streaming(
        &self,
        ctx: &PlatformContext,
        cmd: &PlatformCommand,
    ) -> Result<CommandOutput, Error> {
        let start = Instant::now();
        let descriptor = cmd.descriptor();

        let (reader, writer) = std::io::pipe()?;
        let stderr_writer = writer.try_clone()?;

        let mut command = Command::new(cmd.program());
        command
            .args(cmd.get_args())
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr_writer)
            .kill_on_drop(true);

        if let Some(dir) = cmd.get_current_dir() {
            command.current_dir(dir);
        }

        for (key, value) in cmd.get_env_vars() {
            command.env(key, value);
        }

        let spawned = command.spawn();
        // `command` still owns the parent's write ends; the reader only sees
        // EOF once they are closed
        drop(command);
        let mut child = spawned.map_err(|e| ProcessError::SpawnFailed {
            program: cmd.program().to_string(),
            message: e.to_string(),
        })?;

        ctx.emit(AppEvent::Process(ProcessEvent::Started {
            command: descriptor.clone(),
        }));

        let reader_ctx = ctx.clone();
        let lines = tokio::task::spawn_blocking(move || forward_lines(&reader_ctx, reader))
            .await
            .map_err(|e| Error::internal(format!("output reader stopped: {e}")))??;

        let status = child.wait().await?;

        ctx.emit(AppEvent::Process(ProcessEvent::Exited {
            command: descriptor,
            code: status.code(),
            success: status.success(),
        }));

        Ok(CommandOutput {
            code: status.code(),
            lines,
            duration: start.elapsed(),
        })
    }
}
