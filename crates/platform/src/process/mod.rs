//! Process execution operations

use async_trait::async_trait;
use lcdb_errors::{Error, ProcessError};
use lcdb_events::ProcessCommandDescriptor;
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::PlatformContext;

/// Platform-specific command builder and execution
///
/// Arguments are kept as a vector and handed to the child verbatim. Nothing
/// is ever interpreted by a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformCommand {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    env_vars: BTreeMap<String, OsString>,
}

impl PlatformCommand {
    /// Create a new platform command
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            env_vars: BTreeMap::new(),
        }
    }

    /// Add an argument to the command
    pub fn arg<S: AsRef<str>>(&mut self, arg: S) -> &mut Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    /// Add multiple arguments to the command
    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_string());
        }
        self
    }

    /// Set the working directory for the command
    pub fn current_dir<P: Into<PathBuf>>(&mut self, dir: P) -> &mut Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Set an environment variable for the child only
    pub fn env<K: Into<String>, V: AsRef<OsStr>>(&mut self, key: K, value: V) -> &mut Self {
        self.env_vars
            .insert(key.into(), value.as_ref().to_os_string());
        self
    }

    /// Get the program name
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Get the arguments
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Get the current directory
    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Get the environment overrides
    pub fn get_env_vars(&self) -> &BTreeMap<String, OsString> {
        &self.env_vars
    }

    /// Look up one environment override
    pub fn get_env(&self, key: &str) -> Option<&OsStr> {
        self.env_vars.get(key).map(OsString::as_os_str)
    }

    /// Program followed by arguments, as reported in errors
    pub fn tokens(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Tokens joined with single spaces, for display only
    pub fn command_line(&self) -> String {
        self.tokens().join(" ")
    }

    /// Event-friendly description of this command
    pub fn descriptor(&self) -> ProcessCommandDescriptor {
        ProcessCommandDescriptor {
            program: self.program.clone(),
            args: self.args.clone(),
            cwd: self.current_dir.clone(),
        }
    }
}

/// Outcome of a streamed command
///
/// Output itself is not retained: every line has already been emitted as a
/// `ProcessEvent::Output` by the time this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the child was killed by a signal
    pub code: Option<i32>,
    /// Number of lines forwarded from the combined output
    pub lines: usize,
    /// Wall time from spawn to exit
    pub duration: Duration,
}

impl CommandOutput {
    /// Whether the child exited with status zero
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn a non-zero exit into the process failure error
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExitStatus` for a non-zero code and
    /// `ProcessError::Terminated` when no code was reported.
    pub fn into_result(self, command: &PlatformCommand) -> Result<Self, Error> {
        match self.code {
            Some(0) => Ok(self),
            Some(code) => Err(ProcessError::ExitStatus {
                command: command.tokens(),
                code,
            }
            .into()),
            None => Err(ProcessError::Terminated {
                command: command.tokens(),
            }
            .into()),
        }
    }
}

/// Trait for process execution operations
#[async_trait]
pub trait ProcessOperations: Send + Sync {
    /// Run a command to completion, emitting each output line as it arrives
    ///
    /// A non-zero exit is *not* an error here; callers decide via
    /// [`CommandOutput::into_result`].
    async fn execute_streaming(
        &self,
        ctx: &PlatformContext,
        cmd: &PlatformCommand,
    ) -> Result<CommandOutput, Error>;
}
