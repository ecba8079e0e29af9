//! Dataset build orchestration

use crate::assets::Assets;
use crate::environment::CondaEnvironment;
use crate::types::{BuildReport, EnvironmentStatus};
use lcdb_config::constants::{MANIFEST_FILE, WORKFLOW_FILE};
use lcdb_config::Config;
use lcdb_errors::{BuildError, Error, UserFacingError};
use lcdb_events::{
    AppEvent, EnvironmentEvent, EventEmitter, EventSender, FailureContext, WorkflowEvent,
};
use lcdb_hash::Fingerprint;
use lcdb_platform::{CommandOutput, Platform, PlatformCommand, PlatformContext};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs;

/// Builds the example dataset in one target directory
///
/// The steps are meant to run in order: target directory, environment,
/// workflow file, workflow run. [`Builder::build`] does exactly that.
pub struct Builder {
    config: Config,
    assets: Assets,
    platform: Platform,
    context: PlatformContext,
    target: PathBuf,
    root: Option<PathBuf>,
    environment: Option<CondaEnvironment>,
}

impl Builder {
    /// Create a builder for `target` that runs commands on the host
    #[must_use]
    pub fn new(target: impl Into<PathBuf>, config: Config, assets: Assets) -> Self {
        Self {
            config,
            assets,
            platform: Platform::current(),
            context: PlatformContext::default(),
            target: target.into(),
            root: None,
            environment: None,
        }
    }

    /// Replace the platform used to run external commands
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Context used for every emitted event and spawned command
    #[must_use]
    pub fn with_context(mut self, context: PlatformContext) -> Self {
        self.context = context;
        self
    }

    /// Emit events on `sender` without a correlation id
    #[must_use]
    pub fn with_event_sender(self, sender: EventSender) -> Self {
        self.with_context(PlatformContext::new(Some(sender)))
    }

    /// Absolute dataset directory, once [`Builder::ensure_target_dir`] ran
    #[must_use]
    pub fn target_dir(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// The environment chosen by [`Builder::ensure_environment`]
    #[must_use]
    pub fn environment(&self) -> Option<&CondaEnvironment> {
        self.environment.as_ref()
    }

    /// Run every step in order and then the workflow with `args`
    ///
    /// # Errors
    ///
    /// Returns the first error of any step. A non-zero exit of either
    /// external command surfaces as `ProcessError::ExitStatus`.
    pub async fn build(&mut self, args: &[String]) -> Result<BuildReport, Error> {
        self.emit_operation_started("build");
        match self.run_steps(args).await {
            Ok(report) => {
                self.emit_operation_completed("build", true);
                Ok(report)
            }
            Err(err) => {
                self.emit_operation_failed("build", err.user_message());
                Err(err)
            }
        }
    }

    async fn run_steps(&mut self, args: &[String]) -> Result<BuildReport, Error> {
        let target = self.ensure_target_dir().await?.to_path_buf();
        let status = self.ensure_environment().await?;
        let snakefile = self.write_workflow_file().await?;
        let output = self.run_workflow(args).await?;

        let env = self
            .environment
            .as_ref()
            .ok_or(BuildError::EnvironmentNotReady)?;

        Ok(BuildReport {
            target,
            prefix: env.prefix(),
            fingerprint: env.fingerprint(),
            environment: status,
            snakefile,
            workflow_duration: output.duration,
        })
    }

    /// Create the target directory if needed and resolve it to an absolute path
    ///
    /// # Errors
    ///
    /// Returns `BuildError::InvalidTarget` if the path exists but is not a
    /// directory, or an I/O error if it cannot be created.
    pub async fn ensure_target_dir(&mut self) -> Result<&Path, Error> {
        match fs::metadata(&self.target).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(BuildError::InvalidTarget {
                    path: self.target.display().to_string(),
                }
                .into())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.emit(AppEvent::Workflow(WorkflowEvent::TargetCreated {
                    path: self.target.clone(),
                }));
                fs::create_dir_all(&self.target)
                    .await
                    .map_err(|e| Error::io_with_path(&e, &self.target))?;
            }
            Err(e) => return Err(Error::io_with_path(&e, &self.target)),
        }

        let root = fs::canonicalize(&self.target)
            .await
            .map_err(|e| Error::io_with_path(&e, &self.target))?;
        Ok(self.root.insert(root).as_path())
    }

    /// Write the manifest and make sure a matching environment exists
    ///
    /// The manifest is rewritten on every call and the fingerprint is taken
    /// from the very bytes that were written.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be written, the prefix directory
    /// is left over from an interrupted creation, or `conda create` fails.
    pub async fn ensure_environment(&mut self) -> Result<EnvironmentStatus, Error> {
        let root = self.root_dir().await?;

        if let Some(source) = self.assets.manifest_source() {
            self.emit_warning(format!(
                "{MANIFEST_FILE} taken from {} instead of the bundled package list",
                source.display()
            ));
        }

        let manifest = self.assets.manifest();
        let manifest_path = root.join(MANIFEST_FILE);
        fs::write(&manifest_path, manifest)
            .await
            .map_err(|e| Error::io_with_path(&e, &manifest_path))?;
        let fingerprint = Fingerprint::from_data(manifest);

        self.emit(AppEvent::Environment(EnvironmentEvent::ManifestWritten {
            path: manifest_path,
            fingerprint: fingerprint.to_hex(),
            bytes: manifest.len(),
        }));

        let env = CondaEnvironment::new(root, fingerprint);
        let status = if env.is_ready().await? {
            self.emit(AppEvent::Environment(EnvironmentEvent::Reused {
                prefix: env.prefix(),
            }));
            EnvironmentStatus::Reused
        } else {
            self.create_environment(&env).await?
        };

        self.environment = Some(env);
        Ok(status)
    }

    async fn create_environment(
        &self,
        env: &CondaEnvironment,
    ) -> Result<EnvironmentStatus, Error> {
        let start = Instant::now();
        let prefix = env.prefix();

        self.emit(AppEvent::Environment(EnvironmentEvent::BuildStarted {
            prefix: prefix.clone(),
            fingerprint: env.fingerprint().short(),
        }));

        let env_root = env.env_root();
        fs::create_dir_all(&env_root)
            .await
            .map_err(|e| Error::io_with_path(&e, &env_root))?;
        // A prefix without a marker is an interrupted creation; it is never reused
        fs::create_dir(&prefix)
            .await
            .map_err(|e| Error::io_with_path(&e, &prefix))?;

        let cmd = env.create_command(&self.config);
        if let Err(err) = self.run_checked(&cmd).await {
            self.emit(AppEvent::Environment(EnvironmentEvent::BuildFailed {
                prefix,
                failure: FailureContext::from_error(&err),
            }));
            return Err(err);
        }

        let marker = env.marker_path();
        fs::write(&marker, b"")
            .await
            .map_err(|e| Error::io_with_path(&e, &marker))?;

        let duration = start.elapsed();
        self.emit(AppEvent::Environment(EnvironmentEvent::Built { prefix, duration }));
        Ok(EnvironmentStatus::Created { duration })
    }

    /// Copy the workflow description into the target directory
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn write_workflow_file(&mut self) -> Result<PathBuf, Error> {
        let root = self.root_dir().await?;
        let path = root.join(WORKFLOW_FILE);
        let contents = self.assets.snakefile();

        if let Some(source) = self.assets.snakefile_source() {
            self.emit_warning(format!(
                "{WORKFLOW_FILE} taken from {} instead of the bundled workflow",
                source.display()
            ));
        }

        fs::write(&path, contents)
            .await
            .map_err(|e| Error::io_with_path(&e, &path))?;

        self.emit(AppEvent::Workflow(WorkflowEvent::WorkflowWritten {
            path: path.clone(),
            bytes: contents.len(),
        }));
        Ok(path)
    }

    /// Run the workflow runner from the environment, passing `args` through
    ///
    /// Output is streamed as it is produced.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::EnvironmentNotReady` if no environment has been
    /// ensured, `BuildError::RunnerNotFound` if the environment does not
    /// provide the runner, and `ProcessError::ExitStatus` if it fails.
    pub async fn run_workflow(&self, args: &[String]) -> Result<CommandOutput, Error> {
        let env = self
            .environment
            .as_ref()
            .ok_or(BuildError::EnvironmentNotReady)?;

        let mut cmd =
            env.activated_command(&self.config.workflow.runner, std::env::var_os("PATH"))?;
        cmd.args(args);

        let runner = Path::new(cmd.program());
        let present = fs::try_exists(runner)
            .await
            .map_err(|e| Error::io_with_path(&e, runner))?;
        if !present {
            return Err(BuildError::RunnerNotFound {
                path: cmd.program().to_string(),
            }
            .into());
        }

        self.emit(AppEvent::Workflow(WorkflowEvent::RunStarted {
            working_dir: env.root().to_path_buf(),
            runner: cmd.program().to_string(),
            args: args.to_vec(),
        }));

        match self.run_checked(&cmd).await {
            Ok(output) => {
                self.emit(AppEvent::Workflow(WorkflowEvent::RunCompleted {
                    duration: output.duration,
                }));
                Ok(output)
            }
            Err(err) => {
                self.emit(AppEvent::Workflow(WorkflowEvent::RunFailed {
                    failure: FailureContext::from_error(&err),
                }));
                Err(err)
            }
        }
    }

    /// Stream `cmd` and turn a non-zero exit into an error, logging the command
    /// on any failure
    async fn run_checked(&self, cmd: &PlatformCommand) -> Result<CommandOutput, Error> {
        let result = self
            .platform
            .execute_streaming(&self.context, cmd)
            .await
            .and_then(|output| output.into_result(cmd));
        result.inspect_err(|err| {
            self.emit_error_with_details(
                err.user_message(),
                format!("CMDS: {}", cmd.command_line()),
            );
        })
    }

    async fn root_dir(&mut self) -> Result<PathBuf, Error> {
        if let Some(root) = &self.root {
            return Ok(root.clone());
        }
        self.ensure_target_dir().await.map(Path::to_path_buf)
    }
}

impl EventEmitter for Builder {
    fn event_sender(&self) -> Option<&EventSender> {
        self.context.event_sender()
    }

    fn correlation_id(&self) -> Option<&str> {
        self.context.correlation_id()
    }
}
