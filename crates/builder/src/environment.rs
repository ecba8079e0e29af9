//! Content-addressed conda environments inside a dataset directory

use lcdb_config::constants::{ENV_ROOT_DIR, MANIFEST_FILE, SUCCESS_MARKER};
use lcdb_config::{is_bare_name, Config};
use lcdb_errors::{ConfigError, Error};
use lcdb_hash::Fingerprint;
use lcdb_platform::PlatformCommand;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A conda environment keyed by the fingerprint of its package manifest
///
/// The prefix lives at `<root>/.conda-env/<first six hex chars>`. It counts
/// as usable only once the `.success` marker exists inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CondaEnvironment {
    root: PathBuf,
    fingerprint: Fingerprint,
}

impl CondaEnvironment {
    /// Environment for `fingerprint` under the dataset directory `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, fingerprint: Fingerprint) -> Self {
        Self {
            root: root.into(),
            fingerprint,
        }
    }

    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Dataset directory the environment belongs to
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Prefix relative to the dataset directory
    #[must_use]
    pub fn relative_prefix(&self) -> PathBuf {
        Path::new(ENV_ROOT_DIR).join(self.fingerprint.short())
    }

    #[must_use]
    pub fn prefix(&self) -> PathBuf {
        self.root.join(self.relative_prefix())
    }

    /// Directory holding every environment of this dataset
    #[must_use]
    pub fn env_root(&self) -> PathBuf {
        self.root.join(ENV_ROOT_DIR)
    }

    #[must_use]
    pub fn marker_path(&self) -> PathBuf {
        self.prefix().join(SUCCESS_MARKER)
    }

    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.prefix().join("bin")
    }

    /// Whether a previous creation ran to completion
    ///
    /// # Errors
    ///
    /// Returns an error if the marker's existence cannot be determined.
    pub async fn is_ready(&self) -> Result<bool, Error> {
        let marker = self.marker_path();
        fs::try_exists(&marker)
            .await
            .map_err(|e| Error::io_with_path(&e, marker))
    }

    /// `conda create` invocation that populates the prefix
    ///
    /// Runs from the dataset directory so the manifest and prefix are both
    /// given relative to it.
    #[must_use]
    pub fn create_command(&self, config: &Config) -> PlatformCommand {
        let mut cmd = PlatformCommand::new(&config.environment.conda);
        cmd.args(["create", "-y"]);
        for channel in &config.environment.channels {
            cmd.arg("-c").arg(channel);
        }
        cmd.arg("--file")
            .arg(MANIFEST_FILE)
            .arg("--prefix")
            .arg(self.relative_prefix().to_string_lossy())
            .arg(config.python_spec())
            .current_dir(&self.root);
        cmd
    }

    /// Command running `program` from this environment's `bin/`
    ///
    /// The child sees the environment as activated: `CONDA_PREFIX` and
    /// `CONDA_DEFAULT_ENV` point at the prefix and its `bin/` leads `PATH`,
    /// followed by `inherited_path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `program` is not a bare file
    /// name, or an error if the prefix cannot be joined into a `PATH` value.
    pub fn activated_command(
        &self,
        program: &str,
        inherited_path: Option<OsString>,
    ) -> Result<PlatformCommand, Error> {
        if !is_bare_name(program) {
            return Err(ConfigError::InvalidValue {
                field: "workflow.runner".to_string(),
                value: program.to_string(),
            }
            .into());
        }

        let prefix = self.prefix();
        let bin_dir = self.bin_dir();

        let inherited = inherited_path.unwrap_or_default();
        let path = std::env::join_paths(
            std::iter::once(bin_dir.clone()).chain(std::env::split_paths(&inherited)),
        )
        .map_err(|e| Error::internal(format!("cannot add {} to PATH: {e}", bin_dir.display())))?;

        let mut cmd = PlatformCommand::new(bin_dir.join(program).to_string_lossy());
        cmd.current_dir(&self.root)
            .env("CONDA_PREFIX", &prefix)
            .env("CONDA_DEFAULT_ENV", &prefix)
            .env("PATH", path);
        Ok(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> CondaEnvironment {
        let fingerprint = Fingerprint::from_data(b"packageA\npackageB\n");
        CondaEnvironment::new("/data/test", fingerprint)
    }

    #[test]
    fn test_prefix_layout() {
        let env = fixture();
        assert_eq!(env.relative_prefix(), Path::new(".conda-env/bdf917"));
        assert_eq!(env.prefix(), Path::new("/data/test/.conda-env/bdf917"));
        assert_eq!(
            env.marker_path(),
            Path::new("/data/test/.conda-env/bdf917/.success")
        );
    }

    #[test]
    fn test_create_command() {
        let cmd = fixture().create_command(&Config::default());
        assert_eq!(cmd.program(), "conda");
        assert_eq!(
            cmd.get_args(),
            [
                "create",
                "-y",
                "--file",
                "requirements.txt",
                "--prefix",
                ".conda-env/bdf917",
                "python=3"
            ]
        );
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/data/test")));
    }

    #[test]
    fn test_create_command_with_channels() {
        let mut config = Config::default();
        config.environment.conda = "mamba".to_string();
        config.environment.channels = vec!["conda-forge".to_string(), "bioconda".to_string()];

        let cmd = fixture().create_command(&config);
        assert_eq!(cmd.program(), "mamba");
        assert_eq!(
            &cmd.get_args()[..6],
            ["create", "-y", "-c", "conda-forge", "-c", "bioconda"]
        );
        assert_eq!(cmd.get_args()[6], "--file");
    }

    #[cfg(unix)]
    #[test]
    fn test_activated_command() {
        let cmd = fixture()
            .activated_command("snakemake", Some(OsString::from("/usr/bin:/bin")))
            .unwrap();
        assert_eq!(cmd.program(), "/data/test/.conda-env/bdf917/bin/snakemake");
        assert!(cmd.get_args().is_empty());
        assert_eq!(
            cmd.get_env("PATH").unwrap(),
            "/data/test/.conda-env/bdf917/bin:/usr/bin:/bin"
        );
        assert_eq!(
            cmd.get_env("CONDA_PREFIX").unwrap(),
            "/data/test/.conda-env/bdf917"
        );
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/data/test")));
    }

    #[test]
    fn test_activated_command_stays_inside_prefix() {
        for program in ["/usr/bin/snakemake", "../../bin/sh", "bin/snakemake", ""] {
            let err = fixture().activated_command(program, None).unwrap_err();
            assert!(
                matches!(err, Error::Config(ConfigError::InvalidValue { .. })),
                "{program}: {err:?}"
            );
        }
    }
}
