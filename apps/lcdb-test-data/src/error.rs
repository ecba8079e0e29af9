//! CLI error handling

use std::fmt;

use lcdb_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration error
    Config(lcdb_errors::ConfigError),
    /// Build error from any step
    Build(lcdb_errors::Error),
    /// I/O error while rendering output
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => {
                write!(f, "Configuration error: {e}")?;
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                Ok(())
            }
            CliError::Build(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                if e.is_retryable() {
                    write!(f, "\n  Retry: safe to retry this operation.")?;
                }
                Ok(())
            }
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Build(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<lcdb_errors::Error> for CliError {
    fn from(e: lcdb_errors::Error) -> Self {
        match e {
            lcdb_errors::Error::Config(config) => CliError::Config(config),
            other => CliError::Build(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcdb_errors::{ConfigError, ProcessError};

    #[test]
    fn test_process_failure_shows_code_and_hint() {
        let err = CliError::from(lcdb_errors::Error::from(ProcessError::ExitStatus {
            command: vec!["conda".into(), "create".into()],
            code: 1,
        }));
        let text = err.to_string();
        assert!(text.starts_with("command `conda create` exited with status 1"));
        assert!(text.contains("Code: process.exit_status"));
    }

    #[test]
    fn test_config_errors_are_unwrapped() {
        let err = CliError::from(lcdb_errors::Error::from(ConfigError::NotFound {
            path: "/etc/nowhere.toml".into(),
        }));
        assert!(matches!(err, CliError::Config(ConfigError::NotFound { .. })));
    }
}
