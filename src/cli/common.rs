//! Shared CLI plumbing: exit codes, errors, and session loading.

use std::fmt;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::PprError;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Bad input: unknown names, malformed files, invalid arguments
    ValidationError = 1,
    /// Filesystem or external command failure
    IoError = 2,
}

impl ExitCode {
    /// Numeric code for `std::process::exit`.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error surfaced by a command, with the exit code it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code to terminate with
    pub code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

/// Result type of command handlers.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// A validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// An I/O failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Classifies an error chain: a domain error anywhere in the chain is a
    /// validation failure, everything else is I/O.
    pub fn from_chain(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");
        if PprError::find_in(err).is_some() {
            Self::validation(message)
        } else {
            Self::io(message)
        }
    }

    /// Exit code for `std::process::exit`.
    pub const fn exit_code(&self) -> i32 {
        self.code.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        Self::from_chain(&err)
    }
}

impl From<PprError> for CliError {
    fn from(err: PprError) -> Self {
        Self::validation(err.to_string())
    }
}

/// Loads the session config and the path it should be saved back to.
pub fn load_session() -> CliResult<(Config, PathBuf)> {
    let path = Config::config_file_path()
        .map_err(|e| CliError::io(format!("Failed to locate configuration: {e:#}")))?;
    let config = Config::load_from(&path)
        .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
    Ok((config, path))
}
