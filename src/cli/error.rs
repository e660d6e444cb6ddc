//! CLI-level errors (wraps outline errors)

use thiserror::Error;

use crate::errors::OutlineError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Outline(#[from] OutlineError),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Outline(e) => match e {
                OutlineError::Parse { .. }
                | OutlineError::PathNotFound { .. }
                | OutlineError::InvalidKey(_)
                | OutlineError::InvalidMove { .. } => crate::exitcode::DATAERR,
                OutlineError::Io(_) => crate::exitcode::IOERR,
                OutlineError::Config(_) => crate::exitcode::SOFTWARE,
            },
        }
    }
}
