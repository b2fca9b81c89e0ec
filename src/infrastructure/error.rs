//! Infrastructure-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// Application failures plus the process-level output the CLI writes itself.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// stdout went away while printing a command result (closed pipe, full disk).
    #[error("cannot write {what} to stdout")]
    Output {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    pub fn output(what: &'static str, source: std::io::Error) -> Self {
        Self::Output { what, source }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
