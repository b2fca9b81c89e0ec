//! Application-level errors (wraps store errors)

use thiserror::Error;

use crate::domain::render_errors;
use crate::infrastructure::store::StoreError;

/// Application errors: rejected commands, store failures, configuration problems.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{}", render_errors(.0))]
    InvalidCommand(Vec<String>),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
