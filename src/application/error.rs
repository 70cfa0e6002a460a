//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add loading, persisting and
/// configuration concerns.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("this localizator cannot perform reading operations")]
    CannotRead,

    #[error("this localizator cannot perform writing operations")]
    CannotWrite,

    #[error("couldn't read localization: \"{0}\"")]
    CannotReadLocalization(String),

    #[error("couldn't write localization: \"{0}\"")]
    CannotWriteLocalization(String),

    #[error("localization singleton is not initialized")]
    SingletonNotInitialized,

    #[error("cannot convert localization data: {message}")]
    Codec { message: String },

    #[error("invalid localization json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    pub(crate) fn codec(message: impl Into<String>) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
