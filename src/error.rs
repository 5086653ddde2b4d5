use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },
    #[error("failed to fetch source issue: {0}")]
    SourceFetch(String),
    #[error("failed to create ticket: {0}")]
    Creation(String),
    #[error("failed to attach link '{title}' to {key}: {reason}")]
    LinkAttach {
        key: String,
        title: String,
        reason: String,
    },
    #[error("{failed} of {total} links could not be attached to {key}")]
    LinkAttachments {
        key: String,
        failed: usize,
        total: usize,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
