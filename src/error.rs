use thiserror::Error;

use crate::models::story::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request body: {0}")]
    Validation(ValidationErrors),
    #[error("Failed to generate story: {0}")]
    Upstream(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
