use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// Top-level error for the command pipelines
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Error fetching {what}: {source}")]
    Fetch {
        what: &'static str,
        source: ApiError,
    },

    #[error("Chart error: {0}")]
    Chart(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
