use thiserror::Error;

use crate::services::SettingsError;

/// Errors raised while wiring up or driving the catalog.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Domain(#[from] domain::DomainError),
}

pub type AppResult<T> = Result<T, AppError>;
