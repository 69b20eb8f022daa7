//! Expense service error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Expense service error (status {status_code}): {message}")]
    Api { status_code: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode expense service response: {0}")]
    Decode(#[from] serde_json::Error),
}
