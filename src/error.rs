//! Error handling and custom error types
//!
//! Every failure of an analysis attempt is terminal for that attempt; nothing
//! in this crate retries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Image encoding error: {0}")]
    Encoding(String),

    #[error("API error (status {status}): {body}")]
    Server { status: u16, body: String },

    #[error("Malformed response: {detail}")]
    MalformedResponse { detail: String },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
