//! Errors raised at the edges of the crate: files, JSON and pattern text.
//!
//! Grid and stepper operations never fail.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pattern error: {0}")]
    Pattern(String),

    #[error("invalid setting: {0}")]
    InvalidSetting(String),
}
