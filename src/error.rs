use thiserror::Error;

use crate::parser::ReadError;

#[derive(Error, Debug)]
pub enum SptError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Read(#[from] ReadError),

    #[error("{program} failed: {detail}")]
    Command { program: String, detail: String },

    #[error("no snapshot stored: run `sptable collect` first")]
    NoSnapshot,

    #[error("invalid pattern {pattern}: {detail}")]
    InvalidPattern { pattern: String, detail: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SptError>;
