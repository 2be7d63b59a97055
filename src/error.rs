// src/error.rs
//! Error kinds surfaced at the edges of the generator (loading, rendering, config)

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CvError {
    /// Caller data that cannot be turned into a profile record,
    /// e.g. a reference that is neither text nor a structured map.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The external renderer failed or returned something that is not a PDF.
    #[error("render failed: {0}")]
    Render(String),

    #[error("config error: {message}")]
    Config { message: String },
}

pub type Result<T> = std::result::Result<T, CvError>;

impl CvError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}
