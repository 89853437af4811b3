use std::path::PathBuf;
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

/// Failures while loading the corpus or persisting bookmarks.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("corpus data is empty")]
    EmptyCorpus,

    #[error("corpus structure mismatch: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Resolution failures. None of these are fatal; the navigator state is left
/// untouched whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("'{0}' not found here")]
    NotFound(String),

    #[error("path element '{0}' not found")]
    PathElementNotFound(String),

    #[error("path '{0}' not found")]
    PathNotFound(String),

    #[error("no history")]
    NoHistory,
}
