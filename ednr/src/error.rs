//! Error handling for the `ednr` CLI.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdnrError {
    #[error("failed to read {path:?}: {source}")]
    Io { path: PathBuf, #[source] source: std::io::Error },

    #[error("{count} form(s) failed to read")]
    ReadErrors { count: usize },

    #[error("--register-tag value must look like `tag` or `ns/tag`, got {0:?}")]
    BadTagName(String),
}

pub type Result<T> = std::result::Result<T, EdnrError>;
