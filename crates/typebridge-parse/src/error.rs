//! Error types for discovery and loading

use std::path::PathBuf;

use thiserror::Error;
use typebridge_core::CoreError;

#[derive(Error, Debug)]
pub enum ParseError {
    /// A file or directory could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A source file could not be parsed as Rust
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// An annotation carried arguments the loader does not understand
    #[error("invalid attribute on {symbol}: {message}")]
    Attribute { symbol: String, message: String },

    /// Symbol registration failed (duplicate name)
    #[error(transparent)]
    Core(#[from] CoreError),
}
