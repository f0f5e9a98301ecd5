//! Error types for the core schema model

use thiserror::Error;

/// Error type for schema registration and lookup
#[derive(Error, Debug)]
pub enum CoreError {
    /// A symbol with this fully-qualified name is already registered
    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),

    /// No symbol registered under this name
    #[error("unknown schema: {0}")]
    UnknownSchema(String),
}
