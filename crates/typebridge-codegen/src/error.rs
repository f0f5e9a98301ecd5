//! Error types for generation passes

use thiserror::Error;

/// Fatal conditions that abort the current generation pass.
#[derive(Error, Debug)]
pub enum GenError {
    /// A declared type maps to no known primitive or schema
    #[error("unresolved type `{type_name}` in {context}")]
    UnresolvedType { type_name: String, context: String },

    /// A second, differently-bodied declaration was registered under an
    /// existing name
    #[error("duplicate definition: {name}")]
    DuplicateDeclaration { name: String },

    /// A schema name passed to the projector is not registered
    #[error("unknown schema: {name}")]
    UnknownSchema { name: String },
}
