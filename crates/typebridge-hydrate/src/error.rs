//! Error types for hydration

use thiserror::Error;

/// A hydration failure. There is no partial instance: the first failure
/// aborts the whole build.
#[derive(Error, Debug)]
pub enum HydrateError {
    /// A field-scoped failure: constraint violation, mutator or validator
    /// rejection, or a missing required value. `label` is already translated.
    #[error("{label}: {message}")]
    Field { label: String, message: String },

    /// A raw value could not be coerced to the target type.
    #[error("failed to convert. unexpected format: {type_name}")]
    Cast { type_name: String },

    /// An identifier did not resolve through the entity store.
    #[error("entity not found: {schema}")]
    NotFound { schema: String },

    /// The requested schema is not registered.
    #[error("unknown schema: {name}")]
    UnknownSchema { name: String },
}
