//! Collaborator seams consumed during hydration
//!
//! Translation and entity storage are external concerns; the hydrator only
//! sees these two traits.

use crate::value::TypedValue;

/// Resolves a label key to human-facing text.
pub trait Translator {
    fn translate(&self, key: &str) -> String;
}

/// The no-translation default: keys pass through unchanged.
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Looks entities up by schema name and identifier.
pub trait EntityStore {
    fn find_by_id(&self, schema: &str, id: &TypedValue) -> Option<TypedValue>;
}

/// A store with no entities.
pub struct NullStore;

impl EntityStore for NullStore {
    fn find_by_id(&self, _schema: &str, _id: &TypedValue) -> Option<TypedValue> {
        None
    }
}
