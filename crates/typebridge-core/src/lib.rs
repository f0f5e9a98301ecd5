//! typebridge-core - Schema model, tag metadata, and type resolution
//!
//! This crate provides the shared schema model both directions of typebridge
//! run on:
//! - [`ClassSymbol`] and friends for class-like schema definitions
//! - [`Tag`] / [`TagSet`] for declarative metadata attached to symbols
//! - [`TypeResolver`] for normalizing declared types into [`TypeDescriptor`]s
//! - [`SchemaRegistry`] for symbol lookup and slug generation

mod error;
mod registry;
mod symbol;
mod tag;
mod types;

pub use error::CoreError;
pub use registry::SchemaRegistry;
pub use symbol::{
    CaseValue, ClassSymbol, ClassSymbolBuilder, DeclaredType, EnumCase, FieldDescriptor,
    MethodDescriptor, NamedType, SymbolKind,
};
pub use tag::{Constraint, Rule, Tag, TagKind, TagSet};
pub use types::{Primitive, ResolvedType, TypeDescriptor, TypeResolver};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ClassSymbol, Constraint, CoreError, DeclaredType, FieldDescriptor, MethodDescriptor,
        NamedType, Rule, SchemaRegistry, SymbolKind, Tag, TagKind, TagSet, TypeDescriptor,
        TypeResolver,
    };
}
