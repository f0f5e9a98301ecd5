//! # typebridge
//!
//! Keeps a Rust-side annotated object model and a TypeScript client in sync:
//! annotated structs, enums, and controller impls project outward into
//! TypeScript declarations plus client stubs, and raw key/value input
//! hydrates inward into validated, typed instances of the same schemas.
//!
//! ## Generating TypeScript
//!
//! ```no_run
//! use typebridge::{Generator, NoHooks, NullFormatter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = typebridge::load("./src".as_ref(), "app")?;
//! let code = Generator::new(&registry).run(&NoHooks, &NullFormatter)?;
//! println!("{code}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Hydrating input
//!
//! ```no_run
//! use typebridge::{Hydrator, IdentityTranslator, NullStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let registry = typebridge::load("./src".as_ref(), "app")?;
//! let hydrator = Hydrator::new(&registry, Box::new(IdentityTranslator), Box::new(NullStore));
//! let raw = serde_json::json!({"title": "hello"});
//! let instance = match raw {
//!     serde_json::Value::Object(map) => hydrator.build("Article", &map)?,
//!     _ => unreachable!(),
//! };
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`typebridge_core`] - Schema model, tags, registry, type resolution
//! - [`typebridge_parse`] - Symbol discovery and syn-based loading
//! - [`typebridge_codegen`] - TypeScript declaration and stub generation
//! - [`typebridge_hydrate`] - Validated hydration of typed instances

// Re-export core types
pub use typebridge_core::{
    CaseValue, ClassSymbol, ClassSymbolBuilder, Constraint, CoreError, DeclaredType, EnumCase,
    FieldDescriptor, MethodDescriptor, NamedType, Primitive, ResolvedType, Rule, SchemaRegistry,
    SymbolKind, Tag, TagKind, TagSet, TypeDescriptor, TypeResolver,
};

// Re-export discovery and loading
pub use typebridge_parse::{load, load_file, load_source, scan, Discovered, ParseError};

// Re-export generation
pub use typebridge_codegen::{
    Formatter, GenError, Generator, NoHooks, NullFormatter, Projector, TypeHooks,
};

// Re-export hydration
pub use typebridge_hydrate::{
    EntityStore, HydrateError, Hydrator, IdentityTranslator, Instance, NullStore, StepRegistry,
    Translator, TypedValue,
};

// Re-export common dependencies that callers need
pub use serde_json;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use typebridge::prelude::*;` to import commonly used types.
pub mod prelude {
    pub use crate::{
        ClassSymbol, Constraint, DeclaredType, FieldDescriptor, GenError, Generator, HydrateError,
        Hydrator, Instance, MethodDescriptor, Projector, Rule, SchemaRegistry, SymbolKind, Tag,
        TagKind, TagSet, TypeDescriptor, TypedValue,
    };
}
