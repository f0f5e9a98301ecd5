//! typebridge-parse - Symbol discovery and source loading
//!
//! This crate maps a source tree to loadable schema symbols:
//! - [`scan`] resolves each source file to a namespace (path convention
//!   first, textual namespace header as fallback; unresolvable files are
//!   skipped, not errors)
//! - [`load`] parses the resolved files with `syn` and registers every
//!   annotated struct, enum, and impl block as a [`ClassSymbol`]
//!
//! [`ClassSymbol`]: typebridge_core::ClassSymbol

mod error;
mod loader;
mod scanner;

pub use error::ParseError;
pub use loader::{load, load_file, load_source};
pub use scanner::{scan, Discovered};
