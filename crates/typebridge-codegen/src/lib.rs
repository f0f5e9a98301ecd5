//! typebridge-codegen - Outbound projection to TypeScript
//!
//! Turns registered schemas into TypeScript declarations and controller
//! client stubs:
//! - [`Projector`] owns the per-pass declaration registry (append-only,
//!   unique names) and emits interfaces, enums, and type aliases
//! - [`Generator`] assembles a whole pass: declarations, one client class
//!   per controller, and the export index block
//! - [`TypeHooks`] and [`Formatter`] are the caller-supplied extension seams
//!
//! A fresh [`Projector`] is required per generation pass; the declaration
//! registry must not be shared across passes.

mod error;
mod hooks;
mod projector;
mod stubs;

pub use error::GenError;
pub use hooks::{Formatter, NoHooks, NullFormatter, TypeHooks};
pub use projector::Projector;
pub use stubs::Generator;
