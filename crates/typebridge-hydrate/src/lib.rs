//! typebridge-hydrate - Inbound hydration of typed instances
//!
//! Turns a raw field mapping into a validated [`Instance`] of a registered
//! schema:
//! - [`TypedValue`] and the primitive coercion table
//! - structural constraint evaluation with first-failure-wins semantics
//! - named mutator/validator pipelines via [`StepRegistry`]
//! - [`Translator`] and [`EntityStore`] collaborator seams
//! - [`Hydrator`] driving the whole build, plus `get_one`/`get_many`
//!   identifier resolution and the `fill` assignment helper

pub mod constraint;
mod context;
mod error;
mod hydrator;
mod steps;
mod value;

pub use context::{EntityStore, IdentityTranslator, NullStore, Translator};
pub use error::HydrateError;
pub use hydrator::{Hydrator, ResolveFn};
pub use steps::{MutatorFn, StepRegistry, ValidatorFn};
pub use value::{Instance, TypedValue};
