//! Named transformation and validation steps
//!
//! Schemas reference steps by name (`#[mutate("trim")]`,
//! `#[validate("unique_email")]`); the registry binds those names to
//! closures. Steps see the instance under construction, so a later field's
//! step may read earlier assignments.

use std::collections::HashMap;

use crate::value::{Instance, TypedValue};

/// A transformation step: consumes the current value, returns the replacement
/// or a message.
pub type MutatorFn = Box<dyn Fn(&Instance, TypedValue) -> Result<TypedValue, String> + Send + Sync>;

/// A custom validation step: inspects the value, returns a message on
/// rejection.
pub type ValidatorFn = Box<dyn Fn(&Instance, &TypedValue) -> Result<(), String> + Send + Sync>;

#[derive(Default)]
pub struct StepRegistry {
    mutators: HashMap<String, MutatorFn>,
    validators: HashMap<String, ValidatorFn>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_mutator(
        &mut self,
        name: impl Into<String>,
        step: impl Fn(&Instance, TypedValue) -> Result<TypedValue, String> + Send + Sync + 'static,
    ) {
        self.mutators.insert(name.into(), Box::new(step));
    }

    pub fn register_validator(
        &mut self,
        name: impl Into<String>,
        step: impl Fn(&Instance, &TypedValue) -> Result<(), String> + Send + Sync + 'static,
    ) {
        self.validators.insert(name.into(), Box::new(step));
    }

    pub fn mutator(&self, name: &str) -> Option<&MutatorFn> {
        self.mutators.get(name)
    }

    pub fn validator(&self, name: &str) -> Option<&ValidatorFn> {
        self.validators.get(name)
    }
}
