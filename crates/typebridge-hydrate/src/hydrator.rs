//! Recursive, validated instance construction
//!
//! `build` walks a schema's field plans in declaration order and stops at
//! the first failure; there is never a partial instance. Field plans are
//! resolved once at construction, so per-build work is a straight table
//! walk.

use std::collections::HashMap;

use typebridge_core::{
    Constraint, SchemaRegistry, SymbolKind, Tag, TagKind, TypeDescriptor, TypeResolver,
};

use crate::constraint;
use crate::context::{EntityStore, Translator};
use crate::error::HydrateError;
use crate::steps::StepRegistry;
use crate::value::{Instance, TypedValue};

/// Caller-supplied per-field resolver: receives each field's name and its
/// validated value, and its return becomes the final value.
pub type ResolveFn<'r> = dyn Fn(&str, TypedValue) -> TypedValue + 'r;

/// Everything hydration needs to know about one field, resolved up front.
struct FieldPlan {
    name: String,
    label_key: String,
    target: TypeDescriptor,
    default: Option<serde_json::Value>,
    constraints: Vec<Constraint>,
    mutators: Vec<String>,
    validators: Vec<String>,
}

pub struct Hydrator<'a> {
    registry: &'a SchemaRegistry,
    translator: Box<dyn Translator>,
    store: Box<dyn EntityStore>,
    steps: StepRegistry,
    plans: HashMap<String, Vec<FieldPlan>>,
}

impl<'a> Hydrator<'a> {
    pub fn new(
        registry: &'a SchemaRegistry,
        translator: Box<dyn Translator>,
        store: Box<dyn EntityStore>,
    ) -> Self {
        let resolver = TypeResolver::new(registry);
        let mut plans = HashMap::new();
        for symbol in registry.iter() {
            if symbol.kind != SymbolKind::Model {
                continue;
            }
            let fields = symbol
                .fields
                .iter()
                .map(|field| FieldPlan {
                    name: field.name.clone(),
                    label_key: field
                        .tags
                        .label()
                        .unwrap_or(&field.name)
                        .to_string(),
                    target: resolver.resolve(&field.declared, None).descriptor,
                    default: field.default.clone(),
                    constraints: field.tags.constraints().into_iter().cloned().collect(),
                    mutators: step_names(&field.tags, TagKind::Mutator),
                    validators: step_names(&field.tags, TagKind::Validator),
                })
                .collect();
            plans.insert(symbol.name.clone(), fields);
        }

        Self {
            registry,
            translator,
            store,
            steps: StepRegistry::new(),
            plans,
        }
    }

    /// Named mutator/validator bindings for this hydrator.
    pub fn steps_mut(&mut self) -> &mut StepRegistry {
        &mut self.steps
    }

    /// Build a validated instance of `schema` from a raw field mapping.
    pub fn build(
        &self,
        schema: &str,
        raw: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Instance, HydrateError> {
        self.build_inner(schema, raw, None)
    }

    /// As `build`, with a caller resolver applied to every field after
    /// coercion, pipelines, and constraints have run.
    pub fn build_with(
        &self,
        schema: &str,
        raw: &serde_json::Map<String, serde_json::Value>,
        resolve: &ResolveFn<'_>,
    ) -> Result<Instance, HydrateError> {
        self.build_inner(schema, raw, Some(resolve))
    }

    fn build_inner(
        &self,
        schema: &str,
        raw: &serde_json::Map<String, serde_json::Value>,
        resolve: Option<&ResolveFn<'_>>,
    ) -> Result<Instance, HydrateError> {
        let symbol = self
            .registry
            .resolve(schema)
            .ok_or_else(|| HydrateError::UnknownSchema {
                name: schema.to_string(),
            })?;
        let plans = self
            .plans
            .get(&symbol.name)
            .ok_or_else(|| HydrateError::UnknownSchema {
                name: schema.to_string(),
            })?;

        let mut instance = Instance::new(symbol.name.clone());
        for plan in plans {
            let raw_value = raw
                .get(&plan.name)
                .cloned()
                .or_else(|| plan.default.clone());
            let is_set = raw_value.is_some();
            let label = self.translator.translate(&plan.label_key);

            let mut value = raw_value.map(TypedValue::from_json).unwrap_or(TypedValue::Null);
            if is_set {
                value = self.apply_type(&plan.target, value)?;
                value = self.apply_mutators(plan, &instance, value, &label)?;
                self.apply_validators(plan, &instance, &value, &label)?;
            }

            for rule in &plan.constraints {
                constraint::check(rule, &value, self.registry).map_err(|message| {
                    HydrateError::Field {
                        label: label.clone(),
                        message,
                    }
                })?;
            }

            // The caller resolver sees every field's validated value last.
            if let Some(resolve) = resolve {
                value = resolve(&plan.name, value);
            }

            if is_set {
                instance.set(plan.name.clone(), value);
            }
        }

        tracing::debug!(schema = %symbol.name, fields = instance.fields().count(), "hydrated instance");
        Ok(instance)
    }

    /// Bend a present value to the field's resolved type: primitive cast,
    /// nested hydration for composite mappings, identifier lookup for
    /// scalars against model references.
    fn apply_type(
        &self,
        target: &TypeDescriptor,
        value: TypedValue,
    ) -> Result<TypedValue, HydrateError> {
        if value.is_null() {
            return Ok(TypedValue::Null);
        }
        match target {
            TypeDescriptor::Primitive(p) => value.coerce(*p),
            TypeDescriptor::Nullable(inner) => self.apply_type(inner, value),
            TypeDescriptor::Reference { schema, enum_shaped } => {
                if *enum_shaped {
                    return Ok(value);
                }
                if let TypedValue::Json(serde_json::Value::Object(map)) = &value {
                    let nested = self.build(schema, map)?;
                    return Ok(TypedValue::Object(nested));
                }
                self.store
                    .find_by_id(schema, &value)
                    .ok_or_else(|| HydrateError::NotFound {
                        schema: schema.clone(),
                    })
            }
            TypeDescriptor::Union(_) | TypeDescriptor::Verbatim(_) => Ok(value),
            TypeDescriptor::Unresolved(name) => Err(HydrateError::Cast {
                type_name: name.clone(),
            }),
        }
    }

    fn apply_mutators(
        &self,
        plan: &FieldPlan,
        instance: &Instance,
        mut value: TypedValue,
        label: &str,
    ) -> Result<TypedValue, HydrateError> {
        for name in &plan.mutators {
            let step = self
                .steps
                .mutator(name)
                .ok_or_else(|| HydrateError::Field {
                    label: label.to_string(),
                    message: format!("unknown mutator: {name}"),
                })?;
            value = step(instance, value).map_err(|message| HydrateError::Field {
                label: label.to_string(),
                message,
            })?;
        }
        Ok(value)
    }

    fn apply_validators(
        &self,
        plan: &FieldPlan,
        instance: &Instance,
        value: &TypedValue,
        label: &str,
    ) -> Result<(), HydrateError> {
        for name in &plan.validators {
            let step = self
                .steps
                .validator(name)
                .ok_or_else(|| HydrateError::Field {
                    label: label.to_string(),
                    message: format!("unknown validator: {name}"),
                })?;
            step(instance, value).map_err(|message| HydrateError::Field {
                label: label.to_string(),
                message,
            })?;
        }
        Ok(())
    }

    /// Resolve one identifier through the entity store. A null identifier is
    /// an empty result, not an error; an unresolvable one is `NotFound`.
    pub fn get_one(
        &self,
        schema: &str,
        id: &TypedValue,
    ) -> Result<Option<TypedValue>, HydrateError> {
        if id.is_null() {
            return Ok(None);
        }
        let symbol = self
            .registry
            .resolve(schema)
            .ok_or_else(|| HydrateError::UnknownSchema {
                name: schema.to_string(),
            })?;
        match self.store.find_by_id(&symbol.name, id) {
            Some(entity) => Ok(Some(entity)),
            None => Err(HydrateError::NotFound {
                schema: symbol.name.clone(),
            }),
        }
    }

    /// Resolve each non-null identifier through `get_one`, keeping input
    /// order. Null identifiers are skipped silently.
    pub fn get_many(
        &self,
        schema: &str,
        ids: &[TypedValue],
    ) -> Result<Vec<TypedValue>, HydrateError> {
        let mut entities = Vec::new();
        for id in ids {
            if let Some(entity) = self.get_one(schema, id)? {
                entities.push(entity);
            }
        }
        Ok(entities)
    }

    /// Copy assigned fields from `source` onto `target`. A registered
    /// `set_{field}` mutator takes precedence over direct assignment; fields
    /// the target schema does not declare are ignored.
    pub fn fill(&self, source: &Instance, target: &mut Instance) -> Result<(), HydrateError> {
        let plans = self
            .plans
            .get(target.schema())
            .ok_or_else(|| HydrateError::UnknownSchema {
                name: target.schema().to_string(),
            })?;

        let assignable: Vec<String> = plans.iter().map(|p| p.name.clone()).collect();
        for (name, value) in source.fields() {
            let setter = format!("set_{name}");
            if let Some(step) = self.steps.mutator(&setter) {
                let replaced = step(target, value.clone()).map_err(|message| {
                    HydrateError::Field {
                        label: name.to_string(),
                        message,
                    }
                })?;
                target.set(name, replaced);
            } else if assignable.iter().any(|n| n == name) {
                target.set(name, value.clone());
            }
        }
        Ok(())
    }
}

fn step_names(tags: &typebridge_core::TagSet, kind: TagKind) -> Vec<String> {
    tags.get_all(kind)
        .into_iter()
        .filter_map(|tag| match tag {
            Tag::Mutator(name) | Tag::Validator(name) => Some(name.clone()),
            _ => None,
        })
        .collect()
}
