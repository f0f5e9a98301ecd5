//! Per-pass declaration registry and schema projection
//!
//! One [`Projector`] instance serves exactly one generation pass. The
//! declaration registry is append-only and keyed by name: re-registering a
//! byte-identical body is a no-op, re-registering a different body under an
//! existing name aborts the pass.

use std::collections::HashMap;

use typebridge_core::{
    CaseValue, ClassSymbol, DeclaredType, EnumCase, Primitive, Rule, SchemaRegistry, TagKind,
    TagSet, TypeDescriptor, TypeResolver,
};

use crate::error::GenError;

pub struct Projector<'a> {
    registry: &'a SchemaRegistry,
    names: Vec<String>,
    bodies: HashMap<String, String>,
    groups: Vec<String>,
}

impl<'a> Projector<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        let mut projector = Self {
            registry,
            names: Vec::new(),
            bodies: HashMap::new(),
            groups: Vec::new(),
        };
        // Built-in aliases every generated file relies on.
        projector.insert("TDateTime", "export type TDateTime = string;");
        projector.insert("TDateTimeZone", "export type TDateTimeZone = string;");
        projector.insert(
            "TIdentifier",
            "export type TIdentifier = string | number;",
        );
        projector
    }

    pub fn registry(&self) -> &'a SchemaRegistry {
        self.registry
    }

    fn insert(&mut self, name: &str, body: &str) {
        self.names.push(name.to_string());
        self.bodies.insert(name.to_string(), body.to_string());
    }

    /// Register a raw declaration body under a unique name.
    pub fn register_raw(&mut self, name: &str, body: &str) -> Result<(), GenError> {
        if let Some(existing) = self.bodies.get(name) {
            if existing == body {
                return Ok(());
            }
            return Err(GenError::DuplicateDeclaration {
                name: name.to_string(),
            });
        }
        self.insert(name, body);
        Ok(())
    }

    /// Register a named type alias.
    pub fn register_type(&mut self, name: &str, ts: &str) -> Result<(), GenError> {
        self.register_raw(name, &format!("export type {name} = {ts};"))
    }

    /// Register a union alias of literal values, JSON-encoded verbatim.
    pub fn register_union_of(
        &mut self,
        name: &str,
        values: &[serde_json::Value],
    ) -> Result<(), GenError> {
        let members: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        self.register_raw(
            name,
            &format!("export type {name} = {};", members.join(" | ")),
        )
    }

    /// Register an enumeration declaration, values preserved verbatim.
    pub fn register_enum(&mut self, name: &str, cases: &[EnumCase]) -> Result<(), GenError> {
        let parts: Vec<String> = cases
            .iter()
            .map(|case| match &case.value {
                CaseValue::Int(v) => format!("{} = {v}", case.name),
                CaseValue::Str(v) => {
                    format!("{} = {}", case.name, serde_json::Value::from(v.clone()))
                }
                CaseValue::Bare => case.name.clone(),
            })
            .collect();
        self.register_raw(
            name,
            &format!("export enum {name} {{ {} }};", parts.join(", ")),
        )
    }

    /// Register a const object declaration.
    pub fn register_const_object(
        &mut self,
        name: &str,
        ts_type: &str,
        entries: &[(String, String)],
    ) -> Result<(), GenError> {
        let parts: Vec<String> = entries
            .iter()
            .map(|(key, value)| {
                format!("{}: '{}'", serde_json::Value::from(key.clone()), value)
            })
            .collect();
        self.register_raw(
            name,
            &format!("export const {name}: {ts_type} = {{ {} }};", parts.join(", ")),
        )
    }

    /// Register the declaration for one schema: an enum declaration for
    /// enumerations, an interface otherwise. Also accumulates every group
    /// named on the schema's members into the pass-wide group set.
    pub fn register_interface(&mut self, name: &str) -> Result<(), GenError> {
        let symbol = self
            .registry
            .resolve(name)
            .ok_or_else(|| GenError::UnknownSchema {
                name: name.to_string(),
            })?;

        if symbol.is_enum() {
            let slug = self.registry.slug(&symbol.name, 'E');
            let cases = symbol.cases.clone();
            return self.register_enum(&slug, &cases);
        }

        let slug = self.registry.slug(&symbol.name, 'I');
        let definition = self.interface_definition(symbol)?;

        let mut discovered = Vec::new();
        for method in &symbol.methods {
            collect_groups(&method.tags, &mut discovered);
        }
        for field in &symbol.fields {
            collect_groups(&field.tags, &mut discovered);
        }

        if let Some(body) = definition {
            self.register_raw(&slug, &body)?;
        }
        for group in discovered {
            if !self.groups.contains(&group) {
                self.groups.push(group);
            }
        }
        Ok(())
    }

    /// Build the interface body for a schema, or `None` when the schema is
    /// hidden.
    ///
    /// Fields project in declaration order; a paired `get_*` accessor's
    /// metadata and return type win over the raw field. Accessors without a
    /// backing field are appended after, in method order. One projected name
    /// per schema.
    pub fn interface_definition(&self, symbol: &ClassSymbol) -> Result<Option<String>, GenError> {
        if symbol.tags.has(TagKind::Hidden) {
            return Ok(None);
        }

        let slug = self.registry.slug(&symbol.name, 'I');
        let generic = if symbol.tags.type_override().is_some() {
            "<T>"
        } else {
            ""
        };

        let mut taken: Vec<&str> = Vec::new();
        let mut entries = Vec::new();

        for field in &symbol.fields {
            taken.push(&field.name);
            let (declared, tags) = match symbol.accessor_for(&field.name) {
                Some(accessor) => (
                    accessor.returns.as_ref().unwrap_or(&field.declared),
                    &accessor.tags,
                ),
                None => (&field.declared, &field.tags),
            };
            if let Some(entry) =
                self.project_entry(symbol, &field.name, declared, tags, field.default.as_ref())?
            {
                entries.push(entry);
            }
        }

        for method in &symbol.methods {
            let Some(target) = method.accessor_target() else {
                continue;
            };
            if taken.contains(&target) {
                continue;
            }
            taken.push(target);
            let Some(returns) = &method.returns else {
                continue;
            };
            if let Some(entry) = self.project_entry(symbol, target, returns, &method.tags, None)? {
                entries.push(entry);
            }
        }

        let mut body = format!("export interface {slug}{generic} {{\n");
        for entry in &entries {
            body.push_str(entry);
            body.push('\n');
        }
        body.push('}');
        Ok(Some(body))
    }

    /// Project one logical field into an interface entry, or `None` when the
    /// visibility gate keeps it out.
    fn project_entry(
        &self,
        owner: &ClassSymbol,
        name: &str,
        declared: &DeclaredType,
        tags: &TagSet,
        default: Option<&serde_json::Value>,
    ) -> Result<Option<String>, GenError> {
        // Hidden wins over everything.
        if tags.has(TagKind::Hidden) {
            return Ok(None);
        }

        let groups = tags.groups();
        let visible = tags.has(TagKind::Visible);
        let request_shaped = owner.tags.has(TagKind::RequestModel);
        if groups.is_none() && !request_shaped && !visible {
            return Ok(None);
        }

        let override_text = tags.type_override();
        let resolver = TypeResolver::new(self.registry);
        let resolved = resolver.resolve(declared, override_text);
        let context = format!("{}.{name}", owner.short_name());
        let mut type_text = self.type_text(&resolved.descriptor, &context)?;
        let nullable = resolved.nullable;

        // Optionality chain; main-group and visible overrides apply last.
        let mut marker = "";
        if tags.has(TagKind::Undefined) {
            marker = "?";
        }
        if default.is_some() {
            marker = "?";
        }
        if default.is_none() && !tags.requires_value() {
            marker = "?";
        }
        if groups.is_some_and(|g| g.iter().any(|group| group == "main")) {
            marker = "";
        }
        if visible {
            marker = "";
        }

        // Choice constraints rewrite the type text unless an explicit
        // override is present.
        if override_text.is_none() {
            for constraint in tags.constraints() {
                match &constraint.rule {
                    Rule::Choice(options) => {
                        let literals: Vec<String> =
                            options.iter().map(|o| format!("'{o}'")).collect();
                        type_text = literals.join(" | ");
                        if nullable {
                            type_text.push_str(" | null");
                        }
                    }
                    Rule::EnumChoice(target) => {
                        type_text = self.registry.slug(target, 'E');
                        if nullable {
                            type_text.push_str(" | null");
                        }
                    }
                    _ => {}
                }
            }
        }

        Ok(Some(format!("  {name}{marker}: {type_text};")))
    }

    /// Render a descriptor as TypeScript type text.
    fn type_text(&self, descriptor: &TypeDescriptor, context: &str) -> Result<String, GenError> {
        let text = match descriptor {
            TypeDescriptor::Primitive(p) => match p {
                Primitive::Bool => "boolean".to_string(),
                Primitive::Int | Primitive::Float => "number".to_string(),
                Primitive::Str => "string".to_string(),
                Primitive::DateTime => "TDateTime".to_string(),
                Primitive::DateTimeZone => "TDateTimeZone".to_string(),
                Primitive::Any => "any".to_string(),
                Primitive::RawArray => "[]".to_string(),
                Primitive::Null => "null".to_string(),
            },
            TypeDescriptor::Nullable(inner) => {
                format!("{} | null", self.type_text(inner, context)?)
            }
            TypeDescriptor::Reference {
                schema,
                enum_shaped,
            } => self
                .registry
                .slug(schema, if *enum_shaped { 'E' } else { 'I' }),
            TypeDescriptor::Union(members) => {
                let parts: Result<Vec<String>, GenError> = members
                    .iter()
                    .map(|m| self.type_text(m, context))
                    .collect();
                parts?.join(" | ")
            }
            TypeDescriptor::Verbatim(text) => text.clone(),
            TypeDescriptor::Unresolved(name) => {
                return Err(GenError::UnresolvedType {
                    type_name: name.clone(),
                    context: context.to_string(),
                })
            }
        };
        Ok(text)
    }

    /// Groups discovered so far in this pass, in first-seen order.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// All declarations in registration order, separated by blank lines.
    pub fn declarations(&self) -> String {
        let bodies: Vec<&str> = self
            .names
            .iter()
            .filter_map(|name| self.bodies.get(name).map(String::as_str))
            .collect();
        bodies.join("\n\n")
    }
}

fn collect_groups(tags: &TagSet, out: &mut Vec<String>) {
    for tag in tags.get_all(TagKind::Groups) {
        if let typebridge_core::Tag::Groups(groups) = tag {
            for group in groups {
                if !out.contains(group) {
                    out.push(group.clone());
                }
            }
        }
    }
}
