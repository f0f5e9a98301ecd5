//! Type descriptor resolution
//!
//! Normalizes declared types into a small, language-agnostic descriptor
//! shape. The resolver is a pure function over the schema registry: a
//! declared name maps through a fixed primitive table, then to a schema
//! reference, and finally to [`TypeDescriptor::Unresolved`], which callers
//! treat as a hard generation failure.

use crate::registry::SchemaRegistry;
use crate::symbol::{DeclaredType, NamedType};

/// Primitive type kinds from the fixed mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Bool,
    Int,
    Float,
    Str,
    DateTime,
    DateTimeZone,
    /// Explicitly untyped; projects as `any`.
    Any,
    /// Untyped array; projects as `[]`.
    RawArray,
    /// The literal `null` member of a union.
    Null,
}

/// Normalized type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    Primitive(Primitive),
    Nullable(Box<TypeDescriptor>),
    Reference {
        /// Fully-qualified schema name, resolvable in the registry.
        schema: String,
        /// True when the target schema is an enumeration.
        enum_shaped: bool,
    },
    Union(Vec<TypeDescriptor>),
    /// Explicit override text, emitted as-is. Overrides were never validated
    /// against the registry, so they bypass the Reference invariant.
    Verbatim(String),
    Unresolved(String),
}

impl TypeDescriptor {
    /// True if this descriptor (or any nested part) is unresolved.
    pub fn is_unresolved(&self) -> bool {
        match self {
            TypeDescriptor::Unresolved(_) => true,
            TypeDescriptor::Nullable(inner) => inner.is_unresolved(),
            TypeDescriptor::Union(members) => members.iter().any(|m| m.is_unresolved()),
            _ => false,
        }
    }
}

/// A resolved declared type plus its nullability flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedType {
    pub descriptor: TypeDescriptor,
    pub nullable: bool,
}

/// Stateless resolver over a schema registry.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> TypeResolver<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Fixed primitive name table.
    pub fn primitive_of(name: &str) -> Option<Primitive> {
        let p = match name {
            "bool" | "boolean" => Primitive::Bool,
            "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "u64" | "isize" | "usize"
            | "int" | "integer" => Primitive::Int,
            "f32" | "f64" | "float" | "double" => Primitive::Float,
            "String" | "str" | "string" => Primitive::Str,
            "DateTime" | "NaiveDateTime" | "DateTimeInterface" | "datetime" => Primitive::DateTime,
            "DateTimeZone" | "TimeZone" | "Tz" | "timezone" => Primitive::DateTimeZone,
            "mixed" | "any" | "Value" => Primitive::Any,
            "array" | "Vec" => Primitive::RawArray,
            "null" => Primitive::Null,
            _ => return None,
        };
        Some(p)
    }

    /// Resolve a declared type, honoring an explicit type override.
    ///
    /// An override naming a resolvable enum schema substitutes that enum's
    /// reference; any other override text passes through verbatim. A union
    /// is decomposed member-by-member; its nullability is carried by an
    /// explicit `null` member, so the union itself reports non-nullable.
    pub fn resolve(&self, declared: &DeclaredType, override_text: Option<&str>) -> ResolvedType {
        if let Some(text) = override_text {
            return ResolvedType {
                descriptor: self.resolve_override(text),
                nullable: match declared {
                    DeclaredType::Named(n) => n.nullable,
                    DeclaredType::Union(_) => false,
                },
            };
        }

        match declared {
            DeclaredType::Named(named) => {
                let base = self.resolve_named(named);
                if named.nullable {
                    ResolvedType {
                        descriptor: TypeDescriptor::Nullable(Box::new(base)),
                        nullable: true,
                    }
                } else {
                    ResolvedType {
                        descriptor: base,
                        nullable: false,
                    }
                }
            }
            DeclaredType::Union(members) => ResolvedType {
                descriptor: TypeDescriptor::Union(
                    members.iter().map(|m| self.resolve_named(m)).collect(),
                ),
                nullable: false,
            },
        }
    }

    fn resolve_named(&self, named: &NamedType) -> TypeDescriptor {
        if let Some(p) = Self::primitive_of(&named.name) {
            return TypeDescriptor::Primitive(p);
        }
        match self.registry.resolve(&named.name) {
            Some(symbol) => TypeDescriptor::Reference {
                schema: symbol.name.clone(),
                enum_shaped: symbol.is_enum(),
            },
            None => TypeDescriptor::Unresolved(named.name.clone()),
        }
    }

    fn resolve_override(&self, text: &str) -> TypeDescriptor {
        match self.registry.resolve(text) {
            Some(symbol) if symbol.is_enum() => TypeDescriptor::Reference {
                schema: symbol.name.clone(),
                enum_shaped: true,
            },
            _ => TypeDescriptor::Verbatim(text.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "types/types_tests.rs"]
mod types_tests;
