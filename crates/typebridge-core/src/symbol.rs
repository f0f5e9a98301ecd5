//! Class-like schema definitions
//!
//! A [`ClassSymbol`] is the unit of both projection and hydration: a
//! fully-qualified name, its declared fields, methods, enum cases, and the
//! tags attached to each. Symbols are created at discovery time (or through
//! [`ClassSymbolBuilder`]) and read-only afterward.

use std::path::PathBuf;

use crate::tag::{Tag, TagSet};

/// What kind of schema a symbol describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// Plain data schema (interface projection, hydration target).
    Model,

    /// Controller-like symbol whose exposed methods become client stubs.
    Controller,

    /// Enumeration with a fixed finite set of named cases.
    Enum,
}

/// A single named type as written in a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedType {
    pub name: String,
    pub nullable: bool,
}

impl NamedType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: false,
        }
    }

    pub fn nullable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: true,
        }
    }
}

/// A declared type: a single named type or a union of candidates.
///
/// Union nullability is carried by an explicit `null` member, not by the
/// members' own nullable flags.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclaredType {
    Named(NamedType),
    Union(Vec<NamedType>),
}

impl DeclaredType {
    pub fn named(name: impl Into<String>) -> Self {
        DeclaredType::Named(NamedType::new(name))
    }

    pub fn nullable(name: impl Into<String>) -> Self {
        DeclaredType::Named(NamedType::nullable(name))
    }
}

/// A field declared on a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub declared: DeclaredType,
    pub default: Option<serde_json::Value>,
    pub tags: TagSet,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, declared: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared,
            default: None,
            tags: TagSet::new(),
        }
    }

    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }
}

/// A method declared on a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDescriptor {
    pub name: String,
    pub returns: Option<DeclaredType>,
    pub tags: TagSet,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>, returns: Option<DeclaredType>) -> Self {
        Self {
            name: name.into(),
            returns,
            tags: TagSet::new(),
        }
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Logical field name this method is an accessor for, if it follows the
    /// `get_*` convention.
    pub fn accessor_target(&self) -> Option<&str> {
        self.name
            .strip_prefix("get_")
            .filter(|rest| !rest.is_empty())
    }
}

/// One case of an enumeration schema.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumCase {
    pub name: String,
    pub value: CaseValue,
}

/// Case value, preserved verbatim in projection.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseValue {
    Int(i64),
    Str(String),
    /// No explicit value; the name alone is emitted.
    Bare,
}

/// A discovered class definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSymbol {
    /// Fully-qualified, `::`-separated name.
    pub name: String,

    /// Declaring source file, when loaded from disk.
    pub file: Option<PathBuf>,

    pub kind: SymbolKind,
    pub fields: Vec<FieldDescriptor>,
    pub methods: Vec<MethodDescriptor>,
    pub cases: Vec<EnumCase>,
    pub tags: TagSet,
}

impl ClassSymbol {
    pub fn builder(name: impl Into<String>, kind: SymbolKind) -> ClassSymbolBuilder {
        ClassSymbolBuilder {
            symbol: ClassSymbol {
                name: name.into(),
                file: None,
                kind,
                fields: Vec::new(),
                methods: Vec::new(),
                cases: Vec::new(),
                tags: TagSet::new(),
            },
        }
    }

    /// Last segment of the fully-qualified name.
    pub fn short_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }

    pub fn is_enum(&self) -> bool {
        self.kind == SymbolKind::Enum
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Accessor method for the given logical field name, if one exists.
    pub fn accessor_for(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods
            .iter()
            .find(|m| m.accessor_target() == Some(name))
    }
}

/// Builder for hand-assembled symbols (tests, programmatic registration).
#[derive(Debug)]
pub struct ClassSymbolBuilder {
    symbol: ClassSymbol,
}

impl ClassSymbolBuilder {
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.symbol.file = Some(path.into());
        self
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        self.symbol.tags.push(tag);
        self
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.symbol.fields.push(field);
        self
    }

    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.symbol.methods.push(method);
        self
    }

    pub fn case(mut self, name: impl Into<String>, value: CaseValue) -> Self {
        self.symbol.cases.push(EnumCase {
            name: name.into(),
            value,
        });
        self
    }

    pub fn build(self) -> ClassSymbol {
        self.symbol
    }
}
