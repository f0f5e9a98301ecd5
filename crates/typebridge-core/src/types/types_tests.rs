#![allow(non_snake_case)]

use super::*;
use crate::symbol::{ClassSymbol, DeclaredType, NamedType, SymbolKind};
use test_case::test_case;

fn registry_with(names: &[(&str, SymbolKind)]) -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    for (name, kind) in names {
        registry
            .register(ClassSymbol::builder(*name, *kind).build())
            .unwrap();
    }
    registry
}

#[test_case("bool", Primitive::Bool)]
#[test_case("i64", Primitive::Int)]
#[test_case("u32", Primitive::Int)]
#[test_case("int", Primitive::Int)]
#[test_case("f64", Primitive::Float)]
#[test_case("float", Primitive::Float)]
#[test_case("String", Primitive::Str)]
#[test_case("DateTime", Primitive::DateTime)]
#[test_case("TimeZone", Primitive::DateTimeZone)]
#[test_case("mixed", Primitive::Any)]
#[test_case("Vec", Primitive::RawArray)]
fn primitive_of___known_names___map(name: &str, expected: Primitive) {
    assert_eq!(TypeResolver::primitive_of(name), Some(expected));
}

#[test]
fn primitive_of___unknown_name___none() {
    assert_eq!(TypeResolver::primitive_of("User"), None);
}

#[test]
fn resolve___primitive___returns_primitive_descriptor() {
    let registry = SchemaRegistry::new();
    let resolver = TypeResolver::new(&registry);

    let resolved = resolver.resolve(&DeclaredType::named("String"), None);

    assert_eq!(resolved.descriptor, TypeDescriptor::Primitive(Primitive::Str));
    assert!(!resolved.nullable);
}

#[test]
fn resolve___nullable_primitive___wraps_in_nullable() {
    let registry = SchemaRegistry::new();
    let resolver = TypeResolver::new(&registry);

    let resolved = resolver.resolve(&DeclaredType::nullable("String"), None);

    assert_eq!(
        resolved.descriptor,
        TypeDescriptor::Nullable(Box::new(TypeDescriptor::Primitive(Primitive::Str)))
    );
    assert!(resolved.nullable);
}

#[test]
fn resolve___registered_schema___returns_reference() {
    let registry = registry_with(&[("app::models::User", SymbolKind::Model)]);
    let resolver = TypeResolver::new(&registry);

    let resolved = resolver.resolve(&DeclaredType::named("User"), None);

    assert_eq!(
        resolved.descriptor,
        TypeDescriptor::Reference {
            schema: "app::models::User".to_string(),
            enum_shaped: false,
        }
    );
}

#[test]
fn resolve___enum_schema___marks_enum_shaped() {
    let registry = registry_with(&[("app::models::Status", SymbolKind::Enum)]);
    let resolver = TypeResolver::new(&registry);

    let resolved = resolver.resolve(&DeclaredType::named("Status"), None);

    assert_eq!(
        resolved.descriptor,
        TypeDescriptor::Reference {
            schema: "app::models::Status".to_string(),
            enum_shaped: true,
        }
    );
}

#[test]
fn resolve___unknown_name___unresolved() {
    let registry = SchemaRegistry::new();
    let resolver = TypeResolver::new(&registry);

    let resolved = resolver.resolve(&DeclaredType::named("Mystery"), None);

    assert_eq!(
        resolved.descriptor,
        TypeDescriptor::Unresolved("Mystery".to_string())
    );
    assert!(resolved.descriptor.is_unresolved());
}

#[test]
fn resolve___union_with_null___null_member_carries_nullability() {
    let registry = SchemaRegistry::new();
    let resolver = TypeResolver::new(&registry);

    let declared = DeclaredType::Union(vec![
        NamedType::new("int"),
        NamedType::new("String"),
        NamedType::new("null"),
    ]);
    let resolved = resolver.resolve(&declared, None);

    assert_eq!(
        resolved.descriptor,
        TypeDescriptor::Union(vec![
            TypeDescriptor::Primitive(Primitive::Int),
            TypeDescriptor::Primitive(Primitive::Str),
            TypeDescriptor::Primitive(Primitive::Null),
        ])
    );
    assert!(!resolved.nullable);
}

#[test]
fn resolve___union_with_unresolved_member___flagged() {
    let registry = SchemaRegistry::new();
    let resolver = TypeResolver::new(&registry);

    let declared = DeclaredType::Union(vec![NamedType::new("int"), NamedType::new("Mystery")]);
    let resolved = resolver.resolve(&declared, None);

    assert!(resolved.descriptor.is_unresolved());
}

#[test]
fn resolve___override_naming_enum___substitutes_reference() {
    let registry = registry_with(&[("app::models::Status", SymbolKind::Enum)]);
    let resolver = TypeResolver::new(&registry);

    let resolved = resolver.resolve(&DeclaredType::named("String"), Some("Status"));

    assert_eq!(
        resolved.descriptor,
        TypeDescriptor::Reference {
            schema: "app::models::Status".to_string(),
            enum_shaped: true,
        }
    );
}

#[test]
fn resolve___override_free_text___verbatim() {
    let registry = SchemaRegistry::new();
    let resolver = TypeResolver::new(&registry);

    let resolved = resolver.resolve(&DeclaredType::named("String"), Some("TCustom<T>"));

    assert_eq!(
        resolved.descriptor,
        TypeDescriptor::Verbatim("TCustom<T>".to_string())
    );
}

#[test]
fn resolve___override_on_nullable___keeps_nullability_flag() {
    let registry = SchemaRegistry::new();
    let resolver = TypeResolver::new(&registry);

    let resolved = resolver.resolve(&DeclaredType::nullable("String"), Some("TCustom"));

    assert!(resolved.nullable);
}
