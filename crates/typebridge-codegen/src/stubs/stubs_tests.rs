#![allow(non_snake_case)]

use typebridge_core::{
    ClassSymbol, Constraint, DeclaredType, FieldDescriptor, MethodDescriptor, Rule,
    SchemaRegistry, SymbolKind, Tag,
};

use super::{path_placeholders, Generator};
use crate::error::GenError;
use crate::hooks::{Formatter, NoHooks, NullFormatter, TypeHooks};
use crate::projector::Projector;

fn item_model() -> ClassSymbol {
    ClassSymbol::builder("app::models::Item", SymbolKind::Model)
        .field(
            FieldDescriptor::new("title", DeclaredType::named("String"))
                .with_tag(Tag::Groups(vec!["main".into()]))
                .with_tag(Tag::Constraint(Constraint::new(Rule::NotBlank))),
        )
        .build()
}

fn api_method(request: Option<&str>, response: Option<&str>) -> Tag {
    Tag::ApiMethod {
        title: None,
        description: None,
        request: request.map(str::to_string),
        response: response.map(str::to_string),
    }
}

fn route(path: &str, verbs: &[&str]) -> Tag {
    Tag::Route {
        path: path.into(),
        verbs: verbs.iter().map(|v| v.to_string()).collect(),
    }
}

#[test]
fn path_placeholders___extracts_brace_delimited_names() {
    assert_eq!(
        path_placeholders("/items/{id}/notes/{note_id}"),
        vec!["id".to_string(), "note_id".to_string()]
    );
    assert!(path_placeholders("/items").is_empty());
    assert!(path_placeholders("/items/{}").is_empty());
}

#[test]
fn run___get_route___stub_with_identifier_arg_and_stripped_prefix() {
    let mut registry = SchemaRegistry::new();
    registry.register(item_model()).unwrap();
    registry
        .register(
            ClassSymbol::builder("app::controllers::Items", SymbolKind::Controller)
                .tag(route("/api/items", &[]))
                .method(
                    MethodDescriptor::new("get_item", None)
                        .with_tag(api_method(None, Some("Item")))
                        .with_tag(route("/{id}", &["GET"])),
                )
                .build(),
        )
        .unwrap();

    let out = Generator::new(&registry)
        .run(&NoHooks, &NullFormatter)
        .unwrap();

    assert!(out.contains(
        "\tpublic static get_item = (id: TIdentifier): Promise<IItem> => rest.get(`/items/${id}`);"
    ));
}

#[test]
fn run___class_route_placeholder___no_extra_argument() {
    let mut registry = SchemaRegistry::new();
    registry.register(item_model()).unwrap();
    registry
        .register(
            ClassSymbol::builder("app::controllers::Items", SymbolKind::Controller)
                .tag(route("/api/tenants/{tenant}/items", &[]))
                .method(
                    MethodDescriptor::new("get_item", None)
                        .with_tag(api_method(None, Some("Item")))
                        .with_tag(route("/{id}", &["GET"])),
                )
                .build(),
        )
        .unwrap();

    let out = Generator::new(&registry)
        .run(&NoHooks, &NullFormatter)
        .unwrap();

    assert!(out.contains(
        "\tpublic static get_item = (id: TIdentifier): Promise<IItem> => rest.get(`/tenants/${tenant}/items/${id}`);"
    ));
}

#[test]
fn run___no_verbs___defaults_to_post() {
    let mut registry = SchemaRegistry::new();
    registry
        .register(
            ClassSymbol::builder("app::controllers::Jobs", SymbolKind::Controller)
                .tag(route("/jobs", &[]))
                .method(
                    MethodDescriptor::new("restart", None)
                        .with_tag(api_method(None, None))
                        .with_tag(route("/restart", &[])),
                )
                .build(),
        )
        .unwrap();

    let out = Generator::new(&registry)
        .run(&NoHooks, &NullFormatter)
        .unwrap();

    assert!(out.contains(
        "\tpublic static restart = (): Promise<unknown> => rest.post(`/jobs/restart`);"
    ));
}

#[test]
fn run___resolvable_request___adds_request_parameter() {
    let mut registry = SchemaRegistry::new();
    registry
        .register(
            ClassSymbol::builder("app::requests::CreateItem", SymbolKind::Model)
                .tag(Tag::RequestModel)
                .field(FieldDescriptor::new("title", DeclaredType::named("String")))
                .build(),
        )
        .unwrap();
    registry.register(item_model()).unwrap();
    registry
        .register(
            ClassSymbol::builder("app::controllers::Items", SymbolKind::Controller)
                .tag(route("/api/items", &[]))
                .method(
                    MethodDescriptor::new("create", None)
                        .with_tag(api_method(Some("CreateItem"), Some("Item")))
                        .with_tag(route("", &["POST"])),
                )
                .build(),
        )
        .unwrap();

    let out = Generator::new(&registry)
        .run(&NoHooks, &NullFormatter)
        .unwrap();

    assert!(out.contains(
        "\tpublic static create = (request: ICreateItem): Promise<IItem> => rest.post(`/items`, request);"
    ));
}

#[test]
fn run___unresolvable_request___parameter_dropped() {
    let mut registry = SchemaRegistry::new();
    registry
        .register(
            ClassSymbol::builder("app::controllers::Items", SymbolKind::Controller)
                .tag(route("/items", &[]))
                .method(
                    MethodDescriptor::new("create", None)
                        .with_tag(api_method(Some("Phantom"), None))
                        .with_tag(route("", &["POST"])),
                )
                .build(),
        )
        .unwrap();

    let out = Generator::new(&registry)
        .run(&NoHooks, &NullFormatter)
        .unwrap();

    assert!(out.contains(
        "\tpublic static create = (): Promise<unknown> => rest.post(`/items`);"
    ));
}

#[test]
fn run___method_without_route_or_api_tag___skipped() {
    let mut registry = SchemaRegistry::new();
    registry
        .register(
            ClassSymbol::builder("app::controllers::Items", SymbolKind::Controller)
                .tag(route("/items", &[]))
                .method(MethodDescriptor::new("helper", None))
                .method(
                    MethodDescriptor::new("tagged_only", None).with_tag(api_method(None, None)),
                )
                .build(),
        )
        .unwrap();

    let out = Generator::new(&registry)
        .run(&NoHooks, &NullFormatter)
        .unwrap();

    assert!(!out.contains("helper"));
    assert!(!out.contains("tagged_only"));
    assert!(out.contains("export class Items {"));
}

#[test]
fn run___export_index___names_every_controller() {
    let mut registry = SchemaRegistry::new();
    registry
        .register(ClassSymbol::builder("app::controllers::Items", SymbolKind::Controller).build())
        .unwrap();
    registry
        .register(ClassSymbol::builder("app::controllers::Users", SymbolKind::Controller).build())
        .unwrap();

    let out = Generator::new(&registry)
        .run(&NoHooks, &NullFormatter)
        .unwrap();

    assert!(out.starts_with("import { rest, endpoint } from './rest-config';"));
    assert!(out.ends_with("export const API = { Items, Users }\n"));
}

#[test]
fn run___declarations_precede_classes() {
    let mut registry = SchemaRegistry::new();
    registry.register(item_model()).unwrap();
    registry
        .register(ClassSymbol::builder("app::controllers::Items", SymbolKind::Controller).build())
        .unwrap();

    let out = Generator::new(&registry)
        .run(&NoHooks, &NullFormatter)
        .unwrap();

    let interface_at = out.find("export interface IItem {").unwrap();
    let class_at = out.find("export class Items {").unwrap();
    assert!(interface_at < class_at);
}

#[test]
fn run___hooks___inject_declarations_and_post_process() {
    struct Marking;

    impl TypeHooks for Marking {
        fn register_types(&self, ts: &mut Projector<'_>) -> Result<(), GenError> {
            ts.register_type("TCustom", "string")
        }

        fn post_process(&self, code: String) -> String {
            format!("// generated\n{code}")
        }
    }

    let registry = SchemaRegistry::new();
    let out = Generator::new(&registry)
        .run(&Marking, &NullFormatter)
        .unwrap();

    assert!(out.starts_with("// generated\n"));
    assert!(out.contains("export type TCustom = string;"));
}

#[test]
fn run___formatter_output___replaces_raw_text() {
    struct Upper;

    impl Formatter for Upper {
        fn format(&self, code: &str) -> Option<String> {
            Some(code.to_uppercase())
        }
    }

    let registry = SchemaRegistry::new();
    let out = Generator::new(&registry).run(&NoHooks, &Upper).unwrap();

    assert!(out.starts_with("IMPORT { REST, ENDPOINT }"));
}
