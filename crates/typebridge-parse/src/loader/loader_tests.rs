#![allow(non_snake_case)]
#![allow(clippy::unwrap_used)]

use super::*;
use typebridge_core::TagKind;

#[test]
fn load_source___extracts_model_struct() {
    let source = r#"
        /// A catalog item.
        #[model]
        pub struct Item {
            pub title: String,
            pub count: i32,
        }
    "#;

    let symbols = load_source(source, "app::models", None).unwrap();

    assert_eq!(symbols.len(), 1);
    assert_eq!(symbols[0].name, "app::models::Item");
    assert_eq!(symbols[0].kind, SymbolKind::Model);
    assert_eq!(symbols[0].fields.len(), 2);
    assert_eq!(symbols[0].fields[0].name, "title");
    assert_eq!(
        symbols[0].fields[0].declared,
        DeclaredType::named("String")
    );
}

#[test]
fn load_source___option_type___marks_nullable() {
    let source = r#"
        #[model]
        pub struct Item {
            pub note: Option<String>,
        }
    "#;

    let symbols = load_source(source, "app", None).unwrap();

    assert_eq!(symbols[0].fields[0].declared, DeclaredType::nullable("String"));
}

#[test]
fn load_source___vec_type___collapses_to_raw_array() {
    let source = r#"
        #[model]
        pub struct Item {
            pub tags: Vec<String>,
        }
    "#;

    let symbols = load_source(source, "app", None).unwrap();

    assert_eq!(symbols[0].fields[0].declared, DeclaredType::named("Vec"));
}

#[test]
fn load_source___private_fields___skipped() {
    let source = r#"
        #[model]
        pub struct Item {
            pub title: String,
            secret: String,
        }
    "#;

    let symbols = load_source(source, "app", None).unwrap();

    assert_eq!(symbols[0].fields.len(), 1);
    assert_eq!(symbols[0].fields[0].name, "title");
}

#[test]
fn load_source___unannotated_struct___ignored() {
    let source = r#"
        pub struct Helper {
            pub data: String,
        }

        #[model]
        pub struct Kept {
            pub data: String,
        }
    "#;

    let symbols = load_source(source, "app", None).unwrap();

    assert_eq!(symbols.len(), 1);
    assert_eq!(symbols[0].name, "app::Kept");
}

#[test]
fn load_source___field_annotations___become_tags() {
    let source = r#"
        #[model(request)]
        pub struct CreateItem {
            #[groups("main")]
            #[label("item.title")]
            #[not_blank(message = "title required")]
            pub title: String,

            #[ts(hidden)]
            pub internal: i64,

            #[ts(undefined)]
            #[default_value(0)]
            pub count: i32,
        }
    "#;

    let symbols = load_source(source, "app", None).unwrap();
    let symbol = &symbols[0];

    assert!(symbol.tags.has(TagKind::RequestModel));

    let title = symbol.field("title").unwrap();
    assert_eq!(title.tags.groups(), Some(&["main".to_string()][..]));
    assert_eq!(title.tags.label(), Some("item.title"));
    assert!(title.tags.requires_value());
    assert_eq!(
        title.tags.constraints()[0].message.as_deref(),
        Some("title required")
    );

    assert!(symbol.field("internal").unwrap().tags.has(TagKind::Hidden));

    let count = symbol.field("count").unwrap();
    assert!(count.tags.has(TagKind::Undefined));
    assert_eq!(count.default, Some(serde_json::json!(0)));
}

#[test]
fn load_source___union_annotation___overrides_declared_type() {
    let source = r#"
        #[model]
        pub struct Item {
            #[ts(union = "i64 | String | null")]
            pub id: i64,
        }
    "#;

    let symbols = load_source(source, "app", None).unwrap();

    assert_eq!(
        symbols[0].fields[0].declared,
        DeclaredType::Union(vec![
            NamedType::new("i64"),
            NamedType::new("String"),
            NamedType::new("null"),
        ])
    );
}

#[test]
fn load_source___enum_with_discriminants___collects_cases() {
    let source = r#"
        #[model]
        pub enum Status {
            Active = 1,
            Blocked = 2,
        }
    "#;

    let symbols = load_source(source, "app", None).unwrap();

    assert_eq!(symbols[0].kind, SymbolKind::Enum);
    assert_eq!(symbols[0].cases.len(), 2);
    assert_eq!(symbols[0].cases[0].name, "Active");
    assert_eq!(symbols[0].cases[0].value, CaseValue::Int(1));
}

#[test]
fn load_source___enum_value_attribute___string_case() {
    let source = r#"
        #[model]
        pub enum Kind {
            #[value("first")]
            First,
            Bare,
        }
    "#;

    let symbols = load_source(source, "app", None).unwrap();

    assert_eq!(symbols[0].cases[0].value, CaseValue::Str("first".to_string()));
    assert_eq!(symbols[0].cases[1].value, CaseValue::Bare);
}

#[test]
fn load_source___controller_with_methods___collects_routes() {
    let source = r#"
        #[controller(title = "Items")]
        #[route(path = "/api/items")]
        pub struct ItemsController;

        impl ItemsController {
            #[route(path = "/{id}", method = "GET")]
            #[api(title = "Get item", response = "Item")]
            pub fn get(&self) -> Item {}

            pub fn helper(&self) {}

            fn private_helper(&self) {}
        }
    "#;

    let symbols = load_source(source, "app", None).unwrap();
    let controller = &symbols[0];

    assert_eq!(controller.kind, SymbolKind::Controller);
    assert!(matches!(
        controller.tags.get(TagKind::Route),
        Some(Tag::Route { path, .. }) if path == "/api/items"
    ));
    // Private methods are not collected.
    assert_eq!(controller.methods.len(), 2);

    let get = &controller.methods[0];
    assert!(matches!(
        get.tags.get(TagKind::Route),
        Some(Tag::Route { path, verbs }) if path == "/{id}" && verbs == &vec!["GET".to_string()]
    ));
    assert!(matches!(
        get.tags.get(TagKind::ApiMethod),
        Some(Tag::ApiMethod { response: Some(r), .. }) if r == "Item"
    ));
}

#[test]
fn load_source___accessor_method___recorded_with_return_type() {
    let source = r#"
        #[model]
        pub struct Item {
            title: String,
        }

        impl Item {
            #[groups("main")]
            pub fn get_title(&self) -> String {
                self.title.clone()
            }
        }
    "#;

    let symbols = load_source(source, "app", None).unwrap();
    let accessor = symbols[0].accessor_for("title").unwrap();

    assert_eq!(accessor.returns, Some(DeclaredType::named("String")));
    assert!(accessor.tags.has(TagKind::Groups));
}

#[test]
fn load_source___mutators_and_validators___kept_in_order() {
    let source = r#"
        #[model]
        pub struct Item {
            #[mutate("trim")]
            #[mutate("lowercase")]
            #[validate("no_profanity")]
            pub title: String,
        }
    "#;

    let symbols = load_source(source, "app", None).unwrap();
    let tags = &symbols[0].fields[0].tags;

    let mutators = tags.get_all(TagKind::Mutator);
    assert_eq!(
        mutators,
        vec![
            &Tag::Mutator("trim".to_string()),
            &Tag::Mutator("lowercase".to_string())
        ]
    );
    assert_eq!(tags.get_all(TagKind::Validator).len(), 1);
}

#[test]
fn load_source___invalid_rust___parse_error() {
    let err = load_source("not rust at all {{{", "app", None).unwrap_err();
    assert!(matches!(err, ParseError::Parse { .. }));
}

#[test]
fn load___directory_tree___registers_symbols_and_skips_gaps() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    std::fs::create_dir_all(src.join("models")).unwrap();
    std::fs::write(
        src.join("models/item.rs"),
        r#"
            #[model]
            pub struct Item {
                pub title: String,
            }
        "#,
    )
    .unwrap();
    std::fs::write(src.join("broken.rs"), "fn {{{").unwrap();

    let registry = load(dir.path(), "app").unwrap();

    assert_eq!(registry.len(), 1);
    assert!(registry.get("app::models::item::Item").is_some());
}
