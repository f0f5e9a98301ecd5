//! Loading annotated Rust source into class symbols
//!
//! The loader uses [`syn`] to parse source files and extract structs and
//! enums carrying typebridge annotations (`#[model]`, `#[controller]`), plus
//! the methods declared in their inherent impl blocks. Unannotated items are
//! ignored.
//!
//! Supported annotations:
//! - `#[model]`, `#[model(request, title = "...", description = "...")]`
//! - `#[controller(title = "...", description = "...")]`
//! - `#[route(path = "/items/{id}", method = "GET")]` (class or method)
//! - `#[api(title = "...", request = "CreateItem", response = "Item")]`
//! - `#[groups("main", "admin")]`, `#[label("item.title")]`
//! - `#[ts(hidden)]`, `#[ts(visible)]`, `#[ts(undefined)]`,
//!   `#[ts(type_name = "...")]`, `#[ts(union = "int | string | null")]`
//! - `#[not_blank]`, `#[choice(...)]`, `#[enum_choice(Status)]`,
//!   `#[range(min = 0, max = 10)]`, `#[length(min = 1, max = 64)]`
//! - `#[mutate("step")]`, `#[validate("step")]`, `#[default_value(...)]`

use std::path::Path;

use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, Fields, Lit, Meta, Token, Type};
use typebridge_core::{
    CaseValue, ClassSymbol, Constraint, DeclaredType, FieldDescriptor, MethodDescriptor,
    NamedType, Rule, SchemaRegistry, SymbolKind, Tag, TagSet,
};

use crate::error::ParseError;
use crate::scanner::scan;

/// Scan a source tree and load every resolvable file into a registry.
///
/// Files that fail to read or parse are discovery gaps: skipped with a debug
/// log. Duplicate symbol names and malformed annotations are hard errors.
pub fn load(root: &Path, base_namespace: &str) -> Result<SchemaRegistry, ParseError> {
    let discovered = scan(root, base_namespace)?;
    let mut registry = SchemaRegistry::new();
    for entry in &discovered {
        let symbols = match load_file(&entry.path, &entry.namespace) {
            Ok(symbols) => symbols,
            Err(ParseError::Io { path, source }) => {
                tracing::debug!(path = %path.display(), %source, "skipping unreadable file");
                continue;
            }
            Err(ParseError::Parse { path, message }) => {
                tracing::debug!(path = %path.display(), message, "skipping unparseable file");
                continue;
            }
            Err(other) => return Err(other),
        };
        for symbol in symbols {
            registry.register(symbol)?;
        }
    }
    tracing::info!(
        files = discovered.len(),
        symbols = registry.len(),
        "loaded schema symbols"
    );
    Ok(registry)
}

/// Parse one source file and extract its annotated symbols.
pub fn load_file(path: &Path, namespace: &str) -> Result<Vec<ClassSymbol>, ParseError> {
    let source = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_source(&source, namespace, Some(path))
}

/// Parse Rust source text and extract its annotated symbols.
pub fn load_source(
    source: &str,
    namespace: &str,
    file: Option<&Path>,
) -> Result<Vec<ClassSymbol>, ParseError> {
    let parsed = syn::parse_file(source).map_err(|e| ParseError::Parse {
        path: file.unwrap_or(Path::new("<source>")).to_path_buf(),
        message: e.to_string(),
    })?;

    let mut symbols: Vec<ClassSymbol> = Vec::new();

    for item in &parsed.items {
        match item {
            syn::Item::Struct(s) => {
                if let Some(symbol) = symbol_from_struct(s, namespace, file)? {
                    symbols.push(symbol);
                }
            }
            syn::Item::Enum(e) => {
                if let Some(symbol) = symbol_from_enum(e, namespace, file)? {
                    symbols.push(symbol);
                }
            }
            _ => {}
        }
    }

    // Inherent impl blocks contribute methods to already-collected symbols.
    for item in &parsed.items {
        if let syn::Item::Impl(imp) = item {
            if imp.trait_.is_some() {
                continue;
            }
            let Some(self_name) = impl_self_ident(imp) else {
                continue;
            };
            let full = format!("{namespace}::{self_name}");
            let Some(symbol) = symbols.iter_mut().find(|s| s.name == full) else {
                continue;
            };
            for member in &imp.items {
                if let syn::ImplItem::Fn(f) = member {
                    if !matches!(f.vis, syn::Visibility::Public(_)) {
                        continue;
                    }
                    let method_attrs = ParsedAttrs::from_attrs(&f.attrs, &full)?;
                    let returns = match &f.sig.output {
                        syn::ReturnType::Default => None,
                        syn::ReturnType::Type(_, ty) => {
                            Some(method_attrs.union.clone().unwrap_or_else(|| {
                                DeclaredType::Named(named_from_type(ty))
                            }))
                        }
                    };
                    let mut method = MethodDescriptor::new(f.sig.ident.to_string(), returns);
                    method.tags = method_attrs.tags;
                    symbol.methods.push(method);
                }
            }
        }
    }

    Ok(symbols)
}

fn symbol_from_struct(
    s: &syn::ItemStruct,
    namespace: &str,
    file: Option<&Path>,
) -> Result<Option<ClassSymbol>, ParseError> {
    let name = format!("{namespace}::{}", s.ident);
    let parsed = ParsedAttrs::from_attrs(&s.attrs, &name)?;

    let kind = if parsed.is_controller {
        SymbolKind::Controller
    } else if parsed.is_model {
        SymbolKind::Model
    } else {
        return Ok(None);
    };

    let mut builder = ClassSymbol::builder(name.clone(), kind);
    if let Some(path) = file {
        builder = builder.file(path);
    }
    for tag in parsed.tags.iter() {
        builder = builder.tag(tag.clone());
    }

    if let Fields::Named(fields) = &s.fields {
        for field in &fields.named {
            if !matches!(field.vis, syn::Visibility::Public(_)) {
                continue;
            }
            let Some(ident) = &field.ident else { continue };
            let field_attrs = ParsedAttrs::from_attrs(&field.attrs, &name)?;
            let declared = field_attrs
                .union
                .clone()
                .unwrap_or_else(|| DeclaredType::Named(named_from_type(&field.ty)));
            let mut descriptor = FieldDescriptor::new(ident.to_string(), declared);
            descriptor.default = field_attrs.default;
            descriptor.tags = field_attrs.tags;
            builder = builder.field(descriptor);
        }
    }

    Ok(Some(builder.build()))
}

fn symbol_from_enum(
    e: &syn::ItemEnum,
    namespace: &str,
    file: Option<&Path>,
) -> Result<Option<ClassSymbol>, ParseError> {
    let name = format!("{namespace}::{}", e.ident);
    let parsed = ParsedAttrs::from_attrs(&e.attrs, &name)?;
    if !parsed.is_model {
        return Ok(None);
    }

    let mut builder = ClassSymbol::builder(name.clone(), SymbolKind::Enum);
    if let Some(path) = file {
        builder = builder.file(path);
    }
    for tag in parsed.tags.iter() {
        builder = builder.tag(tag.clone());
    }

    for variant in &e.variants {
        let value = case_value(variant, &name)?;
        builder = builder.case(variant.ident.to_string(), value);
    }

    Ok(Some(builder.build()))
}

fn case_value(variant: &syn::Variant, symbol: &str) -> Result<CaseValue, ParseError> {
    // `#[value("...")]` takes precedence over a numeric discriminant.
    for attr in &variant.attrs {
        if attr.path().is_ident("value") {
            let args = attr_args(attr, symbol)?;
            if let Some(AttrArg::Pos(Lit::Str(s))) = args.first() {
                return Ok(CaseValue::Str(s.value()));
            }
            return Err(ParseError::Attribute {
                symbol: symbol.to_string(),
                message: format!("#[value] on `{}` expects a string literal", variant.ident),
            });
        }
    }
    if let Some((_, expr)) = &variant.discriminant {
        if let Some(value) = int_literal(expr) {
            return Ok(CaseValue::Int(value));
        }
        return Err(ParseError::Attribute {
            symbol: symbol.to_string(),
            message: format!("unsupported discriminant on `{}`", variant.ident),
        });
    }
    Ok(CaseValue::Bare)
}

fn int_literal(expr: &Expr) -> Option<i64> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Int(i) => i.base10_parse().ok(),
            _ => None,
        },
        Expr::Unary(unary) if matches!(unary.op, syn::UnOp::Neg(_)) => {
            int_literal(&unary.expr).map(|v| -v)
        }
        _ => None,
    }
}

fn impl_self_ident(imp: &syn::ItemImpl) -> Option<String> {
    if let Type::Path(tp) = imp.self_ty.as_ref() {
        tp.path.segments.last().map(|s| s.ident.to_string())
    } else {
        None
    }
}

/// Map a syn type to a declared type name.
///
/// `Option<T>` marks the inner type nullable; `Vec<_>` collapses to the
/// untyped raw-array primitive, matching the projection rules.
fn named_from_type(ty: &Type) -> NamedType {
    if let Type::Path(tp) = ty {
        if let Some(segment) = tp.path.segments.last() {
            let ident = segment.ident.to_string();
            if ident == "Option" {
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                        let mut named = named_from_type(inner);
                        named.nullable = true;
                        return named;
                    }
                }
            }
            if ident == "Vec" {
                return NamedType::new("Vec");
            }
            return NamedType::new(ident);
        }
    }
    NamedType::new(quote::quote!(#ty).to_string())
}

/// A positional, flag, or named attribute argument.
enum AttrArg {
    Flag(String),
    Named(String, Lit),
    Pos(Lit),
}

fn attr_args(attr: &Attribute, symbol: &str) -> Result<Vec<AttrArg>, ParseError> {
    match &attr.meta {
        Meta::Path(_) => Ok(Vec::new()),
        Meta::List(_) => {
            let exprs = attr
                .parse_args_with(Punctuated::<Expr, Token![,]>::parse_terminated)
                .map_err(|e| ParseError::Attribute {
                    symbol: symbol.to_string(),
                    message: e.to_string(),
                })?;
            let mut args = Vec::new();
            for expr in exprs {
                match expr {
                    Expr::Lit(lit) => args.push(AttrArg::Pos(lit.lit)),
                    Expr::Path(path) => {
                        if let Some(ident) = path.path.get_ident() {
                            args.push(AttrArg::Flag(ident.to_string()));
                        }
                    }
                    Expr::Assign(assign) => {
                        let key = match assign.left.as_ref() {
                            Expr::Path(p) => p.path.get_ident().map(|i| i.to_string()),
                            _ => None,
                        };
                        let value = match assign.right.as_ref() {
                            Expr::Lit(lit) => Some(lit.lit.clone()),
                            _ => None,
                        };
                        match (key, value) {
                            (Some(k), Some(v)) => args.push(AttrArg::Named(k, v)),
                            _ => {
                                return Err(ParseError::Attribute {
                                    symbol: symbol.to_string(),
                                    message: "expected `key = literal` argument".to_string(),
                                })
                            }
                        }
                    }
                    _ => {
                        return Err(ParseError::Attribute {
                            symbol: symbol.to_string(),
                            message: "unsupported attribute argument".to_string(),
                        })
                    }
                }
            }
            Ok(args)
        }
        Meta::NameValue(_) => Ok(Vec::new()),
    }
}

fn lit_str(lit: &Lit) -> Option<String> {
    match lit {
        Lit::Str(s) => Some(s.value()),
        _ => None,
    }
}

fn lit_f64(lit: &Lit) -> Option<f64> {
    match lit {
        Lit::Int(i) => i.base10_parse().ok(),
        Lit::Float(f) => f.base10_parse().ok(),
        _ => None,
    }
}

fn lit_usize(lit: &Lit) -> Option<usize> {
    match lit {
        Lit::Int(i) => i.base10_parse().ok(),
        _ => None,
    }
}

fn lit_json(lit: &Lit) -> Option<serde_json::Value> {
    match lit {
        Lit::Str(s) => Some(serde_json::Value::String(s.value())),
        Lit::Int(i) => i.base10_parse::<i64>().ok().map(serde_json::Value::from),
        Lit::Float(f) => f.base10_parse::<f64>().ok().map(serde_json::Value::from),
        Lit::Bool(b) => Some(serde_json::Value::Bool(b.value)),
        _ => None,
    }
}

/// Everything the typebridge annotations on one element amount to.
#[derive(Default)]
struct ParsedAttrs {
    tags: TagSet,
    default: Option<serde_json::Value>,
    union: Option<DeclaredType>,
    is_model: bool,
    is_controller: bool,
}

impl ParsedAttrs {
    fn from_attrs(attrs: &[Attribute], symbol: &str) -> Result<Self, ParseError> {
        let mut parsed = ParsedAttrs::default();
        for attr in attrs {
            let Some(ident) = attr.path().get_ident().map(|i| i.to_string()) else {
                continue;
            };
            match ident.as_str() {
                "model" => parsed.parse_model(attr, symbol)?,
                "controller" => parsed.parse_controller(attr, symbol)?,
                "route" => parsed.parse_route(attr, symbol)?,
                "api" => parsed.parse_api(attr, symbol)?,
                "groups" => parsed.parse_groups(attr, symbol)?,
                "ts" => parsed.parse_ts(attr, symbol)?,
                "label" => parsed.parse_label(attr, symbol)?,
                "not_blank" => parsed.parse_constraint_rule(attr, symbol, Rule::NotBlank)?,
                "choice" => parsed.parse_choice(attr, symbol)?,
                "enum_choice" => parsed.parse_enum_choice(attr, symbol)?,
                "range" => parsed.parse_range(attr, symbol)?,
                "length" => parsed.parse_length(attr, symbol)?,
                "mutate" => parsed.parse_steps(attr, symbol, true)?,
                "validate" => parsed.parse_steps(attr, symbol, false)?,
                "default_value" => parsed.parse_default(attr, symbol)?,
                _ => {}
            }
        }
        Ok(parsed)
    }

    fn parse_model(&mut self, attr: &Attribute, symbol: &str) -> Result<(), ParseError> {
        self.is_model = true;
        for arg in attr_args(attr, symbol)? {
            match arg {
                AttrArg::Flag(f) if f == "request" => self.tags.push(Tag::RequestModel),
                AttrArg::Named(k, v) if k == "title" => {
                    if let Some(s) = lit_str(&v) {
                        self.tags.push(Tag::Title(s));
                    }
                }
                AttrArg::Named(k, v) if k == "description" => {
                    if let Some(s) = lit_str(&v) {
                        self.tags.push(Tag::Description(s));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn parse_controller(&mut self, attr: &Attribute, symbol: &str) -> Result<(), ParseError> {
        self.is_controller = true;
        let mut title = None;
        let mut description = None;
        for arg in attr_args(attr, symbol)? {
            match arg {
                AttrArg::Named(k, v) if k == "title" => title = lit_str(&v),
                AttrArg::Named(k, v) if k == "description" => description = lit_str(&v),
                _ => {}
            }
        }
        self.tags.push(Tag::Controller { title, description });
        Ok(())
    }

    fn parse_route(&mut self, attr: &Attribute, symbol: &str) -> Result<(), ParseError> {
        let mut path = None;
        let mut verbs = Vec::new();
        for arg in attr_args(attr, symbol)? {
            match arg {
                AttrArg::Pos(lit) => path = lit_str(&lit),
                AttrArg::Named(k, v) if k == "path" => path = lit_str(&v),
                AttrArg::Named(k, v) if k == "method" => {
                    if let Some(s) = lit_str(&v) {
                        verbs.push(s);
                    }
                }
                _ => {}
            }
        }
        let Some(path) = path else {
            return Err(ParseError::Attribute {
                symbol: symbol.to_string(),
                message: "#[route] requires a path".to_string(),
            });
        };
        self.tags.push(Tag::Route { path, verbs });
        Ok(())
    }

    fn parse_api(&mut self, attr: &Attribute, symbol: &str) -> Result<(), ParseError> {
        let mut title = None;
        let mut description = None;
        let mut request = None;
        let mut response = None;
        for arg in attr_args(attr, symbol)? {
            if let AttrArg::Named(k, v) = arg {
                match k.as_str() {
                    "title" => title = lit_str(&v),
                    "description" => description = lit_str(&v),
                    "request" => request = lit_str(&v),
                    "response" => response = lit_str(&v),
                    _ => {}
                }
            }
        }
        self.tags.push(Tag::ApiMethod {
            title,
            description,
            request,
            response,
        });
        Ok(())
    }

    fn parse_groups(&mut self, attr: &Attribute, symbol: &str) -> Result<(), ParseError> {
        let mut groups = Vec::new();
        for arg in attr_args(attr, symbol)? {
            if let AttrArg::Pos(lit) = arg {
                if let Some(s) = lit_str(&lit) {
                    groups.push(s);
                }
            }
        }
        self.tags.push(Tag::Groups(groups));
        Ok(())
    }

    fn parse_ts(&mut self, attr: &Attribute, symbol: &str) -> Result<(), ParseError> {
        for arg in attr_args(attr, symbol)? {
            match arg {
                AttrArg::Flag(f) => match f.as_str() {
                    "hidden" => self.tags.push(Tag::Hidden),
                    "visible" => self.tags.push(Tag::Visible),
                    "undefined" => self.tags.push(Tag::Undefined),
                    _ => {}
                },
                AttrArg::Named(k, v) if k == "type_name" => {
                    if let Some(s) = lit_str(&v) {
                        self.tags.push(Tag::TypeName(s));
                    }
                }
                AttrArg::Named(k, v) if k == "union" => {
                    if let Some(s) = lit_str(&v) {
                        self.union = Some(parse_union(&s));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn parse_label(&mut self, attr: &Attribute, symbol: &str) -> Result<(), ParseError> {
        if let Some(AttrArg::Pos(lit)) = attr_args(attr, symbol)?.first() {
            if let Some(s) = lit_str(lit) {
                self.tags.push(Tag::Label(s));
                return Ok(());
            }
        }
        Err(ParseError::Attribute {
            symbol: symbol.to_string(),
            message: "#[label] expects a string literal".to_string(),
        })
    }

    fn parse_constraint_rule(
        &mut self,
        attr: &Attribute,
        symbol: &str,
        rule: Rule,
    ) -> Result<(), ParseError> {
        let message = self.named_message(attr, symbol)?;
        self.tags.push(Tag::Constraint(Constraint { rule, message }));
        Ok(())
    }

    fn parse_choice(&mut self, attr: &Attribute, symbol: &str) -> Result<(), ParseError> {
        let mut options = Vec::new();
        let mut message = None;
        for arg in attr_args(attr, symbol)? {
            match arg {
                AttrArg::Pos(lit) => {
                    if let Some(s) = lit_str(&lit) {
                        options.push(s);
                    }
                }
                AttrArg::Named(k, v) if k == "message" => message = lit_str(&v),
                _ => {}
            }
        }
        self.tags.push(Tag::Constraint(Constraint {
            rule: Rule::Choice(options),
            message,
        }));
        Ok(())
    }

    fn parse_enum_choice(&mut self, attr: &Attribute, symbol: &str) -> Result<(), ParseError> {
        let mut target = None;
        let mut message = None;
        for arg in attr_args(attr, symbol)? {
            match arg {
                AttrArg::Flag(ident) => target = Some(ident),
                AttrArg::Pos(lit) => target = lit_str(&lit),
                AttrArg::Named(k, v) if k == "message" => message = lit_str(&v),
                _ => {}
            }
        }
        let Some(target) = target else {
            return Err(ParseError::Attribute {
                symbol: symbol.to_string(),
                message: "#[enum_choice] requires an enum name".to_string(),
            });
        };
        self.tags.push(Tag::Constraint(Constraint {
            rule: Rule::EnumChoice(target),
            message,
        }));
        Ok(())
    }

    fn parse_range(&mut self, attr: &Attribute, symbol: &str) -> Result<(), ParseError> {
        let mut min = None;
        let mut max = None;
        let mut message = None;
        for arg in attr_args(attr, symbol)? {
            if let AttrArg::Named(k, v) = arg {
                match k.as_str() {
                    "min" => min = lit_f64(&v),
                    "max" => max = lit_f64(&v),
                    "message" => message = lit_str(&v),
                    _ => {}
                }
            }
        }
        self.tags.push(Tag::Constraint(Constraint {
            rule: Rule::Range { min, max },
            message,
        }));
        Ok(())
    }

    fn parse_length(&mut self, attr: &Attribute, symbol: &str) -> Result<(), ParseError> {
        let mut min = None;
        let mut max = None;
        let mut message = None;
        for arg in attr_args(attr, symbol)? {
            if let AttrArg::Named(k, v) = arg {
                match k.as_str() {
                    "min" => min = lit_usize(&v),
                    "max" => max = lit_usize(&v),
                    "message" => message = lit_str(&v),
                    _ => {}
                }
            }
        }
        self.tags.push(Tag::Constraint(Constraint {
            rule: Rule::Length { min, max },
            message,
        }));
        Ok(())
    }

    fn parse_steps(
        &mut self,
        attr: &Attribute,
        symbol: &str,
        mutator: bool,
    ) -> Result<(), ParseError> {
        for arg in attr_args(attr, symbol)? {
            if let AttrArg::Pos(lit) = arg {
                if let Some(s) = lit_str(&lit) {
                    self.tags.push(if mutator {
                        Tag::Mutator(s)
                    } else {
                        Tag::Validator(s)
                    });
                }
            }
        }
        Ok(())
    }

    fn parse_default(&mut self, attr: &Attribute, symbol: &str) -> Result<(), ParseError> {
        match attr_args(attr, symbol)?.first() {
            Some(AttrArg::Pos(lit)) => {
                self.default = lit_json(lit);
                Ok(())
            }
            Some(AttrArg::Flag(f)) if f == "null" => {
                self.default = Some(serde_json::Value::Null);
                Ok(())
            }
            _ => Err(ParseError::Attribute {
                symbol: symbol.to_string(),
                message: "#[default_value] expects a literal or `null`".to_string(),
            }),
        }
    }

    fn named_message(&self, attr: &Attribute, symbol: &str) -> Result<Option<String>, ParseError> {
        for arg in attr_args(attr, symbol)? {
            if let AttrArg::Named(k, v) = arg {
                if k == "message" {
                    return Ok(lit_str(&v));
                }
            }
        }
        Ok(None)
    }
}

fn parse_union(text: &str) -> DeclaredType {
    let members = text
        .split('|')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(NamedType::new)
        .collect();
    DeclaredType::Union(members)
}

#[cfg(test)]
#[path = "loader/loader_tests.rs"]
mod loader_tests;
