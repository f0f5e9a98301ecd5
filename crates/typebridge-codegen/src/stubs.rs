//! Whole-pass assembly: declarations, client classes, export index
//!
//! The generated file layout is fixed: the rest-config preamble, every
//! declaration in registration order, one client class per controller, and
//! the `export const API` index naming every class.

use typebridge_core::{ClassSymbol, SchemaRegistry, SymbolKind, Tag, TagKind};

use crate::error::GenError;
use crate::hooks::{Formatter, TypeHooks};
use crate::projector::Projector;

const PREAMBLE: &str = "import { rest, endpoint } from './rest-config';\n\n\
if (rest.debug) console.info('REST Endpoint', endpoint);\n\n";

pub struct Generator<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> Generator<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Run one full generation pass over the registry.
    ///
    /// A fresh projector is created for the pass; hooks inject their
    /// declarations first, then every non-controller schema registers in
    /// registration order, then client classes are emitted. Formatting is
    /// best-effort: a `None` from the formatter keeps the raw text.
    pub fn run(
        &self,
        hooks: &dyn TypeHooks,
        formatter: &dyn Formatter,
    ) -> Result<String, GenError> {
        let mut projector = Projector::new(self.registry);
        hooks.register_types(&mut projector)?;

        let names: Vec<String> = self
            .registry
            .iter()
            .filter(|s| s.kind != SymbolKind::Controller)
            .map(|s| s.name.clone())
            .collect();
        for name in &names {
            projector.register_interface(name)?;
        }

        let mut out = String::from(PREAMBLE);
        out.push_str(&projector.declarations());
        out.push_str("\n\n");

        let mut aliases = Vec::new();
        for symbol in self.registry.iter() {
            if symbol.kind != SymbolKind::Controller {
                continue;
            }
            out.push_str(&self.client_class(symbol));
            aliases.push(symbol.short_name().to_string());
        }

        out.push_str(&format!("export const API = {{ {} }}\n", aliases.join(", ")));

        let out = hooks.post_process(out);
        tracing::debug!(bytes = out.len(), "assembled generation pass");
        Ok(formatter.format(&out).unwrap_or(out))
    }

    /// One client class for a controller. Emitted even when no method
    /// qualifies, so the export index stays total.
    fn client_class(&self, symbol: &ClassSymbol) -> String {
        let class_path = match symbol.tags.get(TagKind::Route) {
            Some(Tag::Route { path, .. }) => path.clone(),
            _ => String::new(),
        };

        let mut out = format!("export class {} {{\n\n", symbol.short_name());
        for method in &symbol.methods {
            let Some(Tag::ApiMethod { request, response, .. }) =
                method.tags.get(TagKind::ApiMethod)
            else {
                continue;
            };
            let Some(Tag::Route { path, verbs }) = method.tags.get(TagKind::Route) else {
                continue;
            };

            // Only the method route contributes arguments; class-level
            // placeholders stay template expressions without a parameter.
            let mut args: Vec<String> = path_placeholders(path)
                .into_iter()
                .map(|p| format!("{p}: TIdentifier"))
                .collect();
            let mut has_request = false;
            if let Some(request) = request {
                if self.registry.contains(request) {
                    args.push(format!("request: {}", self.registry.slug(request, 'I')));
                    has_request = true;
                }
            }

            let resp = response
                .as_deref()
                .map(|r| self.registry.slug(r, 'I'))
                .unwrap_or_else(|| "unknown".to_string());
            let verb = verbs
                .first()
                .map(|v| v.to_lowercase())
                .unwrap_or_else(|| "post".to_string());
            let path = format!("{class_path}{path}")
                .replace('{', "${")
                .replace("/api", "");
            let tail = if has_request { ", request" } else { "" };

            out.push_str(&format!(
                "\tpublic static {} = ({}): Promise<{}> => rest.{}(`{}`{});\n\n",
                method.name,
                args.join(", "),
                resp,
                verb,
                path,
                tail,
            ));
        }
        out.push_str("}\n\n");
        out
    }
}

/// Placeholder names appearing between braces in a path template.
fn path_placeholders(path: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut current: Option<String> = None;
    for ch in path.chars() {
        match ch {
            '{' => current = Some(String::new()),
            '}' => {
                if let Some(name) = current.take() {
                    if !name.is_empty() {
                        names.push(name);
                    }
                }
            }
            _ => {
                if let Some(name) = current.as_mut() {
                    name.push(ch);
                }
            }
        }
    }
    names
}

#[cfg(test)]
#[path = "stubs/stubs_tests.rs"]
mod stubs_tests;
