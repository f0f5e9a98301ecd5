//! Schema registry: the set of loadable symbols
//!
//! A name is "loadable" exactly when it is present here. The registry keeps
//! registration order (directory traversal order when filled by discovery)
//! and is append-only; re-registering a name is a hard error.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::symbol::ClassSymbol;

#[derive(Debug, Default)]
pub struct SchemaRegistry {
    order: Vec<String>,
    symbols: HashMap<String, ClassSymbol>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, symbol: ClassSymbol) -> Result<(), CoreError> {
        if self.symbols.contains_key(&symbol.name) {
            return Err(CoreError::DuplicateSymbol(symbol.name));
        }
        self.order.push(symbol.name.clone());
        self.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<&ClassSymbol> {
        self.symbols.get(name)
    }

    /// Lookup by exact name, falling back to a unique last-segment match.
    ///
    /// Declared field types usually carry bare identifiers (`Status`) while
    /// the registry keys fully-qualified names (`app::models::Status`). An
    /// ambiguous short name resolves to nothing.
    pub fn resolve(&self, name: &str) -> Option<&ClassSymbol> {
        if let Some(symbol) = self.symbols.get(name) {
            return Some(symbol);
        }
        if name.contains("::") {
            return None;
        }
        let mut found = None;
        for key in &self.order {
            if key.rsplit("::").next() == Some(name) {
                if found.is_some() {
                    return None;
                }
                found = self.symbols.get(key);
            }
        }
        found
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Symbols in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ClassSymbol> {
        self.order.iter().filter_map(|name| self.symbols.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Projected declaration name for a type name.
    ///
    /// Scalar spellings map straight to their TypeScript equivalents,
    /// unresolvable names pass through verbatim, and resolvable symbols get
    /// the prefix plus their short name (`I` interfaces, `E` enums).
    pub fn slug(&self, name: &str, prefix: char) -> String {
        match name {
            "bool" | "boolean" => return "boolean".to_string(),
            "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "u64" | "isize" | "usize"
            | "int" | "integer" | "f32" | "f64" | "float" | "double" => {
                return "number".to_string()
            }
            "mixed" | "any" => return "any".to_string(),
            _ => {}
        }
        match self.resolve(name) {
            Some(symbol) => format!("{}{}", prefix, symbol.short_name()),
            None => name.to_string(),
        }
    }
}
