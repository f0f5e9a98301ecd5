//! Typed values and the primitive coercion table
//!
//! [`TypedValue`] is the runtime shape hydration produces. The coercion
//! table is deliberately forgiving for scalar targets (unparsable numerics
//! collapse to zero, truthiness follows loose-typing conventions); only
//! shape mismatches that cannot be meaningfully bent are hard failures.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use typebridge_core::Primitive;

use crate::error::HydrateError;

/// A coerced runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    DateTime(DateTime<Utc>),
    Array(Vec<TypedValue>),
    Object(Instance),
    /// An uncoerced composite mapping, kept verbatim until (and unless) a
    /// schema target claims it.
    Json(serde_json::Value),
}

/// A hydrated instance: schema name plus its assigned fields, in plan order.
///
/// Only fields that had a raw value or a default are present; `get` on
/// anything else returns `None` rather than a zero value.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    schema: String,
    fields: Vec<(String, TypedValue)>,
}

impl Instance {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            fields: Vec::new(),
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn set(&mut self, name: impl Into<String>, value: TypedValue) {
        let name = name.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl TypedValue {
    /// Bridge a raw JSON value in. Composite mappings stay wrapped as
    /// [`TypedValue::Json`] until a schema target claims them.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => TypedValue::Null,
            serde_json::Value::Bool(b) => TypedValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    TypedValue::Int(i)
                } else {
                    TypedValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => TypedValue::Str(s),
            serde_json::Value::Array(items) => {
                TypedValue::Array(items.into_iter().map(TypedValue::from_json).collect())
            }
            object @ serde_json::Value::Object(_) => TypedValue::Json(object),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            TypedValue::Null => serde_json::Value::Null,
            TypedValue::Bool(b) => serde_json::Value::Bool(*b),
            TypedValue::Int(i) => serde_json::Value::from(*i),
            TypedValue::Float(f) => serde_json::Value::from(*f),
            TypedValue::Str(s) => serde_json::Value::String(s.clone()),
            TypedValue::DateTime(dt) => serde_json::Value::String(dt.to_rfc3339()),
            TypedValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(TypedValue::to_json).collect())
            }
            TypedValue::Object(instance) => {
                let mut map = serde_json::Map::new();
                for (name, value) in instance.fields() {
                    map.insert(name.to_string(), value.to_json());
                }
                serde_json::Value::Object(map)
            }
            TypedValue::Json(value) => value.clone(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TypedValue::Null)
    }

    /// Loose truthiness: empty string, `"0"`, zero numerics, and empty
    /// collections are false.
    pub fn truthy(&self) -> bool {
        match self {
            TypedValue::Null => false,
            TypedValue::Bool(b) => *b,
            TypedValue::Int(i) => *i != 0,
            TypedValue::Float(f) => *f != 0.0,
            TypedValue::Str(s) => !s.is_empty() && s != "0",
            TypedValue::Array(items) => !items.is_empty(),
            TypedValue::Object(_) | TypedValue::DateTime(_) => true,
            TypedValue::Json(v) => !v.is_null(),
        }
    }

    /// Coerce to a primitive target per the fixed cast table. `Null` passes
    /// through every target untouched.
    pub fn coerce(self, target: Primitive) -> Result<TypedValue, HydrateError> {
        if self.is_null() {
            return Ok(TypedValue::Null);
        }
        match target {
            Primitive::Bool => Ok(TypedValue::Bool(self.truthy())),
            Primitive::Int => self.coerce_int(),
            Primitive::Float => self.coerce_float(),
            Primitive::Str => self.coerce_str(),
            Primitive::DateTime => self.coerce_datetime(),
            Primitive::DateTimeZone => match self {
                TypedValue::Str(_) => Ok(self),
                _ => Err(cast_error("timezone")),
            },
            Primitive::Any => Ok(self.coerce_any()),
            Primitive::RawArray => match self {
                TypedValue::Array(_) => Ok(self),
                other => Ok(TypedValue::Array(vec![other])),
            },
            Primitive::Null => Ok(self),
        }
    }

    fn coerce_int(self) -> Result<TypedValue, HydrateError> {
        let value = match self {
            TypedValue::Int(i) => i,
            TypedValue::Float(f) => f as i64,
            TypedValue::Bool(b) => i64::from(b),
            TypedValue::Str(s) => parse_i64(&s),
            _ => return Err(cast_error("integer")),
        };
        Ok(TypedValue::Int(value))
    }

    fn coerce_float(self) -> Result<TypedValue, HydrateError> {
        let value = match self {
            TypedValue::Float(f) => f,
            TypedValue::Int(i) => i as f64,
            TypedValue::Bool(b) => f64::from(u8::from(b)),
            TypedValue::Str(s) => s.trim().parse().unwrap_or(0.0),
            _ => return Err(cast_error("float")),
        };
        Ok(TypedValue::Float(value))
    }

    fn coerce_str(self) -> Result<TypedValue, HydrateError> {
        let value = match self {
            TypedValue::Str(s) => s,
            TypedValue::Int(i) => i.to_string(),
            TypedValue::Float(f) => f.to_string(),
            // Loose-typing string form of a boolean: "1" or the empty string.
            TypedValue::Bool(b) => if b { "1" } else { "" }.to_string(),
            TypedValue::DateTime(dt) => dt.to_rfc3339(),
            _ => return Err(cast_error("string")),
        };
        Ok(TypedValue::Str(value))
    }

    fn coerce_datetime(self) -> Result<TypedValue, HydrateError> {
        match self {
            TypedValue::DateTime(_) => Ok(self),
            TypedValue::Int(ts) => Utc
                .timestamp_opt(ts, 0)
                .single()
                .map(TypedValue::DateTime)
                .ok_or_else(|| cast_error("datetime")),
            TypedValue::Str(s) => parse_datetime(&s)
                .map(TypedValue::DateTime)
                .ok_or_else(|| cast_error("datetime")),
            _ => Err(cast_error("datetime")),
        }
    }

    /// The `mixed` rules: numerics normalize to float, a mapping carrying an
    /// `id` key collapses to that identifier, everything else passes through.
    fn coerce_any(self) -> TypedValue {
        match self {
            TypedValue::Int(i) => TypedValue::Float(i as f64),
            TypedValue::Float(_) => self,
            TypedValue::Json(serde_json::Value::Object(ref map)) => match map.get("id") {
                Some(serde_json::Value::Number(n)) if n.is_i64() => {
                    TypedValue::Int(n.as_i64().unwrap_or(0))
                }
                Some(serde_json::Value::String(s)) => match s.parse() {
                    Ok(i) => TypedValue::Int(i),
                    Err(_) => TypedValue::Str(s.clone()),
                },
                _ => self,
            },
            other => other,
        }
    }
}

fn cast_error(type_name: &str) -> HydrateError {
    HydrateError::Cast {
        type_name: type_name.to_string(),
    }
}

fn parse_i64(s: &str) -> i64 {
    let trimmed = s.trim();
    trimmed
        .parse()
        .or_else(|_| trimmed.parse::<f64>().map(|f| f as i64))
        .unwrap_or(0)
}

/// Accepted datetime spellings: RFC 3339, `Y-m-d H:M:S`, and a bare date
/// (midnight UTC).
fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}
