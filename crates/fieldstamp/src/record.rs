//! Record abstraction - where field values come from
//!
//! A [`Record`] resolves a field name to a value. Keyed mappings
//! (`serde_json` objects, hash maps) look the name up directly; [`Attrs`]
//! exposes any `Serialize` type's named fields; [`Chain`] composes two
//! sources in fixed order, attribute access first.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A source of field values for one generation pass.
pub trait Record {
    /// Resolve `name` to a value, or `None` when the record has no such
    /// field. A `Value::Null` result is treated by the interpreter the same
    /// as `None`: the instruction is skipped.
    fn field(&self, name: &str) -> Option<Value>;
}

impl Record for Value {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Record for Map<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Record for HashMap<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Record for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned().map(Value::String)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<Value> {
        (**self).field(name)
    }
}

/// Named-attribute access over any `Serialize` type.
///
/// The record is serialized once at construction; field resolution then
/// reads the serialized fields by name.
#[derive(Debug, Clone)]
pub struct Attrs(Value);

impl Attrs {
    pub fn new<T: Serialize>(record: &T) -> serde_json::Result<Self> {
        Ok(Self(serde_json::to_value(record)?))
    }
}

impl Record for Attrs {
    fn field(&self, name: &str) -> Option<Value> {
        self.0.field(name)
    }
}

/// Two sources tried in fixed order: `first` then `second`.
///
/// Mirrors resolving a field by attribute access with a keyed-lookup
/// fallback.
#[derive(Debug, Clone)]
pub struct Chain<A, B>(pub A, pub B);

impl<A: Record, B: Record> Record for Chain<A, B> {
    fn field(&self, name: &str) -> Option<Value> {
        self.0.field(name).or_else(|| self.1.field(name))
    }
}

/// Convert a field value to the text that gets drawn.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
