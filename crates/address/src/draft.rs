use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AddressError;

/// In-progress wizard field values, keyed by field name.
///
/// Values are JSON primitives (string, number, bool, null). Key order is
/// preserved so a draft written back to disk diffs cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationDraft {
    fields: Map<String, Value>,
}

impl RegistrationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(input: &str) -> Result<Self, AddressError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, AddressError> {
        let fields = match value {
            Value::Object(fields) => fields,
            other => return Err(AddressError::DraftShape(format!("got {}", kind(&other)))),
        };
        if let Some((key, v)) = fields.iter().find(|(_, v)| v.is_array() || v.is_object()) {
            return Err(AddressError::DraftShape(format!(
                "field '{key}' holds {}, expected a primitive",
                kind(v)
            )));
        }
        Ok(Self { fields })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Value as display text; numbers and bools are rendered, null is empty.
    pub fn text(&self, key: &str) -> String {
        match self.fields.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// True when the field holds something other than null or blank text.
    pub fn has_value(&self, key: &str) -> bool {
        match self.fields.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Shallow spread: a copy of this draft with `updates` written over it.
    /// Blank update values are skipped so an existing value is never cleared.
    pub fn merged<'a, I>(&self, updates: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut next = self.clone();
        for (key, value) in updates {
            if !value.trim().is_empty() {
                next.set(key, value);
            }
        }
        next
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
