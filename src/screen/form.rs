//! Raw form input, as a user typed it.

use crate::config::FieldConfig;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    values: BTreeMap<String, String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill from a loaded record: each configured field's value as input text.
    pub fn from_record(record: &Value, fields: &[FieldConfig]) -> Self {
        let values = fields
            .iter()
            .map(|f| {
                let text = record.get(&f.name).map(value_text).unwrap_or_default();
                (f.name.clone(), text)
            })
            .collect();
        Self { values }
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Text of a JSON value as it appears in a table cell or input box.
pub fn value_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
