//! Client-side search and display joins over already-fetched lists.

use crate::config::{LookupConfig, ResolvedResource, SearchKey};
use crate::screen::form::value_text;
use serde_json::Value;
use std::collections::HashMap;

/// Auxiliary lists keyed by path segment, used to resolve foreign ids for display.
#[derive(Clone, Debug, Default)]
pub struct Lookups {
    lists: HashMap<String, LookupList>,
}

#[derive(Clone, Debug)]
struct LookupList {
    id_field: String,
    rows: Vec<Value>,
}

impl Lookups {
    pub fn set(&mut self, path_segment: impl Into<String>, id_field: impl Into<String>, rows: Vec<Value>) {
        self.lists.insert(
            path_segment.into(),
            LookupList {
                id_field: id_field.into(),
                rows,
            },
        );
    }

    pub fn rows(&self, path_segment: &str) -> &[Value] {
        self.lists.get(path_segment).map(|l| l.rows.as_slice()).unwrap_or(&[])
    }

    /// Display string of the record `raw` points at, or the raw id when it is not in the list
    /// or its display fields are blank.
    pub fn resolve(&self, lookup: &LookupConfig, raw: &Value) -> String {
        let wanted = value_text(raw);
        let Some(list) = self.lists.get(&lookup.resource) else {
            return wanted;
        };
        list.rows
            .iter()
            .find(|row| row.get(&list.id_field).map(value_text).as_deref() == Some(wanted.as_str()))
            .map(|row| {
                lookup
                    .display
                    .iter()
                    .map(|f| row.get(f).map(value_text).unwrap_or_default())
                    .filter(|text| !text.trim().is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|text| !text.is_empty())
            .unwrap_or(wanted)
    }
}

/// Text shown for `field` of `row`: joined display for lookup fields, raw value otherwise.
pub fn cell_text(row: &Value, field: &str, resource: &ResolvedResource, lookups: &Lookups) -> String {
    let raw = row.get(field).unwrap_or(&Value::Null);
    match resource.lookup_for(field) {
        Some(lookup) => lookups.resolve(lookup, raw),
        None => value_text(raw),
    }
}

/// Rows whose search keys contain `query`, ignoring case. Order is preserved; `rows` is untouched.
pub fn filter<'a>(rows: &'a [Value], query: &str, resource: &ResolvedResource, lookups: &Lookups) -> Vec<&'a Value> {
    if query.is_empty() {
        return rows.iter().collect();
    }
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| {
            resource.search.iter().any(|key| {
                let text = match key {
                    SearchKey::Field(name) => row.get(name).map(value_text).unwrap_or_default(),
                    SearchKey::Lookup(idx) => {
                        let lookup = &resource.lookups[*idx];
                        lookups.resolve(lookup, row.get(&lookup.field).unwrap_or(&Value::Null))
                    }
                };
                text.to_lowercase().contains(&needle)
            })
        })
        .collect()
}
