//! Resolved resource model: config validated and flattened for runtime use.

use crate::config::{FieldConfig, LookupConfig};
use std::collections::HashMap;

/// Auxiliary list a resource joins against, keyed by that list's own id field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupTarget {
    pub path_segment: String,
    pub id_field: String,
}

/// What a search query is matched against, in configured field order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchKey {
    /// Raw field value.
    Field(String),
    /// Resolved display string of the lookup at this index (raw id when unresolved).
    Lookup(usize),
}

#[derive(Clone, Debug)]
pub struct ResolvedResource {
    pub name: String,
    pub path_segment: String,
    pub id_field: String,
    pub fields: Vec<FieldConfig>,
    pub lookups: Vec<LookupConfig>,
    pub details: bool,
    pub search: Vec<SearchKey>,
    /// Distinct lookup targets in lookup order.
    pub lookup_targets: Vec<LookupTarget>,
}

impl ResolvedResource {
    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn lookup_for(&self, field: &str) -> Option<&LookupConfig> {
        self.lookups.iter().find(|l| l.field == field)
    }

    /// Path segments of the auxiliary lists this screen joins against, without duplicates.
    pub fn lookup_resources(&self) -> Vec<&str> {
        self.lookup_targets.iter().map(|t| t.path_segment.as_str()).collect()
    }

    /// Lower-cased singular name for generic messages ("Failed to add motorbike").
    pub fn noun(&self) -> String {
        self.name.to_lowercase()
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedModel {
    pub resources: Vec<ResolvedResource>,
    pub resource_by_path: HashMap<String, ResolvedResource>,
}

impl ResolvedModel {
    pub fn resource_by_path(&self, path: &str) -> Option<&ResolvedResource> {
        self.resource_by_path.get(path)
    }
}
