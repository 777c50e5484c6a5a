//! Raw resource config types matching the JSON resource file.

use serde::{Deserialize, Serialize};

/// Input kind of a form field; decides how raw input is coerced before sending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    Integer,
    Number,
    Date,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldConfig {
    /// camelCase name used on the wire.
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default)]
    pub searchable: bool,
}

fn default_true() -> bool {
    true
}

impl FieldConfig {
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            kind,
            required: true,
            searchable: false,
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Configured label, or the humanized wire name.
    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| crate::case::humanize(&self.name))
    }
}

/// Display join: `field` holds the id of a `resource` record, shown as its `display` fields joined by a space.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LookupConfig {
    pub field: String,
    pub resource: String,
    pub display: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Singular display name, e.g. "Motorbike".
    pub name: String,
    pub path_segment: String,
    #[serde(default = "default_id_field")]
    pub id_field: String,
    pub fields: Vec<FieldConfig>,
    #[serde(default)]
    pub lookups: Vec<LookupConfig>,
    /// Whether `GET /{path_segment}/{id}/details` serves a pre-joined aggregate.
    #[serde(default)]
    pub details: bool,
}

fn default_id_field() -> String {
    "id".to_string()
}

/// All resource configs in one struct for in-memory loading.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FullConfig {
    pub resources: Vec<ResourceConfig>,
}

impl FullConfig {
    /// The four screens of the rental back office.
    pub fn builtin() -> Self {
        use crate::model::{Client, Motorbike, Payment, Reservation, Resource};
        Self {
            resources: vec![
                Motorbike::resource_config(),
                Client::resource_config(),
                Reservation::resource_config(),
                Payment::resource_config(),
            ],
        }
    }
}
