//! Load resource config from a JSON file or the built-in set, and resolve it.

use crate::config::resolved::{LookupTarget, ResolvedModel, ResolvedResource, SearchKey};
use crate::config::{validate, FullConfig};
use crate::error::ConfigError;
use std::collections::HashMap;
use std::path::Path;

/// Build resolved model from full config (validates first).
pub fn resolve(config: &FullConfig) -> Result<ResolvedModel, ConfigError> {
    validate(config)?;

    let mut resources = Vec::new();
    let mut resource_by_path = HashMap::new();

    for r in &config.resources {
        let search = r
            .fields
            .iter()
            .filter(|f| f.searchable)
            .map(|f| match r.lookups.iter().position(|l| l.field == f.name) {
                Some(idx) => SearchKey::Lookup(idx),
                None => SearchKey::Field(f.name.clone()),
            })
            .collect();
        let mut lookup_targets: Vec<LookupTarget> = Vec::new();
        for l in &r.lookups {
            if lookup_targets.iter().any(|t| t.path_segment == l.resource) {
                continue;
            }
            // validate() guarantees the target exists
            let Some(target) = config.resources.iter().find(|t| t.path_segment == l.resource) else {
                continue;
            };
            lookup_targets.push(LookupTarget {
                path_segment: target.path_segment.clone(),
                id_field: target.id_field.clone(),
            });
        }
        let resource = ResolvedResource {
            name: r.name.clone(),
            path_segment: r.path_segment.clone(),
            id_field: r.id_field.clone(),
            fields: r.fields.clone(),
            lookups: r.lookups.clone(),
            details: r.details,
            search,
            lookup_targets,
        };
        resource_by_path.insert(r.path_segment.clone(), resource.clone());
        resources.push(resource);
    }

    Ok(ResolvedModel {
        resources,
        resource_by_path,
    })
}

/// Read a `FullConfig` JSON document (`{ "resources": [...] }`) from disk.
pub async fn load_from_path(path: &Path) -> Result<FullConfig, ConfigError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))
}
