//! Config validation: referential integrity of lookups and unique paths.

use crate::config::FullConfig;
use crate::error::ConfigError;
use std::collections::HashSet;

pub fn validate(config: &FullConfig) -> Result<(), ConfigError> {
    if config.resources.is_empty() {
        return Err(ConfigError::Validation("at least one resource required".into()));
    }

    let mut path_segments = HashSet::new();
    for r in &config.resources {
        if !path_segments.insert(r.path_segment.as_str()) {
            return Err(ConfigError::DuplicatePathSegment(r.path_segment.clone()));
        }
    }

    for r in &config.resources {
        if r.fields.is_empty() {
            return Err(ConfigError::Validation(format!(
                "resource {} has no fields",
                r.path_segment
            )));
        }
        let mut names = HashSet::new();
        for f in &r.fields {
            if !names.insert(f.name.as_str()) {
                return Err(ConfigError::DuplicateField {
                    resource: r.path_segment.clone(),
                    field: f.name.clone(),
                });
            }
        }

        for l in &r.lookups {
            if !names.contains(l.field.as_str()) {
                return Err(ConfigError::MissingReference {
                    kind: "field",
                    id: format!("{}.{}", r.path_segment, l.field),
                });
            }
            if !path_segments.contains(l.resource.as_str()) {
                return Err(ConfigError::MissingReference {
                    kind: "resource",
                    id: l.resource.clone(),
                });
            }
            if l.display.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "lookup {}.{} has no display fields",
                    r.path_segment, l.field
                )));
            }
        }
    }

    Ok(())
}
