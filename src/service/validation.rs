//! Form checks equivalent to browser input constraints: required presence and input type only.

use crate::config::{FieldConfig, FieldKind};
use crate::error::AppError;
use crate::screen::FormState;
use chrono::NaiveDate;
use serde_json::{Map, Number, Value};

pub struct FormValidator;

impl FormValidator {
    /// Check required fields and coerce raw input into a request body.
    /// Keys in the form that are not configured fields are ignored.
    pub fn build_body(form: &FormState, fields: &[FieldConfig]) -> Result<Map<String, Value>, AppError> {
        let mut body = Map::new();
        for field in fields {
            let raw = form.get(&field.name);
            if raw.trim().is_empty() {
                if field.required {
                    return Err(AppError::Validation(format!("{} is required", field.display_label())));
                }
                body.insert(field.name.clone(), Value::Null);
                continue;
            }
            body.insert(field.name.clone(), coerce(field, raw)?);
        }
        Ok(body)
    }
}

fn coerce(field: &FieldConfig, raw: &str) -> Result<Value, AppError> {
    let trimmed = raw.trim();
    match field.kind {
        FieldKind::Text => Ok(Value::String(raw.to_string())),
        FieldKind::Integer => trimmed
            .parse::<i64>()
            .map(|n| Value::Number(n.into()))
            .map_err(|_| AppError::Validation(format!("{} must be a whole number", field.display_label()))),
        FieldKind::Number => {
            let invalid = || AppError::Validation(format!("{} must be a number", field.display_label()));
            if let Ok(n) = trimmed.parse::<i64>() {
                return Ok(Value::Number(n.into()));
            }
            let n: f64 = trimmed.parse().map_err(|_| invalid())?;
            Number::from_f64(n).map(Value::Number).ok_or_else(invalid)
        }
        FieldKind::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
            .map_err(|_| AppError::Validation(format!("{} must be a date (YYYY-MM-DD)", field.display_label()))),
    }
}
