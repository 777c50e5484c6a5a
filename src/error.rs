//! Typed errors for configuration and API calls.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing reference: {kind} '{id}'")]
    MissingReference { kind: &'static str, id: String },
    #[error("duplicate path segment: {0}")]
    DuplicatePathSegment(String),
    #[error("duplicate field: {resource}.{field}")]
    DuplicateField { resource: String, field: String },
    #[error("config load: {0}")]
    Load(String),
    #[error("validation: {0}")]
    Validation(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),
    #[error("decode: {0}")]
    Decode(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl AppError {
    /// Message the server attached to a failed request, if any.
    ///
    /// JSON bodies contribute their `message` (or `error.message`) string; other
    /// bodies contribute their trimmed text. Blank bodies and non-API errors
    /// yield `None` so callers can substitute a generic message.
    pub fn server_message(&self) -> Option<String> {
        let AppError::Api { body, .. } = self else {
            return None;
        };
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(serde_json::Value::Object(obj)) = serde_json::from_str::<serde_json::Value>(trimmed) {
            let nested = obj
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str());
            return obj
                .get("message")
                .and_then(|m| m.as_str())
                .or(nested)
                .filter(|m| !m.trim().is_empty())
                .map(str::to_string);
        }
        Some(trimmed.to_string())
    }
}
