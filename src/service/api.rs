//! HTTP client for the rental REST API. Every request carries the session cookies held in the jar.

use crate::error::AppError;
use crate::model::{Resource, Session};
use reqwest::cookie::Jar;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        Self::with_session_cookie(base_url, None)
    }

    /// Build a client whose cookie jar is seeded with `cookie` (e.g. `SESSION=abc`) for the API origin.
    pub fn with_session_cookie(base_url: &str, cookie: Option<&str>) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url).map_err(|e| AppError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::InvalidUrl(base_url.to_string()));
        }
        let jar = Arc::new(Jar::default());
        if let Some(cookie) = cookie.filter(|c| !c.trim().is_empty()) {
            jar.add_cookie_str(cookie, &base_url);
        }
        let http = reqwest::Client::builder().cookie_provider(jar).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/{segments...}`, each segment percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Full-navigation target that starts the Google OAuth login.
    pub fn login_url(&self) -> Result<Url, AppError> {
        self.endpoint(&["oauth2", "authorization", "google"])
    }

    pub fn logout_url(&self) -> Result<Url, AppError> {
        self.endpoint(&["logout"])
    }

    /// List every record of a collection.
    pub async fn list(&self, segment: &str) -> Result<Vec<Value>, AppError> {
        self.list_where(segment, &[]).await
    }

    /// List records matching exact query parameters, e.g. `clients?email=a@x.com`.
    pub async fn list_where(&self, segment: &str, params: &[(String, String)]) -> Result<Vec<Value>, AppError> {
        let mut url = self.endpoint(&[segment])?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        match self.send(Method::GET, url, None).await? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            other => Err(AppError::Decode(format!(
                "{}: expected a JSON array, got {}",
                segment,
                type_name_of_json(&other)
            ))),
        }
    }

    /// Fetch one record by id. A success with an empty body means the record does not exist.
    pub async fn read(&self, segment: &str, id: &str) -> Result<Value, AppError> {
        let url = self.endpoint(&[segment, id])?;
        match self.send(Method::GET, url, None).await? {
            Value::Null => Err(AppError::NotFound(format!("{}/{}", segment, id))),
            v => Ok(v),
        }
    }

    /// Create a record. Returns the server's response (the stored record, or null).
    pub async fn create(&self, segment: &str, body: &Map<String, Value>) -> Result<Value, AppError> {
        let url = self.endpoint(&[segment])?;
        self.send(Method::POST, url, Some(body)).await
    }

    pub async fn update(&self, segment: &str, id: &str, body: &Map<String, Value>) -> Result<Value, AppError> {
        let url = self.endpoint(&[segment, id])?;
        self.send(Method::PUT, url, Some(body)).await
    }

    pub async fn delete(&self, segment: &str, id: &str) -> Result<(), AppError> {
        let url = self.endpoint(&[segment, id])?;
        self.send(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// Pre-joined aggregate from `GET /{segment}/{id}/details`.
    pub async fn details(&self, segment: &str, id: &str) -> Result<Value, AppError> {
        let url = self.endpoint(&[segment, id, "details"])?;
        match self.send(Method::GET, url, None).await? {
            Value::Null => Err(AppError::NotFound(format!("{}/{}/details", segment, id))),
            v => Ok(v),
        }
    }

    /// Current session from `GET /user`. Non-success statuses and payloads without a name mean no session.
    pub async fn session(&self) -> Result<Option<Session>, AppError> {
        let url = self.endpoint(&["user"])?;
        tracing::debug!(method = "GET", url = %url, "request");
        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            tracing::debug!(status = resp.status().as_u16(), "no session");
            return Ok(None);
        }
        let text = resp.text().await?;
        let value: Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(_) => return Ok(None),
        };
        Ok(value
            .get("name")
            .and_then(|n| n.as_str())
            .filter(|n| !n.trim().is_empty())
            .map(|name| Session { name: name.to_string() }))
    }

    pub async fn fetch_all<T: Resource>(&self) -> Result<Vec<T>, AppError> {
        self.list(T::PATH)
            .await?
            .into_iter()
            .map(|row| decode(row, T::PATH))
            .collect()
    }

    pub async fn fetch<T: Resource>(&self, id: &str) -> Result<T, AppError> {
        let row = self.read(T::PATH, id).await?;
        decode(row, T::PATH)
    }

    async fn send(&self, method: Method, url: Url, body: Option<&Map<String, Value>>) -> Result<Value, AppError> {
        tracing::debug!(method = %method, url = %url, "request");
        let mut req = self.http.request(method, url);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), body = %text, "request failed");
            return Err(AppError::Api {
                status: status.as_u16(),
                body: text,
            });
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| AppError::Decode(format!("response body: {}", e)))
    }
}

fn decode<T: DeserializeOwned>(row: Value, what: &str) -> Result<T, AppError> {
    serde_json::from_value(row).map_err(|e| AppError::Decode(format!("{}: {}", what, e)))
}

fn type_name_of_json(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
