//! Shared state for the shell: the API client and the resolved resource model.

use crate::config::{resolve, FullConfig, ResolvedModel};
use crate::error::AppError;
use crate::service::ApiClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub model: Arc<ResolvedModel>,
}

impl AppState {
    pub fn new(api: ApiClient, config: &FullConfig) -> Result<Self, AppError> {
        let model = resolve(config)?;
        Ok(Self {
            api,
            model: Arc::new(model),
        })
    }
}
