//! Generic resource screen: list, add form, edit/details modal and search for one configured resource.
//!
//! Every mutation re-fetches the whole list on success; the screen never patches rows locally,
//! so `rows()` is always the result of the last successful fetch.

mod filter;
mod form;

pub use filter::{cell_text, filter, Lookups};
pub use form::{value_text, FormState};

use crate::config::ResolvedResource;
use crate::error::AppError;
use crate::model::Session;
use crate::service::{ApiClient, FormValidator};
use serde_json::Value;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    /// Only while a fetch is in flight.
    Loading,
    Loaded,
    Errored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Transient, dismissible message about the last mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowAction {
    Details,
    Edit,
    Delete,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EditState {
    pub id: String,
    pub form: FormState,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Modal {
    Edit(EditState),
    /// Read-only aggregate served pre-joined by the API.
    Details(Value),
}

pub struct ResourceScreen {
    resource: ResolvedResource,
    api: ApiClient,
    rows: Vec<Value>,
    load_state: LoadState,
    error: Option<String>,
    notification: Option<Notification>,
    form: FormState,
    modal: Option<Modal>,
    search: String,
    lookups: Lookups,
    query_params: Vec<(String, String)>,
}

impl ResourceScreen {
    pub fn new(resource: ResolvedResource, api: ApiClient) -> Self {
        Self {
            resource,
            api,
            rows: Vec::new(),
            load_state: LoadState::Idle,
            error: None,
            notification: None,
            form: FormState::new(),
            modal: None,
            search: String::new(),
            lookups: Lookups::default(),
            query_params: Vec::new(),
        }
    }

    /// Mount: fetch the list and every auxiliary lookup list.
    pub async fn open(&mut self) {
        self.load().await;
        self.load_lookups().await;
    }

    /// Replace the list with a fresh fetch. On failure the previous rows stay visible under an error banner.
    /// If the returned future is dropped before it completes, the previous load state is restored.
    pub async fn load(&mut self) {
        let loading = LoadingGuard::enter(&mut self.load_state);
        tracing::debug!(resource = %self.resource.path_segment, "loading");
        let fetched = self
            .api
            .list_where(&self.resource.path_segment, &self.query_params)
            .await;
        match fetched {
            Ok(rows) => {
                tracing::debug!(resource = %self.resource.path_segment, count = rows.len(), "loaded");
                self.rows = rows;
                self.error = None;
                loading.finish(LoadState::Loaded);
            }
            Err(e) => {
                tracing::warn!(resource = %self.resource.path_segment, error = %e, "list fetch failed");
                self.error = Some(format!("Failed to fetch {}", self.resource.path_segment));
                loading.finish(LoadState::Errored);
            }
        }
    }

    /// Fetch the lists this screen joins against. A failed fetch leaves that lookup empty.
    pub async fn load_lookups(&mut self) {
        let mut lookups = Lookups::default();
        for target in &self.resource.lookup_targets {
            let rows = match self.api.list(&target.path_segment).await {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::warn!(lookup = %target.path_segment, error = %e, "lookup fetch failed");
                    Vec::new()
                }
            };
            lookups.set(target.path_segment.as_str(), target.id_field.as_str(), rows);
        }
        self.lookups = lookups;
    }

    /// Submit the add form. On success the form is cleared and the list reloaded;
    /// on failure the form is left as typed and an error notification is shown.
    pub async fn create(&mut self) {
        let result = match FormValidator::build_body(&self.form, &self.resource.fields) {
            Ok(body) => self.api.create(&self.resource.path_segment, &body).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(_) => {
                tracing::info!(resource = %self.resource.path_segment, "created");
                self.form.clear();
                self.notify_success(format!("{} added!", self.resource.name));
                self.load().await;
            }
            Err(e) => self.notify_failure(&e, "add"),
        }
    }

    /// Open the edit modal prefilled from the record. Records missing from the
    /// current list are fetched by id.
    pub async fn open_edit(&mut self, id: &str) {
        let record = match self.row(id) {
            Some(row) => Ok(row.clone()),
            None => self.api.read(&self.resource.path_segment, id).await,
        };
        match record {
            Ok(record) => {
                self.modal = Some(Modal::Edit(EditState {
                    id: id.to_string(),
                    form: FormState::from_record(&record, &self.resource.fields),
                }));
            }
            Err(e) => self.notify_failure(&e, "load"),
        }
    }

    /// Save the edit modal. On success the modal closes and the list is reloaded;
    /// on failure the modal stays open with its contents.
    pub async fn update(&mut self) {
        let Some(Modal::Edit(edit)) = &self.modal else {
            return;
        };
        let id = edit.id.clone();
        let result = match FormValidator::build_body(&edit.form, &self.resource.fields) {
            Ok(body) => self.api.update(&self.resource.path_segment, &id, &body).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(_) => {
                tracing::info!(resource = %self.resource.path_segment, id = %id, "updated");
                self.modal = None;
                self.notify_success(format!("{} updated!", self.resource.name));
                self.load().await;
            }
            Err(e) => self.notify_failure(&e, "update"),
        }
    }

    /// Delete by id, without confirmation.
    pub async fn remove(&mut self, id: &str) {
        match self.api.delete(&self.resource.path_segment, id).await {
            Ok(()) => {
                tracing::info!(resource = %self.resource.path_segment, id = %id, "deleted");
                self.notify_success(format!("{} deleted!", self.resource.name));
                self.load().await;
            }
            Err(e) => self.notify_failure(&e, "delete"),
        }
    }

    /// Open the aggregate details view. Failures set the page banner.
    pub async fn show_details(&mut self, id: &str) {
        if !self.resource.details {
            self.error = Some(format!("{} has no details view", self.resource.name));
            return;
        }
        match self.api.details(&self.resource.path_segment, id).await {
            Ok(details) => self.modal = Some(Modal::Details(details)),
            Err(e) => {
                tracing::warn!(resource = %self.resource.path_segment, id = %id, error = %e, "details fetch failed");
                self.error = Some(format!("Failed to fetch {} details", self.resource.noun()));
            }
        }
    }

    pub fn close_edit(&mut self) {
        if matches!(self.modal, Some(Modal::Edit(_))) {
            self.modal = None;
        }
    }

    pub fn close_details(&mut self) {
        if matches!(self.modal, Some(Modal::Details(_))) {
            self.modal = None;
        }
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Exact-match query parameters sent with every list fetch (e.g. `email`).
    pub fn set_query_params(&mut self, params: Vec<(String, String)>) {
        self.query_params = params;
    }

    /// Rows matching the current search, in list order.
    pub fn visible_rows(&self) -> Vec<&Value> {
        filter(&self.rows, &self.search, &self.resource, &self.lookups)
    }

    pub fn cell_text(&self, row: &Value, field: &str) -> String {
        cell_text(row, field, &self.resource, &self.lookups)
    }

    /// Actions offered on each row: none without a session.
    pub fn row_actions(&self, session: Option<&Session>) -> Vec<RowAction> {
        if session.is_none() {
            return Vec::new();
        }
        let mut actions = Vec::with_capacity(3);
        if self.resource.details {
            actions.push(RowAction::Details);
        }
        actions.push(RowAction::Edit);
        actions.push(RowAction::Delete);
        actions
    }

    pub fn row_id(&self, row: &Value) -> Option<String> {
        row.get(&self.resource.id_field)
            .filter(|v| !v.is_null())
            .map(value_text)
    }

    pub fn row(&self, id: &str) -> Option<&Value> {
        self.rows.iter().find(|r| self.row_id(r).as_deref() == Some(id))
    }

    pub fn resource(&self) -> &ResolvedResource {
        &self.resource
    }

    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    /// Form of the open edit modal.
    pub fn edit_form_mut(&mut self) -> Option<&mut FormState> {
        match &mut self.modal {
            Some(Modal::Edit(edit)) => Some(&mut edit.form),
            _ => None,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn lookups(&self) -> &Lookups {
        &self.lookups
    }

    /// Whether the screen currently shows an error banner or error notification.
    pub fn has_failure(&self) -> bool {
        self.failure_message().is_some()
    }

    /// Error notification text, else the error banner.
    pub fn failure_message(&self) -> Option<&str> {
        self.notification
            .as_ref()
            .filter(|n| n.severity == Severity::Error)
            .map(|n| n.message.as_str())
            .or(self.error.as_deref())
    }

    fn notify_success(&mut self, message: String) {
        self.notification = Some(Notification {
            message,
            severity: Severity::Success,
        });
    }

    fn notify_failure(&mut self, err: &AppError, verb: &str) {
        tracing::warn!(resource = %self.resource.path_segment, action = verb, error = %err, "mutation failed");
        let message = match err {
            AppError::Validation(m) => m.clone(),
            other => other
                .server_message()
                .unwrap_or_else(|| format!("Failed to {} {}", verb, self.resource.noun())),
        };
        self.notification = Some(Notification {
            message,
            severity: Severity::Error,
        });
    }
}

/// Holds `Loading` for the duration of a fetch; restores the prior state unless finished.
struct LoadingGuard<'a> {
    state: &'a mut LoadState,
    previous: Option<LoadState>,
}

impl<'a> LoadingGuard<'a> {
    fn enter(state: &'a mut LoadState) -> Self {
        let previous = std::mem::replace(state, LoadState::Loading);
        Self {
            state,
            previous: Some(previous),
        }
    }

    fn finish(mut self, outcome: LoadState) {
        *self.state = outcome;
        self.previous = None;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            *self.state = previous;
        }
    }
}
