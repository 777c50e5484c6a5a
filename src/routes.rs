//! Shell: maps URL paths to resource screens and owns the auth widget. Holds no business state.

use crate::auth::AuthWidget;
use crate::config::ResolvedModel;
use crate::error::AppError;
use crate::screen::ResourceScreen;
use crate::state::AppState;

pub const APP_TITLE: &str = "Motorbike Reservation System";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// Path segment of a configured resource.
    Screen(String),
    Dashboard,
}

impl Route {
    /// `/{segment}` for a configured resource; anything else is the dashboard.
    pub fn from_path(model: &ResolvedModel, path: &str) -> Route {
        let segment = path.trim_matches('/');
        if model.resource_by_path(segment).is_some() {
            Route::Screen(segment.to_string())
        } else {
            Route::Dashboard
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    pub path: String,
    pub active: bool,
}

pub enum Page {
    Dashboard,
    Resource(Box<ResourceScreen>),
}

pub struct Shell {
    state: AppState,
    auth: AuthWidget,
}

impl Shell {
    pub async fn start(state: AppState) -> Result<Self, AppError> {
        let auth = AuthWidget::mount(&state.api).await?;
        Ok(Self { state, auth })
    }

    pub fn auth(&self) -> &AuthWidget {
        &self.auth
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the page for `path`; resource screens are opened (list and lookups fetched).
    pub async fn navigate(&self, path: &str) -> Page {
        match self.screen(path) {
            Some(mut screen) => {
                screen.open().await;
                Page::Resource(Box::new(screen))
            }
            None => Page::Dashboard,
        }
    }

    /// Unopened screen for `path`, or `None` when the path routes to the dashboard.
    pub fn screen(&self, path: &str) -> Option<ResourceScreen> {
        match Route::from_path(&self.state.model, path) {
            Route::Screen(segment) => self
                .state
                .model
                .resource_by_path(&segment)
                .cloned()
                .map(|resource| ResourceScreen::new(resource, self.state.api.clone())),
            Route::Dashboard => None,
        }
    }

    /// Sidebar entries in configured order, with the one for `path` flagged active.
    pub fn nav_items(&self, path: &str) -> Vec<NavItem> {
        let current = path.trim_matches('/');
        self.state
            .model
            .resources
            .iter()
            .map(|r| NavItem {
                label: crate::case::humanize(&r.path_segment),
                path: format!("/{}", r.path_segment),
                active: r.path_segment == current,
            })
            .collect()
    }
}
