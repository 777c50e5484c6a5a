//! Motorbike rental admin: configuration-driven CRUD screens over the rental REST API.
//!
//! Rust owns all screen state and logic; a renderer (the bundled CLI, or any other) only presents it.

pub mod auth;
pub mod case;
pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod routes;
pub mod screen;
pub mod service;
pub mod state;

pub use auth::{AuthAction, AuthStatus, AuthWidget};
pub use config::{load_from_path, resolve, FullConfig, ResolvedModel, ResolvedResource};
pub use error::{AppError, ConfigError};
pub use model::{Client, Motorbike, Payment, Reservation, Resource, Session};
pub use routes::{Page, Route, Shell};
pub use screen::{FormState, LoadState, Modal, Notification, ResourceScreen, RowAction, Severity};
pub use service::{ApiClient, FormValidator};
pub use state::AppState;
