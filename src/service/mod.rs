//! API access and form checks shared by every resource screen.

mod api;
mod validation;
pub use api::ApiClient;
pub use validation::FormValidator;
