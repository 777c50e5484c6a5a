//! Login indicator: one session lookup on mount, then a login or logout navigation target.

use crate::model::Session;
use crate::service::ApiClient;
use reqwest::Url;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    LoggedIn(Session),
    LoggedOut,
}

/// Full-page navigation offered by the widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthAction {
    Login { url: Url },
    Logout { url: Url },
}

impl AuthAction {
    pub fn label(&self) -> &'static str {
        match self {
            AuthAction::Login { .. } => "Login with Google",
            AuthAction::Logout { .. } => "Logout",
        }
    }

    pub fn url(&self) -> &Url {
        match self {
            AuthAction::Login { url } | AuthAction::Logout { url } => url,
        }
    }
}

pub struct AuthWidget {
    status: AuthStatus,
    login_url: Url,
    logout_url: Url,
}

impl AuthWidget {
    /// Query the session endpoint once. Errors of any kind read as logged out.
    pub async fn mount(api: &ApiClient) -> Result<Self, crate::error::AppError> {
        let status = match api.session().await {
            Ok(Some(session)) => AuthStatus::LoggedIn(session),
            Ok(None) => AuthStatus::LoggedOut,
            Err(e) => {
                tracing::warn!(error = %e, "session lookup failed");
                AuthStatus::LoggedOut
            }
        };
        Ok(Self {
            status,
            login_url: api.login_url()?,
            logout_url: api.logout_url()?,
        })
    }

    pub fn status(&self) -> &AuthStatus {
        &self.status
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.status {
            AuthStatus::LoggedIn(session) => Some(session),
            AuthStatus::LoggedOut => None,
        }
    }

    pub fn action(&self) -> AuthAction {
        match self.status {
            AuthStatus::LoggedIn(_) => AuthAction::Logout {
                url: self.logout_url.clone(),
            },
            AuthStatus::LoggedOut => AuthAction::Login {
                url: self.login_url.clone(),
            },
        }
    }

    pub fn greeting(&self) -> Option<String> {
        self.session().map(|s| format!("Welcome, {}", s.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_session_endpoint_reads_as_logged_out() {
        let api = ApiClient::new("http://127.0.0.1:9").unwrap();
        let widget = AuthWidget::mount(&api).await.unwrap();
        assert_eq!(widget.status(), &AuthStatus::LoggedOut);
        assert!(widget.greeting().is_none());
        let action = widget.action();
        assert_eq!(action.label(), "Login with Google");
        assert_eq!(action.url().as_str(), "http://127.0.0.1:9/oauth2/authorization/google");
    }
}
