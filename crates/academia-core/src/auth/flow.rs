use thiserror::Error;
use tracing::{info, warn};

use crate::api::{ApiClient, ApiError};

use super::{AccountKind, Identity, Session};

/// Shown when a failed student login carries no server message
const STUDENT_LOGIN_FALLBACK: &str = "Login failed. Please check your credentials.";

/// Shown when a failed admin login carries no server message
const ADMIN_LOGIN_FALLBACK: &str = "Admin login failed. Please check your credentials.";

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Username and password required")]
    MissingCredentials,

    /// The backend (or the network) refused the login. `message` is ready
    /// to show next to the login form.
    #[error("{message}")]
    Rejected {
        message: String,
        #[source]
        source: ApiError,
    },

    #[error("Failed to save session: {0:#}")]
    Storage(anyhow::Error),
}

impl LoginError {
    /// Message to display to the user
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

fn fallback_message(kind: AccountKind) -> &'static str {
    match kind {
        AccountKind::Student => STUDENT_LOGIN_FALLBACK,
        AccountKind::Admin => ADMIN_LOGIN_FALLBACK,
    }
}

/// Log in through the endpoint for `kind` and activate the session.
///
/// The error carries the server's `message` when it sent one. A failed
/// login leaves the session as it was, except on a 401, where the gateway
/// has already ended it.
pub async fn sign_in(
    api: &ApiClient,
    kind: AccountKind,
    username: &str,
    password: &str,
) -> Result<Session, LoginError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(LoginError::MissingCredentials);
    }

    let result: Result<(Identity, String), ApiError> = match kind {
        AccountKind::Student => api
            .login_user(username, password)
            .await
            .map(|r| (r.user, r.token)),
        AccountKind::Admin => api
            .login_admin(username, password)
            .await
            .map(|r| (r.admin, r.token)),
    };

    let (identity, token) = result.map_err(|e| {
        warn!(error = %e, kind = ?kind, "Login failed");
        LoginError::Rejected {
            message: e
                .server_message()
                .unwrap_or_else(|| fallback_message(kind).to_string()),
            source: e,
        }
    })?;

    let session = api
        .sessions()
        .login(identity, kind, token)
        .map_err(LoginError::Storage)?;
    info!(kind = ?kind, "Login successful");
    Ok(session)
}

/// End the session.
///
/// The backend is told first when a session exists; its answer does not
/// matter. The local session is always cleared.
pub async fn sign_out(api: &ApiClient) -> anyhow::Result<()> {
    if api.sessions().is_authenticated() {
        if let Err(e) = api.logout().await {
            warn!(error = %e, "Server logout failed, clearing local session anyway");
        }
    }
    api.sessions().logout()
}
