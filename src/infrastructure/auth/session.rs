use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::settings::AppConfig;

/// The signed-in user as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(default)]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// Authentication state shared by the API client and the views.
///
/// Holds the bearer token and the current user. A rejected token (HTTP 401)
/// signs the session out; the configured default author is used whenever no
/// user is signed in.
pub struct Session {
    token: RwLock<Option<Zeroizing<String>>>,
    user: RwLock<Option<SessionUser>>,
    default_author: String,
}

impl Session {
    pub fn new(default_author: impl Into<String>) -> Self {
        Session {
            token: RwLock::new(None),
            user: RwLock::new(None),
            default_author: default_author.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let session = Session::new(config.default_author.trim());
        if let Some(token) = config.token() {
            *session.token.write() = Some(token);
        }
        session
    }

    pub fn sign_in(&self, token: impl Into<String>, user: SessionUser) {
        *self.token.write() = Some(Zeroizing::new(token.into()));
        tracing::debug!(user_id = %user.id, "Session signed in");
        *self.user.write() = Some(user);
    }

    pub fn sign_out(&self) {
        let had_token = self.token.write().take().is_some();
        self.user.write().take();
        if had_token {
            tracing::info!("Session cleared");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Copy of the bearer token, wiped when dropped.
    pub fn bearer_token(&self) -> Option<Zeroizing<String>> {
        self.token.read().clone()
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.user.read().clone()
    }

    /// Name to attribute new comments and records to.
    pub fn display_name(&self) -> String {
        self.user
            .read()
            .as_ref()
            .map(|u| u.name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.default_author.clone())
    }
}
