//! Persisted authentication session.

use std::sync::Arc;

use crate::app::Result;
use crate::domain::AuthUser;
use crate::store::KeyValueStore;

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "auth_user";

#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub user: AuthUser,
    pub token: String,
}

pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Records a successful sign-in. Only remembered sessions outlive the process.
    pub fn set_auth(&self, user: &AuthUser, token: Option<&str>, remember: bool) -> Result<()> {
        let Some(token) = token else {
            return Ok(());
        };

        if remember {
            self.store.set(TOKEN_KEY, token)?;
            self.store.set(USER_KEY, &serde_json::to_string(user)?)?;
            tracing::info!("Remembered session for {}", user.email);
        } else {
            self.clear()?;
        }
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)
    }

    /// Restores a remembered session. An unreadable user record clears both entries.
    pub fn hydrate(&self) -> Result<Option<AuthSession>> {
        let (Some(token), Some(raw_user)) = (self.store.get(TOKEN_KEY)?, self.store.get(USER_KEY)?)
        else {
            return Ok(None);
        };

        match serde_json::from_str::<AuthUser>(&raw_user) {
            Ok(user) => Ok(Some(AuthSession { user, token })),
            Err(e) => {
                tracing::warn!("Failed to parse stored user: {}", e);
                self.clear()?;
                Ok(None)
            }
        }
    }
}
