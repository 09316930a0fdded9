//! Auth context
//!
//! Keeps the signed-in user cached in memory and in the key-value store,
//! along with the two-factor authentication flag.

use app_core::UserRecord;
use parking_lot::RwLock;
use std::sync::Arc;
use storage::{keys, KeyValueStore};

use crate::{ContextError, Result};

#[derive(Debug, Default)]
struct AuthState {
    user: Option<UserRecord>,
    two_factor_enabled: bool,
}

/// Process-wide signed-in user
pub struct AuthContext {
    store: Arc<dyn KeyValueStore>,
    state: RwLock<AuthState>,
}

impl AuthContext {
    /// Create a signed-out context
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store, state: RwLock::new(AuthState::default()) }
    }

    /// Restore the cached user and two-factor flag from storage
    ///
    /// A corrupt cached user is treated as signed out.
    pub async fn restore(&self) -> Option<UserRecord> {
        let user = match self.store.get(keys::USER).await {
            Ok(Some(json)) => match serde_json::from_str::<UserRecord>(&json) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("Discarding unreadable cached user: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read cached user: {}", e);
                None
            }
        };

        let two_factor_enabled = matches!(
            self.store.get(keys::TWO_FACTOR).await,
            Ok(Some(flag)) if flag == "true"
        );

        let mut state = self.state.write();
        state.user = user.clone();
        state.two_factor_enabled = two_factor_enabled;
        user
    }

    /// Cache a freshly signed-in user and their session token
    ///
    /// If the user cannot be cached the token is removed again.
    pub async fn sign_in(&self, user: UserRecord, token: &str) -> Result<()> {
        self.store.set(keys::TOKEN, token).await?;
        if let Err(e) = self.update_user(user).await {
            if let Err(cleanup) = self.store.multi_remove(&[keys::TOKEN]).await {
                tracing::warn!("Failed to remove orphaned token: {}", cleanup);
            }
            return Err(e);
        }
        Ok(())
    }

    /// Replace the cached user, e.g. after a profile update
    pub async fn update_user(&self, user: UserRecord) -> Result<()> {
        let json = serde_json::to_string(&user)?;
        self.store.set(keys::USER, &json).await?;
        self.state.write().user = Some(user);
        Ok(())
    }

    /// Currently signed-in user
    pub fn user(&self) -> Option<UserRecord> {
        self.state.read().user.clone()
    }

    /// Whether a user is signed in
    pub fn is_signed_in(&self) -> bool {
        self.state.read().user.is_some()
    }

    /// Whether two-factor authentication is enabled
    pub fn two_factor_enabled(&self) -> bool {
        self.state.read().two_factor_enabled
    }

    /// Persist the two-factor flag
    pub async fn set_two_factor(&self, enabled: bool) -> Result<()> {
        if !self.is_signed_in() {
            return Err(ContextError::NotSignedIn);
        }
        self.store.set(keys::TWO_FACTOR, if enabled { "true" } else { "false" }).await?;
        self.state.write().two_factor_enabled = enabled;
        Ok(())
    }

    /// Forget the user and wipe session data from storage
    ///
    /// Language and theme selections survive sign-out.
    pub async fn sign_out(&self) -> Result<()> {
        let removed = self.store.multi_remove(keys::SESSION_KEYS).await?;
        tracing::debug!(removed, "session data cleared");
        *self.state.write() = AuthState::default();
        Ok(())
    }
}
