//! Fake session: an explicit auth context over an injectable key-value store.

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use shared::protocol::UserProfile;
use storage::Storage;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    error::BookingError,
    routing::{Navigation, Route},
};

/// Key holding the signed-in user's profile.
pub const SESSION_USER_KEY: &str = "user";
pub const DEFAULT_AUTH_DELAY: Duration = Duration::from_millis(1000);

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}

#[async_trait]
impl SessionStore for Storage {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.get_value(key).await
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.set_value(key, value).await
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.remove_value(key).await.map(|_| ())
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[derive(Clone)]
pub struct AuthContext {
    store: Arc<dyn SessionStore>,
}

impl AuthContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::default()))
    }

    pub async fn login(&self, profile: &UserProfile) -> Result<(), BookingError> {
        let encoded = serde_json::to_string(profile)?;
        self.store
            .set(SESSION_USER_KEY, &encoded)
            .await
            .map_err(BookingError::Session)?;
        info!(email = %profile.email, "signed in");
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), BookingError> {
        self.store
            .remove(SESSION_USER_KEY)
            .await
            .map_err(BookingError::Session)?;
        info!("signed out");
        Ok(())
    }

    pub async fn is_authenticated(&self) -> Result<bool, BookingError> {
        let value = self
            .store
            .get(SESSION_USER_KEY)
            .await
            .map_err(BookingError::Session)?;
        Ok(value.is_some())
    }

    pub async fn current_user(&self) -> Result<Option<UserProfile>, BookingError> {
        let Some(raw) = self
            .store
            .get(SESSION_USER_KEY)
            .await
            .map_err(BookingError::Session)?
        else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    SignUp,
}

/// Sign-in / sign-up form. Sign-up shows extra fields, all required.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub postal_code: String,
}

impl AuthForm {
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::Login,
        };
    }

    /// First visible field left blank, in form order.
    pub fn missing_field(&self) -> Option<&'static str> {
        let mut fields = Vec::with_capacity(5);
        if self.mode == AuthMode::SignUp {
            fields.push(("first_name", &self.first_name));
            fields.push(("last_name", &self.last_name));
        }
        fields.push(("email", &self.email));
        if self.mode == AuthMode::SignUp {
            fields.push(("postal_code", &self.postal_code));
        }
        fields.push(("password", &self.password));
        fields
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        }
    }
}

/// Simulated sign-in: waits `delay`, stores the profile, then heads to the catalog.
pub async fn submit_auth(
    form: &AuthForm,
    auth: &AuthContext,
    delay: Duration,
) -> Result<Navigation, BookingError> {
    if let Some(field) = form.missing_field() {
        return Err(BookingError::MissingAuthField(field));
    }
    tokio::time::sleep(delay).await;
    auth.login(&form.profile()).await?;
    Ok(Navigation::push(Route::Movies))
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
