//! Mock authentication service.
//!
//! There is no real identity provider: credentials are validated
//! structurally, handed to an injected [`AuthBackend`], and the resulting
//! profile is persisted under the store's `user` key so sign-ins survive
//! reloads. Nothing here is security - it is a demo flow.

mod error;

pub use error::AuthError;

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use midnight_dream_core::Email;

use crate::notify::{Notification, NotificationSink};
use crate::storage::{KeyValueStore, keys};

/// Minimum password length for registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// The signed-in user's profile, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    pub name: String,
    pub email: Email,
}

/// What a successful backend call returns.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: StoredUser,
    /// Opaque session token. The demo never validates it; it exists so the
    /// contract matches what a real backend would return.
    pub token: String,
}

/// Asynchronous authentication backend.
///
/// Injected so tests can substitute deterministic success or failure
/// without timing dependence.
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    /// Authenticate an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Backend`] if the backend rejects the login.
    async fn authenticate(&self, email: &Email, password: &str)
    -> Result<AuthSession, AuthError>;

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Backend`] if the backend rejects the signup.
    async fn register(
        &self,
        name: &str,
        email: &Email,
        password: &str,
    ) -> Result<AuthSession, AuthError>;
}

/// Simulated auth backend: fixed latency, a configurable fraction of
/// requests fail with a generic server error.
#[derive(Debug, Clone)]
pub struct MockAuthBackend {
    latency: Duration,
    failure_rate: f64,
}

impl MockAuthBackend {
    /// Create a backend that settles after `latency` and fails with
    /// probability `failure_rate` (clamped to `[0, 1]`).
    #[must_use]
    pub fn new(latency: Duration, failure_rate: f64) -> Self {
        Self {
            latency,
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    async fn simulate(&self) -> Result<(), AuthError> {
        tokio::time::sleep(self.latency).await;
        if self.failure_rate > 0.0 && rand::rng().random::<f64>() < self.failure_rate {
            return Err(AuthError::Backend("server error".to_owned()));
        }
        Ok(())
    }
}

impl AuthBackend for MockAuthBackend {
    async fn authenticate(
        &self,
        email: &Email,
        _password: &str,
    ) -> Result<AuthSession, AuthError> {
        self.simulate().await?;
        Ok(AuthSession {
            user: StoredUser {
                // Login knows no display name; derive one from the address.
                name: display_name(email),
                email: email.clone(),
            },
            token: "mock-session-token".to_owned(),
        })
    }

    async fn register(
        &self,
        name: &str,
        email: &Email,
        _password: &str,
    ) -> Result<AuthSession, AuthError> {
        self.simulate().await?;
        Ok(AuthSession {
            user: StoredUser {
                name: name.to_owned(),
                email: email.clone(),
            },
            token: "mock-session-token".to_owned(),
        })
    }
}

fn display_name(email: &Email) -> String {
    email
        .as_str()
        .split('@')
        .next()
        .unwrap_or_default()
        .to_owned()
}

/// Mock authentication service.
///
/// Validates input, defers to the backend, and keeps the current user in
/// memory and mirrored to storage.
pub struct AuthService<B> {
    backend: B,
    store: Arc<dyn KeyValueStore>,
    sink: Arc<dyn NotificationSink>,
    current: Option<StoredUser>,
}

impl<B: AuthBackend> AuthService<B> {
    /// Create an auth service, hydrating any previously signed-in user.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        sink: Arc<dyn NotificationSink>,
        backend: B,
    ) -> Self {
        let current = hydrate(store.as_ref());
        Self {
            backend,
            store,
            sink,
            current,
        }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&StoredUser> {
        self.current.as_ref()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidEmail`] or [`AuthError::MissingPassword`]
    /// on validation failure, or the backend's rejection. State is unchanged
    /// on error.
    #[instrument(skip_all)]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        let email = Email::parse(email.trim())?;
        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        let session = self.backend.authenticate(&email, password).await?;
        self.sink.notify(Notification::Success(format!(
            "Welcome back, {}",
            session.user.name
        )));
        self.sign_in(session.user);
        Ok(())
    }

    /// Create an account and sign in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingFields`], [`AuthError::InvalidEmail`] or
    /// [`AuthError::WeakPassword`] on validation failure, or the backend's
    /// rejection. State is unchanged on error.
    #[instrument(skip_all)]
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let name = name.trim();
        if name.is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        let email = Email::parse(email.trim())?;
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword);
        }

        let session = self.backend.register(name, &email, password).await?;
        self.sink.notify(Notification::Success(format!(
            "Welcome, {}",
            session.user.name
        )));
        self.sign_in(session.user);
        Ok(())
    }

    /// Sign the current user out. A no-op when nobody is signed in.
    pub fn logout(&mut self) {
        if self.current.take().is_none() {
            return;
        }

        if let Err(e) = self.store.remove(keys::USER) {
            tracing::warn!("failed to clear stored user: {e}");
        }
        self.sink
            .notify(Notification::Success("You have been signed out".to_owned()));
    }

    fn sign_in(&mut self, user: StoredUser) {
        match serde_json::to_string(&user) {
            Ok(payload) => {
                if let Err(e) = self.store.set(keys::USER, &payload) {
                    tracing::warn!("failed to persist user: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to serialize user: {e}"),
        }
        self.current = Some(user);
    }
}

/// Read the previously signed-in user, discarding corrupt state.
fn hydrate(store: &dyn KeyValueStore) -> Option<StoredUser> {
    let payload = match store.get(keys::USER) {
        Ok(Some(payload)) => payload,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("failed to read stored user: {e}");
            return None;
        }
    };

    match serde_json::from_str::<StoredUser>(&payload) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::warn!("discarding corrupt stored user: {e}");
            if let Err(e) = store.remove(keys::USER) {
                tracing::warn!("failed to clear corrupt user key: {e}");
            }
            None
        }
    }
}
