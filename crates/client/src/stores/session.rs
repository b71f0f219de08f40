//! Session store: identity, bearer credentials, and the refresh protocol.
//!
//! The session store is the only component that writes credential state;
//! the API gateway reads the access token through [`SessionStore::access_token`]
//! and asks for a refresh on a 401, but never touches the fields directly.
//!
//! The refresh call goes straight to the token endpoint with this store's
//! own HTTP client rather than through the gateway, which keeps the
//! gateway's retry logic from recursing into itself.

use std::sync::{Arc, PoisonError, RwLock};

use blossom_core::{AuthTokens, ShopUser};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use crate::storage::{Storage, keys};

/// Persisted session state.
///
/// The whole record round-trips through local storage; there are no
/// volatile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub user: Option<ShopUser>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub is_authenticated: bool,
}

/// Store for the current session's identity and credentials.
///
/// Cheaply cloneable; the gateway holds a copy for credential reads.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    state: RwLock<SessionState>,
    storage: Storage,
    http: reqwest::Client,
    refresh_url: Url,
}

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
}

impl SessionStore {
    /// Create the store, reloading any persisted session.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if the refresh endpoint cannot be
    /// derived from `base_url`.
    pub fn new(
        http: reqwest::Client,
        base_url: &Url,
        storage: Storage,
    ) -> Result<Self, url::ParseError> {
        let refresh_url = base_url.join("auth/refresh/")?;
        let state = storage.load::<SessionState>(keys::SESSION).unwrap_or_default();

        Ok(Self {
            inner: Arc::new(SessionInner {
                state: RwLock::new(state),
                storage,
                http,
                refresh_url,
            }),
        })
    }

    /// Replace user, access, and refresh credentials atomically.
    pub fn set_auth(&self, user: ShopUser, tokens: AuthTokens) {
        self.mutate(|state| {
            *state = SessionState {
                user: Some(user),
                access_token: Some(tokens.access),
                refresh_token: Some(tokens.refresh),
                is_authenticated: true,
            };
        });
    }

    /// Replace only the access credential (after a successful refresh).
    pub fn set_access_token(&self, access: String) {
        self.mutate(|state| {
            state.access_token = Some(access);
        });
    }

    /// Clear all fields to the unauthenticated state. Idempotent.
    pub fn logout(&self) {
        self.mutate(|state| {
            *state = SessionState::default();
        });
    }

    /// Current access credential, if any. No side effects.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.read().access_token.clone()
    }

    /// Whether a user is currently authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated
    }

    /// Current user identity, if authenticated.
    #[must_use]
    pub fn user(&self) -> Option<ShopUser> {
        self.read().user.clone()
    }

    /// Exchange the stored refresh credential for a new access credential.
    ///
    /// Returns `true` when the access token was replaced. Returns `false`
    /// immediately when no refresh credential is held; on a rejected
    /// refresh or transport failure the whole session is cleared and
    /// `false` is returned.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> bool {
        let Some(refresh_token) = self.read().refresh_token.clone() else {
            return false;
        };

        let response = self
            .inner
            .http
            .post(self.inner.refresh_url.clone())
            .json(&serde_json::json!({ "refresh": refresh_token }))
            .send()
            .await;

        let response = match response {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::warn!(status = %response.status(), "Token refresh rejected, logging out");
                self.logout();
                return false;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh transport failure, logging out");
                self.logout();
                return false;
            }
        };

        match response.json::<RefreshResponse>().await {
            Ok(body) => {
                self.set_access_token(body.access);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh returned malformed body, logging out");
                self.logout();
                false
            }
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate(&self, op: impl FnOnce(&mut SessionState)) {
        let snapshot = {
            let mut state = self
                .inner
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            op(&mut state);
            state.clone()
        };

        if let Err(e) = self.inner.storage.save(keys::SESSION, &snapshot) {
            tracing::warn!(error = %e, "Failed to persist session state");
        }
    }
}
