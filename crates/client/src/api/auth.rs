//! Auth endpoints and the startup bootstrap.

use blossom_core::{AuthTokens, ShopUser};
use serde::Deserialize;
use tracing::instrument;

use crate::api::{ApiClient, ApiError};

/// Response of `POST /auth/telegram/`: the shop account plus its token
/// pair.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub user: ShopUser,
    pub tokens: AuthTokens,
}

impl ApiClient {
    /// Exchange a Telegram init token for session credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`]; the backend rejects tampered or expired init
    /// tokens with a 4xx.
    pub async fn login_telegram(&self, init_data: &str) -> Result<AuthSession, ApiError> {
        self.post(
            "auth/telegram/",
            &serde_json::json!({ "init_data": init_data }),
        )
        .await
    }

    /// Fetch the current identity.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`]; unauthenticated calls surface a 401.
    pub async fn me(&self) -> Result<ShopUser, ApiError> {
        self.get("auth/me/", &[]).await
    }

    /// One-time startup bootstrap.
    ///
    /// Already authenticated: no-op. Inside Telegram with an init token:
    /// exchange it and populate the session. Every failure here is
    /// swallowed - the app proceeds unauthenticated and later requests
    /// fall back to sending the raw init token per-request.
    #[instrument(skip(self))]
    pub async fn init_auth(&self) {
        if self.session().is_authenticated() {
            return;
        }

        let Some(init_data) = self.telegram().init_data().map(str::to_owned) else {
            return;
        };

        match self.login_telegram(&init_data).await {
            Ok(auth) => {
                tracing::debug!(user_id = %auth.user.id, "Authenticated via Telegram init data");
                self.session().set_auth(auth.user, auth.tokens);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Telegram authentication failed, continuing unauthenticated");
            }
        }
    }
}
