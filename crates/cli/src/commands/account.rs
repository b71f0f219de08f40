//! Session commands: login, logout, identity.

use blossom_client::api::ApiError;
use blossom_client::state::AppState;
use thiserror::Error;

/// Errors from the login flow.
#[derive(Debug, Error)]
pub enum LoginError {
    /// `TELEGRAM_INIT_DATA` is not set; nothing to exchange.
    #[error("TELEGRAM_INIT_DATA is not set; run inside Telegram or export it")]
    NoInitData,
}

/// Exchange the environment's Telegram init token for a session.
pub async fn login(state: &AppState) -> Result<(), LoginError> {
    if !state.api().telegram().is_embedded() {
        return Err(LoginError::NoInitData);
    }

    state.init_auth().await;

    if let Some(user) = state.session().user() {
        tracing::info!("Logged in as {} (user {})", user.first_name, user.id);
    } else {
        tracing::warn!("Login failed; continuing unauthenticated");
    }
    Ok(())
}

/// Drop the local session.
pub fn logout(state: &AppState) {
    state.session().logout();
    tracing::info!("Logged out");
}

/// Show the current identity as the backend sees it.
pub async fn whoami(state: &AppState) -> Result<(), ApiError> {
    let user = state.api().me().await?;
    let username = user.username.as_deref().unwrap_or("-");
    tracing::info!("{} (user {}, telegram {}, @{username})", user.first_name, user.id, user.telegram_id);
    Ok(())
}
