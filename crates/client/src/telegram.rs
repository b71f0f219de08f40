//! Host-platform boundary: the Telegram Mini App container.
//!
//! The client reads exactly two things from the host: one opaque init
//! token proving the embedding, and the user identity the container
//! reports. The token is never parsed or validated here; the backend does
//! that. Outside Telegram both are absent and the app degrades to
//! unauthenticated browsing.

use blossom_core::TelegramUser;
use secrecy::{ExposeSecret, SecretString};

use crate::config::Config;

/// Snapshot of the host platform environment, taken once at startup.
#[derive(Clone, Default)]
pub struct TelegramEnv {
    init_data: Option<SecretString>,
    user: Option<TelegramUser>,
}

impl std::fmt::Debug for TelegramEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramEnv")
            .field("init_data", &self.init_data.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .finish()
    }
}

impl TelegramEnv {
    /// Environment for a client running outside the Telegram container.
    #[must_use]
    pub const fn detached() -> Self {
        Self {
            init_data: None,
            user: None,
        }
    }

    /// Environment for a client embedded in the Telegram container.
    #[must_use]
    pub const fn embedded(init_data: SecretString, user: Option<TelegramUser>) -> Self {
        Self {
            init_data: Some(init_data),
            user,
        }
    }

    /// Build from configuration (init token passed through the env).
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        match &config.telegram_init_data {
            Some(init_data) => Self::embedded(init_data.clone(), None),
            None => Self::detached(),
        }
    }

    /// Whether the client is running inside the Telegram container.
    #[must_use]
    pub const fn is_embedded(&self) -> bool {
        self.init_data.is_some()
    }

    /// The raw init token, when embedded.
    #[must_use]
    pub fn init_data(&self) -> Option<&str> {
        self.init_data.as_ref().map(ExposeSecret::expose_secret)
    }

    /// The host-reported user, when known.
    #[must_use]
    pub const fn user(&self) -> Option<&TelegramUser> {
        self.user.as_ref()
    }
}
