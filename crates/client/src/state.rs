//! Application state: the explicit app context handed to the view layer.
//!
//! Stores are context-owned objects wired together here and injected into
//! whatever renders them - never ambient globals. Each store keeps its
//! single-writer discipline: the context hands out exclusive guards for
//! the mutable stores and shared clones for the session and gateway.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use blossom_core::OrderDetail;
use thiserror::Error;

use crate::api::ApiClient;
use crate::checkout::{CheckoutError, CheckoutForm};
use crate::config::Config;
use crate::storage::{Storage, StorageError};
use crate::stores::{CartStore, FavoritesStore, SessionStore};
use crate::telegram::TelegramEnv;

/// Errors constructing the application state.
#[derive(Debug, Error)]
pub enum AppStateError {
    /// Storage directory could not be opened.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// HTTP client construction failed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint URL could not be derived from the base URL.
    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Application state shared across the view layer.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    api: ApiClient,
    session: SessionStore,
    cart: Mutex<CartStore>,
    favorites: Mutex<FavoritesStore>,
}

impl AppState {
    /// Wire up storage, stores, and the gateway from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AppStateError`] if the storage directory or HTTP client
    /// cannot be created.
    pub fn new(config: Config) -> Result<Self, AppStateError> {
        let storage = Storage::open(&config.data_dir)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        let telegram = TelegramEnv::from_config(&config);
        let session = SessionStore::new(http.clone(), &config.api_base_url, storage.clone())?;
        let cart = Mutex::new(CartStore::load(storage.clone()));
        let favorites = Mutex::new(FavoritesStore::load(storage));
        let api = ApiClient::new(
            http,
            config.api_base_url.clone(),
            session.clone(),
            telegram,
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                session,
                cart,
                favorites,
            }),
        })
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get a reference to the API gateway.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Get a reference to the session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Lock the cart store for reading or mutation.
    ///
    /// Mutations are synchronous and atomic with respect to each other;
    /// callers must not hold the guard across an await point.
    #[must_use]
    pub fn cart(&self) -> MutexGuard<'_, CartStore> {
        self.inner
            .cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock the favorites store for reading or mutation.
    #[must_use]
    pub fn favorites(&self) -> MutexGuard<'_, FavoritesStore> {
        self.inner
            .favorites
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Run the one-time auth bootstrap (see [`ApiClient::init_auth`]).
    pub async fn init_auth(&self) {
        self.inner.api.init_auth().await;
    }

    /// Validate and submit a checkout.
    ///
    /// On success the cart (and any promo) is cleared. On any failure the
    /// cart is left intact so the user can retry.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Invalid`] before any network call
    /// - [`CheckoutError::EmptyCart`] when there is nothing to submit
    /// - [`CheckoutError::Api`] when the backend rejects the order
    pub async fn submit_checkout(&self, form: CheckoutForm) -> Result<OrderDetail, CheckoutError> {
        form.validate().map_err(CheckoutError::Invalid)?;

        let items = {
            let cart = self.cart();
            if cart.is_empty() {
                return Err(CheckoutError::EmptyCart);
            }
            cart.checkout_items()
        };

        let request = form.into_request(items);
        let detail = self.inner.api.create_order(&request).await?;
        self.cart().clear();
        Ok(detail)
    }
}
