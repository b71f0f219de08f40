//! The gateway primitive every backend call routes through.

use std::sync::Arc;
use std::time::Duration;

use blossom_core::{Category, Paginated, Product};
use moka::future::Cache;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::api::ApiError;
use crate::stores::SessionStore;
use crate::telegram::TelegramEnv;

/// Header carrying the raw Telegram init token on the fallback auth path.
pub(crate) const TELEGRAM_INIT_DATA_HEADER: &str = "X-Telegram-Init-Data";

const CATEGORIES_CACHE_TTL: Duration = Duration::from_secs(300);
const PRODUCTS_CACHE_TTL: Duration = Duration::from_secs(120);
const CACHE_CAPACITY: u64 = 1000;

/// Client for the shop backend API.
///
/// This is the only place credential injection and the 401 refresh-retry
/// live; endpoint helpers are thin wrappers over [`ApiClient::get`] and
/// [`ApiClient::post`].
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

pub(crate) struct ApiClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: Url,
    pub(crate) session: SessionStore,
    pub(crate) telegram: TelegramEnv,
    pub(crate) categories_cache: Cache<String, Vec<Category>>,
    pub(crate) products_cache: Cache<String, Paginated<Product>>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// `base_url` must end with a trailing slash (see
    /// [`crate::config::normalize_base_url`]) so endpoint paths join onto
    /// it instead of replacing its last segment.
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        base_url: Url,
        session: SessionStore,
        telegram: TelegramEnv,
    ) -> Self {
        let categories_cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CATEGORIES_CACHE_TTL)
            .build();
        let products_cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(PRODUCTS_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url,
                session,
                telegram,
                categories_cache,
                products_cache,
            }),
        }
    }

    /// The session store this gateway reads credentials from.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// The host-platform environment this gateway falls back to for
    /// unauthenticated requests.
    #[must_use]
    pub fn telegram(&self) -> &TelegramEnv {
        &self.inner.telegram
    }

    pub(crate) fn categories_cache(&self) -> &Cache<String, Vec<Category>> {
        &self.inner.categories_cache
    }

    pub(crate) fn products_cache(&self) -> &Cache<String, Paginated<Product>> {
        &self.inner.products_cache
    }

    /// Typed GET against a relative endpoint path.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let value = self.send(Method::GET, path, query, None).await?;
        decode(path, value)
    }

    /// Typed POST with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode {
            context: path.to_string(),
            source: e,
        })?;
        let value = self.send(Method::POST, path, &[], Some(&body)).await?;
        decode(path, value)
    }

    /// Issue one call through the full gateway contract.
    ///
    /// Credential injection: a bearer token when the session holds one,
    /// otherwise the raw init token under [`TELEGRAM_INIT_DATA_HEADER`]
    /// when running inside Telegram. On a 401 with a bearer attached the
    /// session is asked to refresh once and the identical call re-issued;
    /// a failed refresh surfaces the original 401 (the session store has
    /// already logged itself out by then).
    ///
    /// Returns `None` for a success response with no body (204 or empty),
    /// never attempting a parse on it.
    #[instrument(skip(self, body), fields(path))]
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<Option<serde_json::Value>, ApiError> {
        let url = self.endpoint_url(path, query)?;
        let mut retry = true;

        loop {
            let access_token = self.inner.session.access_token();

            let mut request = self.inner.http.request(method.clone(), url.clone());
            if let Some(token) = &access_token {
                request = request.bearer_auth(token);
            } else if let Some(init_data) = self.inner.telegram.init_data() {
                request = request.header(TELEGRAM_INIT_DATA_HEADER, init_data);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request.send().await?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED && retry && access_token.is_some() {
                retry = false;
                if self.inner.session.refresh().await {
                    tracing::debug!("Access token refreshed, re-issuing request");
                    continue;
                }
                // Refresh failed: fall through and surface the original 401.
            }

            if !status.is_success() {
                let body = response
                    .json::<serde_json::Value>()
                    .await
                    .unwrap_or(serde_json::Value::Null);
                return Err(ApiError::Status {
                    status: status.as_u16(),
                    status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
                    body,
                });
            }

            if status == StatusCode::NO_CONTENT {
                return Ok(None);
            }

            let text = response.text().await?;
            if text.is_empty() {
                return Ok(None);
            }

            let value = serde_json::from_str(&text).map_err(|e| ApiError::Decode {
                context: path.to_string(),
                source: e,
            })?;
            return Ok(Some(value));
        }
    }

    fn endpoint_url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self
            .inner
            .base_url
            .join(path)
            .map_err(|e| ApiError::Path {
                path: path.to_string(),
                source: e,
            })?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

fn decode<T: DeserializeOwned>(
    path: &str,
    value: Option<serde_json::Value>,
) -> Result<T, ApiError> {
    // An empty success decodes as `null`, so endpoints returning nothing
    // are typed `Option<_>` or `()`-like shapes.
    serde_json::from_value(value.unwrap_or(serde_json::Value::Null)).map_err(|e| {
        ApiError::Decode {
            context: path.to_string(),
            source: e,
        }
    })
}
