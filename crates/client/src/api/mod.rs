//! Backend API gateway and typed endpoint wrappers.
//!
//! # Architecture
//!
//! - [`ApiClient`] is the single chokepoint for backend calls: it injects
//!   credentials, performs the one-shot 401 refresh-and-retry, and
//!   normalizes failures into [`ApiError`].
//! - Endpoint wrappers (`products`, `orders`, `auth` modules) are thin
//!   typed shims over the gateway primitive.
//! - Catalog reads are cached in-memory via `moka` (categories 5 minutes,
//!   product lists 2 minutes), mirroring how often the backend's catalog
//!   actually changes.

mod auth;
mod client;
mod orders;
mod products;

pub use auth::AuthSession;
pub use client::ApiClient;
pub use products::ProductsFilter;

use thiserror::Error;

/// Errors raised by gateway-mediated operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP response after the retry policy was exhausted.
    ///
    /// `body` is the parsed error payload, best effort: an absent or
    /// invalid body parses to `Value::Null` rather than masking the
    /// status with a parse error.
    #[error("API error: {status} {status_text}")]
    Status {
        status: u16,
        status_text: String,
        body: serde_json::Value,
    },

    /// A success response whose body did not match the expected shape.
    #[error("JSON decode error in {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// An endpoint path that cannot be joined onto the base URL.
    #[error("invalid endpoint path '{path}': {source}")]
    Path {
        path: String,
        #[source]
        source: url::ParseError,
    },
}

impl ApiError {
    /// HTTP status of the failed call, when one was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is a 4xx failure carrying a field-level error body,
    /// as opposed to a server-side failure.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status >= 400 && *status < 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: 404,
            status_text: "Not Found".to_string(),
            body: serde_json::Value::Null,
        };
        assert_eq!(err.to_string(), "API error: 404 Not Found");
        assert_eq!(err.status(), Some(404));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_server_error_is_not_client_error() {
        let err = ApiError::Status {
            status: 502,
            status_text: "Bad Gateway".to_string(),
            body: serde_json::Value::Null,
        };
        assert!(!err.is_client_error());
    }
}
