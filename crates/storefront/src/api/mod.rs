//! REST client for the commerce backend.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP via `reqwest`; the backend's shapes are treated
//!   as given (see `quickbasket_core::catalog` for the wire types)
//! - In-memory caching via `moka` for the catalog response (5 minute TTL);
//!   search results and cart state are never cached
//! - Authenticated endpoints take the session's bearer token explicitly -
//!   there is no ambient credential state in the client
//!
//! # Example
//!
//! ```rust,ignore
//! use quickbasket_storefront::api::ApiClient;
//!
//! let client = ApiClient::new(&config);
//!
//! let catalog = client.fetch_catalog().await?;
//! let session = client.login("crio-user", "hunter2!").await?;
//! let entries = client.set_cart_quantity(&session.token, &product_id, 1).await?;
//! ```

mod client;
pub mod types;

pub use client::ApiClient;

use thiserror::Error;

/// Errors that can occur when talking to the commerce backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable response (connection refused,
    /// timeout, DNS failure, aborted body read).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status and a structured
    /// message. The message is intended for the user verbatim.
    #[error("{message}")]
    Backend {
        /// HTTP status of the response.
        status: reqwest::StatusCode,
        /// Server-provided message.
        message: String,
    },

    /// The response body was not the JSON we expected.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// The server-provided message, when the backend answered at all.
    ///
    /// Callers surface this verbatim and fall back to a per-operation
    /// connectivity message for [`ApiError::Network`]/[`ApiError::Parse`].
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Backend { message, .. } => Some(message),
            _ => None,
        }
    }
}
