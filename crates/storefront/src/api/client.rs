//! Backend REST API client implementation.
//!
//! Thin `reqwest` wrapper with a `moka` cache for the catalog (5-minute
//! TTL). Cart and auth calls always hit the backend.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use quickbasket_core::catalog::{CartEntry, Product};
use quickbasket_core::types::ProductId;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::api::ApiError;
use crate::api::types::{ApiFailure, AuthRequest, CartWriteRequest, LoginResponse, RegisterResponse};
use crate::config::StorefrontConfig;

/// Catalog cache time-to-live.
const CATALOG_CACHE_TTL: Duration = Duration::from_secs(300);

/// Cache key for the full catalog response.
const CATALOG_CACHE_KEY: &str = "catalog";

/// Client for the commerce backend REST API.
///
/// Cheaply cloneable; all clones share the HTTP connection pool and the
/// catalog cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    endpoints: Endpoints,
    catalog_cache: Cache<String, Arc<Vec<Product>>>,
}

/// Pre-joined endpoint URLs.
struct Endpoints {
    products: Url,
    search: Url,
    cart: Url,
    login: Url,
    register: Url,
}

impl Endpoints {
    fn new(base: &Url) -> Self {
        let join = |path: &str| {
            base.join(path)
                .expect("backend base URL accepts relative joins")
        };
        Self {
            products: join("products"),
            search: join("products/search"),
            cart: join("cart"),
            login: join("auth/login"),
            register: join("auth/register"),
        }
    }
}

impl ApiClient {
    /// Create a new backend API client.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let catalog_cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(CATALOG_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                endpoints: Endpoints::new(&config.backend_url),
                catalog_cache,
            }),
        }
    }

    /// Read the response body as text, then parse.
    ///
    /// Reading text first keeps the raw body around for error diagnostics;
    /// non-success statuses are mapped to [`ApiError::Backend`] with the
    /// server's message when the body carries one.
    async fn parse_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiFailure>(&body)
                .map_or_else(|_| format!("HTTP {status}"), |failure| failure.message);
            tracing::warn!(status = %status, message = %message, "Backend returned an error");
            return Err(ApiError::Backend { status, message });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse backend response"
            );
            ApiError::Parse(e)
        })
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// Fetch the full product catalog.
    ///
    /// Cached for five minutes; product data only changes backend-side.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn fetch_catalog(&self) -> Result<Vec<Product>, ApiError> {
        if let Some(catalog) = self.inner.catalog_cache.get(CATALOG_CACHE_KEY).await {
            debug!("Cache hit for catalog");
            return Ok(catalog.as_ref().clone());
        }

        let response = self
            .inner
            .client
            .get(self.inner.endpoints.products.clone())
            .send()
            .await?;
        let products: Vec<Product> = self.parse_response(response).await?;

        self.inner
            .catalog_cache
            .insert(CATALOG_CACHE_KEY.to_string(), Arc::new(products.clone()))
            .await;

        Ok(products)
    }

    /// Search the catalog by name or category.
    ///
    /// Not cached. A 404 from the backend means "no products matched" and
    /// is mapped to an empty list; other error statuses stay errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn search_catalog(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let response = self
            .inner
            .client
            .get(self.inner.endpoints.search.clone())
            .query(&[("value", query)])
            .send()
            .await?;

        match self.parse_response(response).await {
            Err(ApiError::Backend { status, .. }) if status == reqwest::StatusCode::NOT_FOUND => {
                Ok(Vec::new())
            }
            result => result,
        }
    }

    // =========================================================================
    // Cart Methods (not cached - mutable state)
    // =========================================================================

    /// Fetch the cart entries for the session identified by `token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token is rejected.
    #[instrument(skip_all)]
    pub async fn fetch_cart(&self, token: &str) -> Result<Vec<CartEntry>, ApiError> {
        let response = self
            .inner
            .client
            .get(self.inner.endpoints.cart.clone())
            .bearer_auth(token)
            .send()
            .await?;
        self.parse_response(response).await
    }

    /// Set the persisted quantity for one product and return the updated
    /// cart entries. A quantity of 0 removes the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// write.
    #[instrument(skip_all, fields(product_id = %product_id, qty))]
    pub async fn set_cart_quantity(
        &self,
        token: &str,
        product_id: &ProductId,
        qty: u32,
    ) -> Result<Vec<CartEntry>, ApiError> {
        let response = self
            .inner
            .client
            .post(self.inner.endpoints.cart.clone())
            .bearer_auth(token)
            .json(&CartWriteRequest { product_id, qty })
            .send()
            .await?;
        self.parse_response(response).await
    }

    // =========================================================================
    // Auth Methods
    // =========================================================================

    /// Authenticate and obtain a session token plus profile data.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are
    /// rejected; the backend's message (e.g. "Password is incorrect") rides
    /// on [`ApiError::Backend`].
    #[instrument(skip_all, fields(username = %username))]
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = self
            .inner
            .client
            .post(self.inner.endpoints.login.clone())
            .json(&AuthRequest { username, password })
            .send()
            .await?;
        self.parse_response(response).await
    }

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// registration (e.g. "Username is already taken").
    #[instrument(skip_all, fields(username = %username))]
    pub async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .post(self.inner.endpoints.register.clone())
            .json(&AuthRequest { username, password })
            .send()
            .await?;
        let _: RegisterResponse = self.parse_response(response).await?;
        Ok(())
    }
}
