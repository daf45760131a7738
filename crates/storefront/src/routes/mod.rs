//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Product listing page (search box, grid,
//!                                cart sidebar)
//! GET  /health                 - Health check
//!
//! # Products (HTMX fragments)
//! GET  /products/grid          - Product grid for a search query
//!
//! # Cart (HTMX fragments)
//! POST /cart/add               - Add one unit, duplicate-prevented
//! POST /cart/update            - Adjust quantity by +/-1 from the sidebar
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//! ```

pub mod auth;
pub mod cart;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Deserialize;

use crate::middleware::{api_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

// =============================================================================
// Shared View Types
// =============================================================================

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    /// CSS class suffix for the notice container.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A one-shot user-facing message, rendered at the top of a page or
/// fragment. Plays the role the original client's snackbar played.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    /// Create a success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    /// Create a warning notice.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }

    /// Create an error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Query parameters for redirect-carried messages.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl MessageQuery {
    /// Convert into a notice; an error message wins over a success one.
    #[must_use]
    pub fn into_notice(self) -> Option<Notice> {
        if let Some(message) = self.error {
            return Some(Notice::error(message));
        }
        self.success.map(Notice::success)
    }
}

// =============================================================================
// Routers
// =============================================================================

/// Liveness health check endpoint.
pub async fn health() -> &'static str {
    "ok"
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Product listing page and search fragment
        .route("/", get(products::index))
        .route("/products/grid", get(products::grid))
        // Cart fragments (relaxed rate limit)
        .nest("/cart", cart_routes().layer(api_rate_limiter()))
        // Auth routes (strict rate limit)
        .nest("/auth", auth_routes().layer(auth_rate_limiter()))
}
