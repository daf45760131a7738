//! Product listing and search route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use quickbasket_core::cart::merge_cart_with_catalog;
use quickbasket_core::catalog::Product;
use quickbasket_core::types::Price;
use serde::Deserialize;
use tracing::instrument;

use crate::api::ApiError;
use crate::error::AppError;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::cart::CartPanelView;
use crate::routes::{MessageQuery, Notice};
use crate::state::AppState;

/// Connectivity message for catalog reads, shown in place of the grid.
pub const CATALOG_UNAVAILABLE: &str =
    "Something went wrong. Check that the backend is running, reachable and returns valid JSON.";

// =============================================================================
// View Types
// =============================================================================

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub cost: Price,
    /// Rating rendered as filled and hollow stars, e.g. "★★★★☆".
    pub stars: String,
    pub image_url: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        let rating = usize::from(product.rating.min(5));
        let stars = "\u{2605}".repeat(rating) + &"\u{2606}".repeat(5 - rating);

        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            cost: product.cost,
            stars,
            image_url: product.image_url.clone(),
        }
    }
}

// =============================================================================
// Query Types
// =============================================================================

/// Search query for the product grid fragment.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub value: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsPageTemplate {
    pub username: Option<String>,
    pub products: Vec<ProductCardView>,
    pub cart: CartPanelView,
    /// Page-level notice (login success, etc.).
    pub notice: Option<Notice>,
    /// Notice rendered inside the grid (catalog fetch failures).
    pub grid_notice: Option<Notice>,
}

/// Product grid fragment template (for HTMX search updates).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub products: Vec<ProductCardView>,
    pub grid_notice: Option<Notice>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the product listing page.
///
/// Fetches the catalog, and for a logged-in user also fetches the cart and
/// merges it into the sidebar. Either fetch failing degrades that section
/// with a notice instead of failing the page, matching the original UI.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(message): Query<MessageQuery>,
) -> impl IntoResponse {
    let (catalog, grid_notice) = match state.api().fetch_catalog().await {
        Ok(catalog) => (catalog, None),
        Err(e) => {
            tracing::error!("Failed to fetch catalog: {e}");
            let message = e.backend_message().unwrap_or(CATALOG_UNAVAILABLE).to_string();
            (Vec::new(), Some(Notice::error(message)))
        }
    };

    let cart = match &user {
        Some(user) => match state.api().fetch_cart(&user.token).await {
            Ok(entries) => {
                let items = merge_cart_with_catalog(&entries, &catalog);
                CartPanelView::from_items(&items)
            }
            Err(e) => {
                tracing::error!("Failed to fetch cart: {e}");
                CartPanelView::empty().with_notice(super::cart::fetch_error_notice(&e))
            }
        },
        None => CartPanelView::empty(),
    };

    ProductsPageTemplate {
        username: user.map(|u| u.username),
        products: catalog.iter().map(ProductCardView::from).collect(),
        cart,
        notice: message.into_notice(),
        grid_notice,
    }
}

/// Product grid fragment for a search query (HTMX).
///
/// An empty query returns the full catalog, mirroring the original's
/// fallback when the search box is cleared. The client debounces input and
/// cancels superseded requests (`hx-trigger` delay + `hx-sync`), so each
/// rendered grid reflects the most recent query.
///
/// A backend rejection clears the grid (the original's behavior for failed
/// searches); a connectivity failure propagates as an error status, which
/// HTMX ignores, leaving the previous grid in place.
#[instrument(skip(state))]
pub async fn grid(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<ProductGridTemplate, AppError> {
    let value = query.value.trim();

    let result = if value.is_empty() {
        state.api().fetch_catalog().await
    } else {
        state.api().search_catalog(value).await
    };

    match result {
        Ok(products) => Ok(ProductGridTemplate {
            products: products.iter().map(ProductCardView::from).collect(),
            grid_notice: None,
        }),
        Err(e @ ApiError::Backend { .. }) => {
            tracing::warn!("Search rejected by backend: {e}");
            Ok(ProductGridTemplate {
                products: Vec::new(),
                grid_notice: None,
            })
        }
        Err(e) => {
            tracing::error!("Search failed: {e}");
            Err(AppError::Api(e))
        }
    }
}
