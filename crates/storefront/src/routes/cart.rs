//! Cart route handlers.
//!
//! Cart operations return the cart sidebar as an HTMX fragment, so the grid
//! stays put while the panel re-renders. The actual arithmetic lives in
//! `quickbasket_core::cart`; these handlers fetch state, call the pure
//! functions, and persist the outcome.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use quickbasket_core::cart::{
    QuantityResolution, merge_cart_with_catalog, persistable_quantity, resolve_quantity,
    total_count, total_value,
};
use quickbasket_core::catalog::{CartEntry, CartLineItem, Product};
use quickbasket_core::types::{Price, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::api::ApiError;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::Notice;
use crate::state::AppState;

/// Warning shown when the product-card add button hits an existing line.
pub const DUPLICATE_ITEM_WARNING: &str =
    "Item already in cart. Use the cart sidebar to update the quantity or remove the item.";

/// Warning shown when a guest tries to add to the cart.
pub const LOGIN_TO_ADD_WARNING: &str = "Login to add an item to the cart.";

/// Connectivity message for cart reads.
pub const CART_FETCH_FAILED: &str =
    "Could not fetch cart details. Check that the backend is running, reachable and returns valid JSON.";

/// Connectivity message for cart writes.
pub const CART_UPDATE_FAILED: &str =
    "Could not update cart. Check that the backend is running, reachable and returns valid JSON.";

// =============================================================================
// View Types
// =============================================================================

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub qty: u32,
    pub cost: Price,
    pub image_url: String,
}

impl From<&CartLineItem> for CartLineView {
    fn from(item: &CartLineItem) -> Self {
        Self {
            product_id: item.product_id.to_string(),
            name: item.name.clone(),
            qty: item.qty,
            cost: item.cost,
            image_url: item.image_url.clone(),
        }
    }
}

/// Cart sidebar display data for templates.
#[derive(Clone)]
pub struct CartPanelView {
    pub items: Vec<CartLineView>,
    pub total: Price,
    pub count: u32,
    pub notice: Option<Notice>,
}

impl CartPanelView {
    /// An empty cart panel.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: Price::ZERO,
            count: 0,
            notice: None,
        }
    }

    /// Build the panel from merged line items, deriving the totals.
    #[must_use]
    pub fn from_items(items: &[CartLineItem]) -> Self {
        Self {
            items: items.iter().map(CartLineView::from).collect(),
            total: total_value(items),
            count: total_count(items),
            notice: None,
        }
    }

    /// Attach a notice to the panel.
    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// Cart sidebar fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub cart: CartPanelView,
}

// =============================================================================
// Form Types
// =============================================================================

/// Add to cart form data (product card).
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Update cart form data (sidebar +/- controls).
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    /// +1 to add one unit, -1 to remove one unit.
    pub delta: i64,
}

// =============================================================================
// Handlers
// =============================================================================

/// Add one unit of a product from the product card (HTMX).
///
/// Duplicate prevention is on: if the product is already in the cart the
/// operation is refused with a warning and no backend call is made.
#[instrument(skip(state, user))]
pub async fn add(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Form(form): Form<AddToCartForm>,
) -> impl IntoResponse {
    let Some(user) = user else {
        return CartPanelTemplate {
            cart: CartPanelView::empty().with_notice(Notice::warning(LOGIN_TO_ADD_WARNING)),
        };
    };

    let product_id = ProductId::from(form.product_id.as_str());
    change_quantity(&state, &user.token, &product_id, 1, true).await
}

/// Adjust a product's quantity by +/-1 from the cart sidebar (HTMX).
///
/// No duplicate prevention: the new quantity is the existing one plus the
/// delta. A result at or below zero removes the line.
#[instrument(skip(state, user))]
pub async fn update(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Form(form): Form<UpdateCartForm>,
) -> impl IntoResponse {
    let Some(user) = user else {
        return CartPanelTemplate {
            cart: CartPanelView::empty().with_notice(Notice::warning(LOGIN_TO_ADD_WARNING)),
        };
    };

    let product_id = ProductId::from(form.product_id.as_str());
    change_quantity(&state, &user.token, &product_id, form.delta, false).await
}

// =============================================================================
// Shared Flow
// =============================================================================

/// Load the current cart, resolve the quantity change, persist it, and
/// render the updated panel.
async fn change_quantity(
    state: &AppState,
    token: &str,
    product_id: &ProductId,
    delta: i64,
    prevent_duplicate: bool,
) -> CartPanelTemplate {
    let (catalog, entries) = match load_cart_state(state, token).await {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Failed to load cart state: {e}");
            return CartPanelTemplate {
                cart: CartPanelView::empty().with_notice(fetch_error_notice(&e)),
            };
        }
    };

    let items = merge_cart_with_catalog(&entries, &catalog);

    match resolve_quantity(&items, product_id, delta, prevent_duplicate) {
        QuantityResolution::Duplicate => CartPanelTemplate {
            cart: CartPanelView::from_items(&items)
                .with_notice(Notice::warning(DUPLICATE_ITEM_WARNING)),
        },
        QuantityResolution::Set(quantity) => {
            let qty = persistable_quantity(quantity);
            match state.api().set_cart_quantity(token, product_id, qty).await {
                Ok(updated) => {
                    let items = merge_cart_with_catalog(&updated, &catalog);
                    CartPanelTemplate {
                        cart: CartPanelView::from_items(&items),
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to persist cart quantity: {e}");
                    let message = e
                        .backend_message()
                        .unwrap_or(CART_UPDATE_FAILED)
                        .to_string();
                    CartPanelTemplate {
                        cart: CartPanelView::from_items(&items)
                            .with_notice(Notice::error(message)),
                    }
                }
            }
        }
    }
}

/// Fetch the catalog and the session's cart entries.
pub(crate) async fn load_cart_state(
    state: &AppState,
    token: &str,
) -> Result<(Vec<Product>, Vec<CartEntry>), ApiError> {
    let catalog = state.api().fetch_catalog().await?;
    let entries = state.api().fetch_cart(token).await?;
    Ok((catalog, entries))
}

/// Notice for a failed cart read, preferring the backend's own message.
pub(crate) fn fetch_error_notice(error: &ApiError) -> Notice {
    Notice::error(
        error
            .backend_message()
            .unwrap_or(CART_FETCH_FAILED)
            .to_string(),
    )
}
