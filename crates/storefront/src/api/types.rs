//! Request and response shapes for the backend REST API.
//!
//! Catalog and cart collections reuse the wire types from
//! `quickbasket_core::catalog`; the shapes here cover auth and cart writes.

use quickbasket_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

/// Body for `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Successful response from `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    /// Opaque bearer token for subsequent cart calls.
    pub token: String,
    pub username: String,
    /// Wallet balance for the logged-in user.
    pub balance: Price,
}

/// Successful response from `POST /auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
}

/// Error body the backend sends with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiFailure {
    #[serde(default)]
    pub success: bool,
    pub message: String,
}

/// Body for `POST /cart`: set the quantity for one product.
///
/// A `qty` of 0 removes the line from the cart.
#[derive(Debug, Serialize)]
pub struct CartWriteRequest<'a> {
    #[serde(rename = "productId")]
    pub product_id: &'a ProductId,
    pub qty: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_shape() {
        let json = r#"{
            "success": true,
            "token": "testtoken",
            "username": "crio-user",
            "balance": 5000
        }"#;

        let parsed: LoginResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.token, "testtoken");
        assert_eq!(parsed.username, "crio-user");
        assert_eq!(parsed.balance, Price::from(5000u32));
    }

    #[test]
    fn test_cart_write_wire_names() {
        let product_id = ProductId::from("p1");
        let body = CartWriteRequest {
            product_id: &product_id,
            qty: 2,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"productId": "p1", "qty": 2}));
    }

    #[test]
    fn test_api_failure_shape() {
        let parsed: ApiFailure =
            serde_json::from_str(r#"{"success": false, "message": "Username is already taken"}"#)
                .unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.message, "Username is already taken");
    }
}
