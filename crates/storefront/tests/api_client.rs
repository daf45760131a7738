//! Integration tests for the backend API client.
//!
//! Each test stands up an `httpmock` server speaking the backend's JSON
//! dialect and checks the client's parsing, headers, and error mapping.

use httpmock::prelude::*;
use serde_json::json;
use url::Url;

use quickbasket_core::catalog::CartEntry;
use quickbasket_core::types::{Price, ProductId};
use quickbasket_storefront::api::{ApiClient, ApiError};
use quickbasket_storefront::config::StorefrontConfig;

/// Build a config pointed at the given backend base URL.
fn test_config(backend: &str) -> StorefrontConfig {
    StorefrontConfig {
        backend_url: Url::parse(backend).expect("valid backend URL"),
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&test_config(&server.base_url()))
}

fn catalog_body() -> serde_json::Value {
    json!([
        {
            "name": "iPhone XR",
            "category": "Phones",
            "cost": 100,
            "rating": 4,
            "image": "https://i.imgur.com/lulqWzW.jpg",
            "_id": "v4sLtEcMpzabRyfx"
        },
        {
            "name": "Basketball",
            "category": "Sports",
            "cost": 100,
            "rating": 5,
            "image": "https://i.imgur.com/lulqWzW.jpg",
            "_id": "upLK9JbQ4rMhTwt4"
        }
    ])
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn fetch_catalog_parses_products() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/products");
            then.status(200).json_body(catalog_body());
        })
        .await;

    let client = client_for(&server);
    let products = client.fetch_catalog().await.expect("catalog fetch");

    mock.assert_async().await;
    assert_eq!(products.len(), 2);
    let first = products.first().expect("two products");
    assert_eq!(first.id, ProductId::from("v4sLtEcMpzabRyfx"));
    assert_eq!(first.name, "iPhone XR");
    assert_eq!(first.cost, Price::from(100u32));
    assert_eq!(first.rating, 4);
}

#[tokio::test]
async fn fetch_catalog_caches_the_response() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/products");
            then.status(200).json_body(catalog_body());
        })
        .await;

    let client = client_for(&server);
    let first = client.fetch_catalog().await.expect("first fetch");
    let second = client.fetch_catalog().await.expect("second fetch");

    assert_eq!(first, second);
    // Second call was served from cache.
    assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn search_sends_the_query_and_skips_the_cache() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/products/search")
                .query_param("value", "basket");
            then.status(200).json_body(json!([
                {
                    "name": "Basketball",
                    "category": "Sports",
                    "cost": 100,
                    "rating": 5,
                    "image": "https://i.imgur.com/lulqWzW.jpg",
                    "_id": "upLK9JbQ4rMhTwt4"
                }
            ]));
        })
        .await;

    let client = client_for(&server);
    let hit1 = client.search_catalog("basket").await.expect("search");
    let hit2 = client.search_catalog("basket").await.expect("search");

    assert_eq!(hit1.len(), 1);
    assert_eq!(hit2.len(), 1);
    // Searches always go to the backend.
    assert_eq!(mock.hits_async().await, 2);
}

#[tokio::test]
async fn search_maps_not_found_to_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/products/search");
            then.status(404)
                .json_body(json!({"success": false, "message": "No products found"}));
        })
        .await;

    let client = client_for(&server);
    let products = client.search_catalog("nothing-matches").await.expect("search");
    assert!(products.is_empty());
}

#[tokio::test]
async fn search_keeps_other_backend_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/products/search");
            then.status(500).json_body(json!({
                "success": false,
                "message": "Something went wrong. Check the backend console for more details"
            }));
        })
        .await;

    let client = client_for(&server);
    let err = client.search_catalog("xr").await.expect_err("must fail");

    match err {
        ApiError::Backend { status, message } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(
                message,
                "Something went wrong. Check the backend console for more details"
            );
        }
        other => panic!("expected backend error, got {other:?}"),
    }
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn fetch_cart_sends_bearer_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/cart")
                .header("authorization", "Bearer testtoken");
            then.status(200)
                .json_body(json!([{"productId": "v4sLtEcMpzabRyfx", "qty": 2}]));
        })
        .await;

    let client = client_for(&server);
    let entries = client.fetch_cart("testtoken").await.expect("cart fetch");

    mock.assert_async().await;
    assert_eq!(
        entries,
        vec![CartEntry {
            product_id: ProductId::from("v4sLtEcMpzabRyfx"),
            qty: 2,
        }]
    );
}

#[tokio::test]
async fn set_cart_quantity_posts_the_wire_shape() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/cart")
                .header("authorization", "Bearer testtoken")
                .json_body(json!({"productId": "p1", "qty": 3}));
            then.status(200).json_body(json!([{"productId": "p1", "qty": 3}]));
        })
        .await;

    let client = client_for(&server);
    let entries = client
        .set_cart_quantity("testtoken", &ProductId::from("p1"), 3)
        .await
        .expect("cart write");

    mock.assert_async().await;
    assert_eq!(entries.first().map(|e| e.qty), Some(3));
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn login_parses_the_granted_session() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/auth/login")
                .json_body(json!({"username": "crio-user", "password": "hunter22"}));
            then.status(201).json_body(json!({
                "success": true,
                "token": "testtoken",
                "username": "crio-user",
                "balance": 5000
            }));
        })
        .await;

    let client = client_for(&server);
    let granted = client.login("crio-user", "hunter22").await.expect("login");

    assert!(granted.success);
    assert_eq!(granted.token, "testtoken");
    assert_eq!(granted.username, "crio-user");
    assert_eq!(granted.balance, Price::from(5000u32));
}

#[tokio::test]
async fn login_surfaces_the_backend_message_verbatim() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(400)
                .json_body(json!({"success": false, "message": "Password is incorrect"}));
        })
        .await;

    let client = client_for(&server);
    let err = client.login("crio-user", "wrong").await.expect_err("must fail");
    assert_eq!(err.backend_message(), Some("Password is incorrect"));
}

#[tokio::test]
async fn register_succeeds_on_created() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/auth/register")
                .json_body(json!({"username": "crio-user", "password": "hunter22"}));
            then.status(201).json_body(json!({"success": true}));
        })
        .await;

    let client = client_for(&server);
    client.register("crio-user", "hunter22").await.expect("register");
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // TCP port 9 (discard) is closed on any sane test machine.
    let client = ApiClient::new(&test_config("http://127.0.0.1:9/"));
    let err = client.fetch_catalog().await.expect_err("must fail");
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.backend_message(), None);
}
