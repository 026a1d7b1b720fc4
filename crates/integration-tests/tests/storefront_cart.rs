//! Integration tests for the cart routes and the availability gate.

use axum::http::StatusCode;
use serde_json::{Value, json};

use shopfront_integration_tests::{
    FakeStockApi, StockReply, TestStorefront, product_json, unreachable_url,
};

/// Fake stock API plus a storefront with the fixture user signed in.
async fn setup() -> (FakeStockApi, TestStorefront) {
    let (api, storefront) = setup_anonymous().await;
    storefront.sign_in().await;
    (api, storefront)
}

async fn setup_anonymous() -> (FakeStockApi, TestStorefront) {
    let api = FakeStockApi::start().await;
    let storefront = TestStorefront::start(&api.url()).await;
    (api, storefront)
}

fn cart_names(cart: &Value) -> Vec<String> {
    cart["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|item| item["name"].as_str().expect("name").to_string())
        .collect()
}

#[tokio::test]
async fn test_add_in_stock_records_remote_quantity() {
    let (api, storefront) = setup().await;
    api.set_stock(1, StockReply::Quantity(5));

    let (status, body) = storefront
        .post_json("/cart/items", &product_json(1, "Kettle", "35.00"))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["item"]["name"], json!("Kettle"));
    assert_eq!(body["item"]["quantity"], json!(1));
    assert_eq!(body["item"]["stock"], json!(5));
    assert_eq!(body["toast"]["level"], json!("info"));
    assert_eq!(api.stock_requests(), vec!["1".to_string()]);
}

#[tokio::test]
async fn test_add_out_of_stock_is_blocked() {
    let (api, storefront) = setup().await;
    api.set_stock(2, StockReply::Quantity(0));

    let (status, body) = storefront
        .post_json("/cart/items", &product_json(2, "Teapot", "20.00"))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["reason"], json!("out_of_stock"));
    assert_eq!(body["toast"]["message"], json!("Teapot is out of stock"));

    let (_, cart) = storefront.get_json("/cart").await;
    assert_eq!(cart["items"], json!([]));
}

#[tokio::test]
async fn test_add_without_user_is_refused_before_lookup() {
    let (api, storefront) = setup_anonymous().await;
    api.set_stock(1, StockReply::Quantity(5));

    let (status, body) = storefront
        .post_json("/cart/items", &product_json(1, "Kettle", "35.00"))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["reason"], json!("sign_in_required"));
    assert_eq!(body["toast"]["level"], json!("error"));
    assert!(api.stock_requests().is_empty());

    let (_, cart) = storefront.get_json("/cart").await;
    assert_eq!(cart["items"], json!([]));
}

#[tokio::test]
async fn test_add_refused_when_mirror_reports_zero() {
    let (api, storefront) = setup().await;
    api.set_listing(json!([{"name": "Teapot", "quantity": 0}]));
    api.set_stock(2, StockReply::Quantity(4));
    storefront.post_json("/stock/refresh", &json!(null)).await;

    let (status, body) = storefront
        .post_json("/cart/items", &product_json(2, "Teapot", "20.00"))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["reason"], json!("out_of_stock"));
    assert!(api.stock_requests().is_empty());
}

#[tokio::test]
async fn test_add_with_failed_lookup_is_blocked_with_toast() {
    let (api, storefront) = setup().await;
    api.set_stock(3, StockReply::Status(StatusCode::INTERNAL_SERVER_ERROR));

    let (status, body) = storefront
        .post_json("/cart/items", &product_json(3, "Mug", "12.00"))
        .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["reason"], json!("unconfirmed"));
    assert_eq!(body["toast"]["level"], json!("error"));
    // No retry
    assert_eq!(api.stock_requests().len(), 1);

    let (_, cart) = storefront.get_json("/cart").await;
    assert_eq!(cart["item_count"], json!(0));
}

#[tokio::test]
async fn test_add_with_backend_down_is_blocked() {
    let storefront = TestStorefront::start(&unreachable_url().await).await;
    storefront.sign_in().await;

    let (status, body) = storefront
        .post_json("/cart/items", &product_json(3, "Mug", "12.00"))
        .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["reason"], json!("unconfirmed"));
}

#[tokio::test]
async fn test_adding_twice_increments_one_line() {
    let (api, storefront) = setup().await;
    api.set_stock(1, StockReply::Quantity(5));

    storefront
        .post_json("/cart/items", &product_json(1, "Kettle", "35.00"))
        .await;
    let (_, body) = storefront
        .post_json("/cart/items", &product_json(1, "Kettle", "35.00"))
        .await;
    assert_eq!(body["item"]["quantity"], json!(2));

    let (_, cart) = storefront.get_json("/cart").await;
    assert_eq!(cart_names(&cart), vec!["Kettle"]);
    assert_eq!(cart["item_count"], json!(2));
    assert_eq!(cart["subtotal"]["amount"], json!("70.00"));
    assert_eq!(cart["items"][0]["line_price"]["amount"], json!("70.00"));
}

#[tokio::test]
async fn test_cart_with_overflowing_total_still_renders() {
    let (api, storefront) = setup().await;
    api.set_stock(1, StockReply::Quantity(5));
    let big = product_json(1, "Big", "79228162514264337593543950335");

    for _ in 0..2 {
        let (status, _) = storefront.post_json("/cart/items", &big).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, cart) = storefront.get_json("/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["item_count"], json!(2));
    assert_eq!(cart["items"][0]["line_price"], Value::Null);
    assert_eq!(cart["subtotal"], Value::Null);
}

#[tokio::test]
async fn test_cart_shows_mirrored_stock() {
    let (api, storefront) = setup().await;
    api.set_listing(json!([{"name": "Kettle", "quantity": 8}]));
    api.set_stock(1, StockReply::Quantity(5));
    storefront.post_json("/stock/refresh", &json!(null)).await;

    storefront
        .post_json("/cart/items", &product_json(1, "Kettle", "35.00"))
        .await;

    // Mirror and live check can disagree; both are reported as-is.
    let (_, cart) = storefront.get_json("/cart").await;
    assert_eq!(cart["items"][0]["stock"], json!(5));
    assert_eq!(cart["items"][0]["mirrored_stock"], json!(8));
}

#[tokio::test]
async fn test_remove_by_position() {
    let (api, storefront) = setup().await;
    for (id, name) in [(1, "A"), (2, "B"), (3, "C")] {
        api.set_stock(id, StockReply::Quantity(1));
        storefront
            .post_json("/cart/items", &product_json(id, name, "1.00"))
            .await;
    }

    let (status, cart) = storefront.delete_json("/cart/items/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart_names(&cart), vec!["A", "C"]);

    let (status, cart) = storefront.delete_json("/cart/items/9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart_names(&cart), vec!["A", "C"]);
}

#[tokio::test]
async fn test_checkout_moves_cart_into_order_history() {
    let (api, storefront) = setup().await;
    api.set_stock(1, StockReply::Quantity(5));

    storefront
        .post_json("/cart/items", &product_json(1, "Kettle", "35.00"))
        .await;
    let (status, body) = storefront.post_json("/cart/checkout", &json!(null)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"]["items"][0]["name"], json!("Kettle"));

    let (_, cart) = storefront.get_json("/cart").await;
    assert_eq!(cart["items"], json!([]));

    let (_, orders) = storefront.get_json("/account/orders").await;
    assert_eq!(orders.as_array().map(Vec::len), Some(1));
    assert_eq!(orders[0]["reference"], body["order"]["reference"]);
}

#[tokio::test]
async fn test_checkout_without_user_discards_cart() {
    let (api, storefront) = setup().await;
    api.set_stock(1, StockReply::Quantity(5));
    storefront
        .post_json("/cart/items", &product_json(1, "Kettle", "35.00"))
        .await;
    let (status, _) = storefront.delete_json("/account").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = storefront.post_json("/cart/checkout", &json!(null)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"], Value::Null);

    let (_, cart) = storefront.get_json("/cart").await;
    assert_eq!(cart["items"], json!([]));
}

#[tokio::test]
async fn test_checkout_of_empty_cart_is_rejected() {
    let (_api, storefront) = setup().await;

    let (status, body) = storefront.post_json("/cart/checkout", &json!(null)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Bad request: cart is empty"));
}
