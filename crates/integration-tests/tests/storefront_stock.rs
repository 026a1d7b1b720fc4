//! Integration tests for the stock mirror routes.

use axum::http::StatusCode;
use serde_json::json;

use shopfront_integration_tests::{FakeStockApi, StockReply, TestStorefront, unreachable_url};

#[tokio::test]
async fn test_refresh_replaces_mirror() {
    let api = FakeStockApi::start().await;
    let storefront = TestStorefront::start(&api.url()).await;

    api.set_listing(json!([{"name": "A", "quantity": 3, "extra": "x"}]));
    let (status, body) = storefront.post_json("/stock/refresh", &json!(null)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["refreshed"], json!(true));
    assert_eq!(body["stock"]["entries"], json!([{"name": "A", "quantity": 3}]));

    api.set_listing(json!([{"name": "B", "quantity": 7}]));
    storefront.post_json("/stock/refresh", &json!(null)).await;

    let (_, body) = storefront.get_json("/stock").await;
    assert_eq!(body["entries"], json!([{"name": "B", "quantity": 7}]));
    assert_eq!(body["loading"], json!(false));
    assert_eq!(api.listing_requests(), 2);
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_mirror() {
    let api = FakeStockApi::start().await;
    let storefront = TestStorefront::start(&api.url()).await;

    api.set_listing(json!([{"name": "A", "quantity": 3}]));
    storefront.post_json("/stock/refresh", &json!(null)).await;

    api.fail_listing(StatusCode::SERVICE_UNAVAILABLE);
    let (status, body) = storefront.post_json("/stock/refresh", &json!(null)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["refreshed"], json!(false));
    assert_eq!(body["stock"]["entries"], json!([{"name": "A", "quantity": 3}]));
    assert_eq!(body["stock"]["loading"], json!(false));
    // No retry
    assert_eq!(api.listing_requests(), 2);
}

#[tokio::test]
async fn test_refresh_with_backend_down_is_silent() {
    let storefront = TestStorefront::start(&unreachable_url().await).await;

    let (status, body) = storefront.post_json("/stock/refresh", &json!(null)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["refreshed"], json!(false));
    assert_eq!(body["stock"]["entries"], json!([]));
}

#[tokio::test]
async fn test_live_stock() {
    let api = FakeStockApi::start().await;
    api.set_stock(4, StockReply::Quantity(0));
    api.set_stock(5, StockReply::Quantity(12));
    let storefront = TestStorefront::start(&api.url()).await;

    let (status, body) = storefront.get_json("/stock/live/5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "product_id": 5,
            "quantity": 12,
            "availability": {"status": "in_stock", "quantity": 12}
        })
    );

    let (_, body) = storefront.get_json("/stock/live/4").await;
    assert_eq!(body["availability"], json!({"status": "out_of_stock"}));
}

#[tokio::test]
async fn test_live_stock_backend_failure_is_bad_gateway() {
    let api = FakeStockApi::start().await;
    api.set_stock(6, StockReply::Status(StatusCode::INTERNAL_SERVER_ERROR));
    let storefront = TestStorefront::start(&api.url()).await;

    let (status, body) = storefront.get_json("/stock/live/6").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], json!("Stock service unavailable"));
}
