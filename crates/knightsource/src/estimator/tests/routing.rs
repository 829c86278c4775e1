use super::common::*;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::estimator::domain::{CategoryValuation, EstimatorConfig, Role};
use crate::estimator::estimator_router;
use crate::estimator::router::{estimate_handler, EstimateRequest};

#[tokio::test]
async fn estimate_handler_returns_breakdown() {
    let request = EstimateRequest {
        selected: vec![id("crt"), id("legal")],
        role: Some(Role::Rso),
    };

    let response = estimate_handler(State(legal_and_travel()), axum::Json(request)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json_body(response).await;
    assert_eq!(body["totalMin"], 1800);
    assert_eq!(body["totalMax"], 1800);
    assert_eq!(body["midpoint"], 1800);
    assert_eq!(body["lineItems"][0]["id"], "legal");
    assert_eq!(body["lineItems"][1]["id"], "crt");
}

#[tokio::test]
async fn estimate_handler_rejects_missing_role() {
    let request = EstimateRequest {
        selected: vec![id("crt")],
        role: None,
    };

    let response = estimate_handler(State(legal_and_travel()), axum::Json(request)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = read_json_body(response).await;
    assert_eq!(
        body["error"],
        "category 'crt' requires choosing individual or rso"
    );
}

#[tokio::test]
async fn estimate_handler_reports_malformed_catalog_as_server_error() {
    let mut broken = CategoryValuation::fixed("legal", "Legal Services", 300.0);
    broken.fixed_amount = None;
    let config = Arc::new(EstimatorConfig::new(vec![broken]).expect("unique ids"));
    let request = EstimateRequest {
        selected: vec![id("legal")],
        role: None,
    };

    let response = estimate_handler(State(config), axum::Json(request)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn estimate_route_accepts_json_payloads() {
    let router = estimator_router(mixed_catalog());
    let payload = json!({ "selected": ["healthcare", "recreation"], "role": null });

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/estimator/estimate")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&payload).expect("serialize payload"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["totalMin"], 650);
    assert_eq!(body["totalMax"], 1250);
    assert_eq!(body["midpoint"], 950);
}

#[tokio::test]
async fn categories_route_lists_catalog_in_order() {
    let router = estimator_router(legal_and_travel());

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/estimator/categories")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let categories = body["categories"].as_array().expect("categories array");
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["kind"], "fixed");
    assert_eq!(categories[1]["kind"], "byRole");
    assert_eq!(categories[1]["roleAmounts"]["rso"], 1500.0);
}
