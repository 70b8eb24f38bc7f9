//! # Request Handlers
//!
//! Axum request handlers for the cost API.
//! Bodies are read as raw bytes so that malformed JSON still gets the
//! `{"error": ...}` response shape.

use crate::envelope::{unwrap_event, ProxyResponse};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use cost_core::{CostError, ErrorKind, OrderCostCalculator, OrderRequest};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, info_span, warn};
use uuid::Uuid;

/// Response header carrying the per-request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

fn cost_error_to_response(err: &CostError) -> (StatusCode, Json<ErrorResponse>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.public_message())))
}

// =============================================================================
// Cost evaluation
// =============================================================================

/// Run the pipeline over an already-parsed body and log the outcome.
///
/// Returns the status and JSON payload; never fails.
fn evaluate(calculator: &OrderCostCalculator, body: Value) -> (StatusCode, Value) {
    let breakdown = match OrderRequest::from_value(body).and_then(|r| calculator.compute(&r)) {
        Ok(breakdown) => breakdown,
        Err(err) => return failure(err),
    };

    match serde_json::to_value(&breakdown) {
        Ok(payload) => {
            info!(
                currency = %breakdown.currency,
                total = %breakdown.total,
                lines = breakdown.line_items.len(),
                "Computed order cost"
            );
            (StatusCode::OK, payload)
        }
        Err(e) => failure(CostError::Internal(e.to_string())),
    }
}

/// Log a failed request and build its `{"error": ..}` payload
fn failure(err: CostError) -> (StatusCode, Value) {
    match err.kind() {
        ErrorKind::Validation => warn!(field = err.field(), "Rejected cost request: {}", err),
        ErrorKind::Internal => error!("Cost computation failed: {}", err),
    }
    let (status, Json(body)) = cost_error_to_response(&err);
    (status, serde_json::json!({ "error": body.error }))
}

fn parse_json(bytes: &[u8]) -> Result<Value, CostError> {
    serde_json::from_slice(bytes).map_err(|e| {
        CostError::validation("body", format!("Request body is not valid JSON: {}", e))
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "order-cost",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Compute an order cost breakdown
pub async fn compute_cost(State(state): State<AppState>, body: Bytes) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("compute_cost", %request_id, bytes = body.len());

    let (status, payload) = span.in_scope(|| match parse_json(&body) {
        Ok(value) => evaluate(&state.calculator, value),
        Err(err) => failure(err),
    });

    let mut response = (status, Json(payload)).into_response();
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Compute an order cost from a gateway-style event.
///
/// The HTTP status is always 200; the outcome lives in the envelope.
pub async fn invoke(State(state): State<AppState>, body: Bytes) -> Json<ProxyResponse> {
    let request_id = Uuid::new_v4();
    let span = info_span!("invoke", %request_id, bytes = body.len());

    let (status, payload) = span.in_scope(|| match parse_json(&body).and_then(unwrap_event) {
        Ok(value) => evaluate(&state.calculator, value),
        Err(err) => failure(err),
    });

    Json(ProxyResponse::new(status.as_u16(), &payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::create_router;
    use crate::state::AppConfig;
    use axum_test::TestServer;
    use serde_json::json;

    fn server() -> TestServer {
        TestServer::new(create_router(AppState::new(AppConfig::default()))).unwrap()
    }

    fn scenario_request() -> Value {
        json!({
            "items": [
                {"sku": "A", "quantity": 3, "unit_price": 10.00},
                {"sku": "B", "quantity": 2, "unit_price": 15.50}
            ],
            "discounts": [{"type": "PERCENT", "value": 10}, {"type": "AMOUNT", "value": 5.00}],
            "shipping": {"mode": "FLAT", "rate": 7.00, "free_over": 50.00},
            "tax": {"rate_percent": 8, "apply_on_shipping": false}
        })
    }

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error");
        assert_eq!(err.error, "Test error");
    }

    #[test]
    fn test_cost_error_conversion() {
        let (status, Json(body)) =
            cost_error_to_response(&CostError::validation("items", "'items' must be a non-empty list"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "'items' must be a non-empty list");

        let (status, Json(body)) = cost_error_to_response(&CostError::Internal("secret".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Internal server error");
    }

    #[tokio::test]
    async fn test_health() {
        let response = server().get("/health").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_compute_cost_success() {
        let response = server().post("/api/v1/cost").json(&scenario_request()).await;

        response.assert_status_ok();
        assert!(response.headers().get(REQUEST_ID_HEADER).is_some());

        let body: Value = response.json();
        assert_eq!(
            body,
            json!({
                "currency": "USD",
                "subtotal": "61.00",
                "discount": "11.10",
                "shipping": "7.00",
                "tax": "3.99",
                "total": "60.89",
                "line_items": [
                    {"sku": "A", "quantity": 3, "unit_price": "10.00", "line_subtotal": "30.00"},
                    {"sku": "B", "quantity": 2, "unit_price": "15.50", "line_subtotal": "31.00"}
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_compute_cost_validation_error() {
        let response = server()
            .post("/api/v1/cost")
            .json(&json!({"items": []}))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body, json!({"error": "'items' must be a non-empty list"}));
    }

    #[tokio::test]
    async fn test_compute_cost_unknown_discount() {
        let response = server()
            .post("/api/v1/cost")
            .json(&json!({
                "items": [{"sku": "A", "quantity": 1, "unit_price": 1}],
                "discounts": [{"type": "BOGO", "value": 1}]
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Unsupported discount type: 'BOGO'");
    }

    #[tokio::test]
    async fn test_compute_cost_malformed_json() {
        let response = server().post("/api/v1/cost").text("{not json").await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Request body is not valid JSON"));
    }

    #[tokio::test]
    async fn test_compute_cost_non_object_body() {
        let response = server().post("/api/v1/cost").json(&json!([1, 2])).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Request body must be a JSON object");
    }

    #[tokio::test]
    async fn test_compute_cost_misshapen_items() {
        let response = server()
            .post("/api/v1/cost")
            .json(&json!({"items": [5]}))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body, json!({"error": "Item at index 0 must be an object"}));
    }

    #[tokio::test]
    async fn test_compute_cost_overflow_is_internal() {
        // Two maximal quantities overflow the per-item unit count
        let response = server()
            .post("/api/v1/cost")
            .json(&json!({
                "items": [
                    {"sku": "A", "quantity": u64::MAX, "unit_price": 0},
                    {"sku": "B", "quantity": u64::MAX, "unit_price": 0}
                ],
                "shipping": {"mode": "PER_ITEM", "rate": 1.00}
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body, json!({"error": "Internal server error"}));
    }

    #[tokio::test]
    async fn test_invoke_with_string_body() {
        let event = json!({ "body": scenario_request().to_string() });
        let response = server().post("/invoke").json(&event).await;

        response.assert_status_ok();
        let envelope: Value = response.json();
        assert_eq!(envelope["statusCode"], 200);
        assert_eq!(envelope["headers"]["Content-Type"], "application/json");

        let body: Value = serde_json::from_str(envelope["body"].as_str().unwrap()).unwrap();
        assert_eq!(body["total"], "60.89");
    }

    #[tokio::test]
    async fn test_invoke_direct_event_error() {
        let response = server()
            .post("/invoke")
            .json(&json!({"items": [{"sku": "", "quantity": 1, "unit_price": 1}]}))
            .await;

        response.assert_status_ok();
        let envelope: Value = response.json();
        assert_eq!(envelope["statusCode"], 400);

        let body: Value = serde_json::from_str(envelope["body"].as_str().unwrap()).unwrap();
        assert_eq!(body["error"], "Item at index 0 missing valid 'sku'");
    }
}
