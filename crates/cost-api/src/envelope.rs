//! # Gateway Envelopes
//!
//! Support for gateway-style invocations, where the cost request either is
//! the event itself or sits in its `body` field, and the response is wrapped
//! in a proxy-integration envelope.

use cost_core::{CostError, CostResult};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Extract the request body from a gateway event.
///
/// - no `body` key: the event is the request
/// - `body: null`: empty request
/// - `body: "<json>"`: parsed
/// - `body: {..}`: used as-is
pub fn unwrap_event(event: Value) -> CostResult<Value> {
    let Value::Object(mut fields) = event else {
        return Err(CostError::validation("event", "Event must be a JSON object"));
    };

    match fields.remove("body") {
        None => Ok(Value::Object(fields)),
        Some(Value::Null) => Ok(Value::Object(Default::default())),
        Some(Value::String(raw)) => serde_json::from_str(&raw).map_err(|e| {
            CostError::validation("body", format!("Request body is not valid JSON: {}", e))
        }),
        Some(body @ Value::Object(_)) => Ok(body),
        Some(_) => Err(CostError::validation("body", "Unsupported body type")),
    }
}

/// Proxy-integration style response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProxyResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON payload, serialized to a string
    pub body: String,
}

impl ProxyResponse {
    pub fn new(status_code: u16, payload: &Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body: payload.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direct_event_is_the_request() {
        let event = json!({"items": [{"sku": "A", "quantity": 1, "unit_price": 1}]});
        assert_eq!(unwrap_event(event.clone()).unwrap(), event);
    }

    #[test]
    fn test_string_body_is_parsed() {
        let event = json!({"body": "{\"currency\": \"eur\"}", "headers": {}});
        assert_eq!(unwrap_event(event).unwrap(), json!({"currency": "eur"}));
    }

    #[test]
    fn test_object_and_null_bodies() {
        assert_eq!(
            unwrap_event(json!({"body": {"items": []}})).unwrap(),
            json!({"items": []})
        );
        assert_eq!(unwrap_event(json!({"body": null})).unwrap(), json!({}));
    }

    #[test]
    fn test_bad_events() {
        assert_eq!(
            unwrap_event(json!("hello")).unwrap_err().to_string(),
            "Event must be a JSON object"
        );
        assert_eq!(
            unwrap_event(json!({"body": 42})).unwrap_err().to_string(),
            "Unsupported body type"
        );
        assert!(unwrap_event(json!({"body": "{oops"})).unwrap_err().is_validation());
    }

    #[test]
    fn test_proxy_response_shape() {
        let response = ProxyResponse::new(400, &json!({"error": "nope"}));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "statusCode": 400,
                "headers": {"Content-Type": "application/json"},
                "body": "{\"error\":\"nope\"}"
            })
        );
    }
}
