//! # cost-wasm
//!
//! WebAssembly bindings for order-cost-rs.
//!
//! Runs the same cost pipeline as the HTTP service, in the browser or at the
//! edge. Requests and responses cross the boundary as JSON text.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { compute_order_cost, format_money } from 'order-cost-wasm';
//!
//! await init();
//!
//! const breakdown = JSON.parse(compute_order_cost(JSON.stringify({
//!   items: [{ sku: 'A', quantity: 3, unit_price: 10.00 }]
//! })));
//!
//! console.log('Total:', breakdown.total, format_money('3.995'));
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

use cost_core::{CostError, MoneyContext, OrderCostCalculator, OrderRequest};
use wasm_bindgen::prelude::*;

/// Compute an order cost breakdown from a JSON request.
///
/// Returns the breakdown as JSON; throws with the error message on failure.
#[wasm_bindgen]
pub fn compute_order_cost(request_json: &str) -> Result<String, JsValue> {
    compute_json(request_json).map_err(|message| JsValue::from_str(&message))
}

/// Round a numeric literal to a two-decimal money string
#[wasm_bindgen]
pub fn format_money(value: &str) -> Result<String, JsValue> {
    format_money_text(value).map_err(|message| JsValue::from_str(&message))
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn compute_json(request_json: &str) -> Result<String, String> {
    let breakdown = OrderRequest::from_slice(request_json.as_bytes())
        .and_then(|request| OrderCostCalculator::default().compute(&request))
        .map_err(|e| e.public_message())?;

    serde_json::to_string(&breakdown)
        .map_err(|e| CostError::Internal(e.to_string()).public_message())
}

fn format_money_text(value: &str) -> Result<String, String> {
    MoneyContext::STANDARD
        .parse(value)
        .map(|money| money.to_string())
        .map_err(|e| e.public_message())
}
