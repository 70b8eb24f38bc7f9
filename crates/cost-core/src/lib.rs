//! # cost-core
//!
//! Deterministic order cost computation for order-cost-rs.
//!
//! This crate provides:
//! - `Money` and `MoneyContext` for fixed-scale, half-up decimal money
//! - `OrderRequest` for the wire schema and `Validator` for turning it into an `Order`
//! - `LineItemAggregator`, `DiscountEngine`, `ShippingCalculator`, `TaxCalculator`
//! - `ResponseAssembler` and `OrderCostBreakdown` for the itemized result
//! - `CostError` for typed error handling
//!
//! The crate does no I/O and holds no shared state.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::{compute_order_cost, OrderRequest};
//!
//! let request = OrderRequest::from_value(serde_json::json!({
//!     "items": [
//!         {"sku": "A", "quantity": 3, "unit_price": 10.00},
//!         {"sku": "B", "quantity": 2, "unit_price": 15.50}
//!     ],
//!     "discounts": [{"type": "PERCENT", "value": 10}, {"type": "AMOUNT", "value": 5}],
//!     "shipping": {"mode": "FLAT", "rate": 7.00, "free_over": 50.00},
//!     "tax": {"rate_percent": 8, "apply_on_shipping": false}
//! }))?;
//!
//! let breakdown = compute_order_cost(&request)?;
//! assert_eq!(breakdown.total.to_string(), "60.89");
//! # Ok::<(), cost_core::CostError>(())
//! ```

pub mod breakdown;
pub mod discount;
pub mod error;
pub mod line_items;
pub mod money;
pub mod order;
pub mod pipeline;
pub mod request;
pub mod shipping;
pub mod tax;
pub mod validate;

// Re-exports for convenience
pub use breakdown::{OrderCostBreakdown, ResponseAssembler};
pub use discount::{Discount, DiscountEngine};
pub use error::{CostError, CostResult, ErrorKind, INTERNAL_ERROR_MESSAGE};
pub use line_items::{LineItemAggregator, LineResult, Subtotal};
pub use money::{Money, MoneyContext};
pub use order::{LineItem, Order, DEFAULT_CURRENCY};
pub use pipeline::{compute_order_cost, OrderCostCalculator};
pub use request::{
    Checked, DiscountInput, ItemInput, OrderRequest, Scalar, ShippingInput, TaxInput, WireShape,
};
pub use shipping::{ShippingCalculator, ShippingMode, ShippingPolicy};
pub use tax::{TaxCalculator, TaxPolicy};
pub use validate::Validator;
