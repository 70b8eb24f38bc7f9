//! # Order Types
//!
//! Canonical, validated order data. Everything in here has already passed
//! [`crate::validate::Validator`], so the pipeline stages can rely on it.

use crate::discount::Discount;
use crate::money::Money;
use crate::shipping::ShippingPolicy;
use crate::tax::TaxPolicy;

/// Currency used when the request names none
pub const DEFAULT_CURRENCY: &str = "USD";

/// A purchased line item.
///
/// Identity is positional: two items may share a sku.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Trimmed, non-empty sku
    pub sku: String,

    pub quantity: u64,

    /// Unit price, already rounded and non-negative
    pub unit_price: Money,
}

impl LineItem {
    pub fn new(sku: impl Into<String>, quantity: u64, unit_price: Money) -> Self {
        Self {
            sku: sku.into(),
            quantity,
            unit_price,
        }
    }
}

/// A validated order ready for costing
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Upper-cased currency code
    pub currency: String,

    /// Line items in request order (never empty)
    pub items: Vec<LineItem>,

    pub discounts: Vec<Discount>,

    pub shipping: Option<ShippingPolicy>,

    pub tax: Option<TaxPolicy>,
}

impl Order {
    /// Sum of every line's quantity
    pub fn total_quantity(&self) -> Option<u64> {
        total_quantity(&self.items)
    }
}

/// Sum of quantities across `items`, `None` on overflow
pub fn total_quantity(items: &[LineItem]) -> Option<u64> {
    items
        .iter()
        .try_fold(0u64, |acc, item| acc.checked_add(item.quantity))
}
