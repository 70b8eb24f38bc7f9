//! # Discounts
//!
//! Every discount is computed against the original subtotal; nothing
//! compounds, so the order of entries does not matter. The summed discount is
//! clamped to the subtotal.

use crate::error::{CostError, CostResult};
use crate::money::{Money, MoneyContext};
use crate::request::{DiscountInput, Scalar};
use rust_decimal::Decimal;

/// A validated discount entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discount {
    /// Percentage of the subtotal (`10` means 10%)
    Percent(Decimal),
    /// Flat currency deduction
    Amount(Money),
}

impl Discount {
    /// Validate one `discounts` entry
    pub fn from_input(input: &DiscountInput, ctx: &MoneyContext) -> CostResult<Self> {
        let kind = input
            .kind
            .as_ref()
            .map(Scalar::literal)
            .unwrap_or_default()
            .to_uppercase();
        if kind != "PERCENT" && kind != "AMOUNT" {
            return Err(CostError::validation(
                "discounts.type",
                format!("Unsupported discount type: '{}'", kind),
            ));
        }

        let raw = input
            .value
            .as_ref()
            .ok_or_else(|| CostError::validation("discounts.value", "Discount missing 'value'"))?;
        let value = raw.to_decimal().map_err(|_| {
            CostError::validation(
                "discounts.value",
                format!("Discount 'value' is not a valid number: '{}'", raw.literal()),
            )
        })?;

        if kind == "PERCENT" {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(CostError::validation(
                    "discounts.value",
                    "Percent discount must be >= 0",
                ));
            }
            Ok(Discount::Percent(value))
        } else {
            // Rounded before the sign check: -0.001 is a zero discount.
            let amount = ctx.round(value).map_err(|_| {
                CostError::validation("discounts.value", "Discount 'value' is out of range")
            })?;
            if amount.is_negative() {
                return Err(CostError::validation(
                    "discounts.value",
                    "Amount discount must be >= 0",
                ));
            }
            Ok(Discount::Amount(amount))
        }
    }

    /// What this entry takes off `subtotal`, before clamping
    pub fn contribution(&self, subtotal: Money, ctx: &MoneyContext) -> CostResult<Money> {
        match self {
            Discount::Percent(pct) => subtotal.percent(*pct, ctx),
            Discount::Amount(amount) => Ok(*amount),
        }
    }
}

/// Sums discount contributions and clamps them to the subtotal
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountEngine {
    ctx: MoneyContext,
}

impl DiscountEngine {
    pub fn new(ctx: MoneyContext) -> Self {
        Self { ctx }
    }

    /// Total discount for `subtotal`, in `[0, subtotal]`
    pub fn apply(&self, subtotal: Money, discounts: &[Discount]) -> CostResult<Money> {
        let mut total = self.ctx.zero();
        for discount in discounts {
            total = total.checked_add(discount.contribution(subtotal, &self.ctx)?)?;
        }
        self.ctx.round(total.min(subtotal).amount())
    }
}
