//! # Shipping
//!
//! Flat or per-item shipping with an optional free-shipping threshold. The
//! threshold is compared against the discounted subtotal and is inclusive.

use crate::error::{CostError, CostResult};
use crate::money::{Money, MoneyContext};
use crate::order::{total_quantity, LineItem};
use crate::request::{Scalar, ShippingInput};

/// How the shipping rate is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShippingMode {
    /// `rate` once per order
    #[default]
    Flat,
    /// `rate` per unit across all lines
    PerItem,
}

impl ShippingMode {
    /// Parse `FLAT` / `PER_ITEM`, ignoring case
    pub fn parse(mode: &str) -> CostResult<Self> {
        match mode.to_uppercase().as_str() {
            "FLAT" => Ok(ShippingMode::Flat),
            "PER_ITEM" => Ok(ShippingMode::PerItem),
            _ => Err(CostError::validation(
                "shipping.mode",
                "Shipping 'mode' must be 'FLAT' or 'PER_ITEM'",
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingMode::Flat => "FLAT",
            ShippingMode::PerItem => "PER_ITEM",
        }
    }
}

/// A validated shipping policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    pub mode: ShippingMode,
    /// Non-negative rate
    pub rate: Money,
    /// Discounted subtotal at or above which shipping is waived
    pub free_over: Option<Money>,
}

impl ShippingPolicy {
    /// Validate the `shipping` object
    pub fn from_input(input: &ShippingInput, ctx: &MoneyContext) -> CostResult<Self> {
        let mode = match &input.mode {
            Some(mode) => ShippingMode::parse(&mode.literal())?,
            None => ShippingMode::Flat,
        };

        let rate = match &input.rate {
            Some(raw) => parse_money("rate", raw, ctx)?,
            None => ctx.zero(),
        };
        if rate.is_negative() {
            return Err(CostError::validation(
                "shipping.rate",
                "Shipping 'rate' must be >= 0",
            ));
        }

        let free_over = match &input.free_over {
            Some(raw) => Some(parse_money("free_over", raw, ctx)?),
            None => None,
        };

        Ok(Self {
            mode,
            rate,
            free_over,
        })
    }

    /// True when `discounted_subtotal` reaches the free-shipping threshold
    pub fn is_free_for(&self, discounted_subtotal: Money) -> bool {
        self.free_over
            .map(|threshold| discounted_subtotal >= threshold)
            .unwrap_or(false)
    }
}

/// Parse and round a money field of the `shipping` object
fn parse_money(field: &str, raw: &Scalar, ctx: &MoneyContext) -> CostResult<Money> {
    let invalid = |reason: String| CostError::validation(format!("shipping.{}", field), reason);

    let value = raw.to_decimal().map_err(|_| {
        invalid(format!(
            "Shipping '{}' is not a valid number: '{}'",
            field,
            raw.literal()
        ))
    })?;
    ctx.round(value)
        .map_err(|_| invalid(format!("Shipping '{}' is out of range", field)))
}

/// Computes the shipping charge for an order
#[derive(Debug, Clone, Copy, Default)]
pub struct ShippingCalculator {
    ctx: MoneyContext,
}

impl ShippingCalculator {
    pub fn new(ctx: MoneyContext) -> Self {
        Self { ctx }
    }

    /// Shipping for `items` given the discounted subtotal. No policy means no
    /// charge.
    pub fn calculate(
        &self,
        policy: Option<&ShippingPolicy>,
        discounted_subtotal: Money,
        items: &[LineItem],
    ) -> CostResult<Money> {
        let Some(policy) = policy else {
            return Ok(self.ctx.zero());
        };

        if policy.is_free_for(discounted_subtotal) {
            return Ok(self.ctx.zero());
        }

        match policy.mode {
            ShippingMode::Flat => Ok(policy.rate),
            ShippingMode::PerItem => {
                let units = total_quantity(items).ok_or(CostError::Overflow {
                    operation: "quantity total",
                })?;
                policy.rate.times(units, &self.ctx)
            }
        }
    }
}
