//! # Tax
//!
//! Tax on the discounted subtotal, optionally including shipping.

use crate::error::{CostError, CostResult};
use crate::money::{Money, MoneyContext};
use crate::request::{Scalar, TaxInput};
use rust_decimal::Decimal;

/// A validated tax policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxPolicy {
    /// Percentage, full precision (`8.875` for 8.875%)
    pub rate_percent: Decimal,
    /// Whether shipping is part of the taxable base
    pub apply_on_shipping: bool,
}

impl TaxPolicy {
    /// Validate the `tax` object
    pub fn from_input(input: &TaxInput) -> CostResult<Self> {
        let rate_percent = match &input.rate_percent {
            Some(raw) => raw.to_decimal().map_err(|_| {
                CostError::validation(
                    "tax.rate_percent",
                    format!(
                        "Tax 'rate_percent' is not a valid number: '{}'",
                        raw.literal()
                    ),
                )
            })?,
            None => Decimal::ZERO,
        };

        if rate_percent.is_sign_negative() && !rate_percent.is_zero() {
            return Err(CostError::validation(
                "tax.rate_percent",
                "Tax 'rate_percent' must be >= 0",
            ));
        }

        let apply_on_shipping = match &input.apply_on_shipping {
            None => false,
            Some(Scalar::Bool(flag)) => *flag,
            Some(_) => {
                return Err(CostError::validation(
                    "tax.apply_on_shipping",
                    "Tax 'apply_on_shipping' must be a boolean",
                ))
            }
        };

        Ok(Self {
            rate_percent,
            apply_on_shipping,
        })
    }
}

/// Computes tax on the taxable base
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxCalculator {
    ctx: MoneyContext,
}

impl TaxCalculator {
    pub fn new(ctx: MoneyContext) -> Self {
        Self { ctx }
    }

    /// The amount tax is computed against
    pub fn taxable_base(
        &self,
        policy: &TaxPolicy,
        discounted_subtotal: Money,
        shipping: Money,
    ) -> CostResult<Money> {
        if policy.apply_on_shipping {
            discounted_subtotal.checked_add(shipping)
        } else {
            Ok(discounted_subtotal)
        }
    }

    /// `round(base × rate_percent / 100)`; no policy means no tax
    pub fn calculate(
        &self,
        policy: Option<&TaxPolicy>,
        discounted_subtotal: Money,
        shipping: Money,
    ) -> CostResult<Money> {
        match policy {
            Some(policy) => self
                .taxable_base(policy, discounted_subtotal, shipping)?
                .percent(policy.rate_percent, &self.ctx),
            None => Ok(self.ctx.zero()),
        }
    }
}
