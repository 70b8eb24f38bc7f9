//! # Cost Breakdown
//!
//! The output entity and the assembler that produces it. Monetary fields
//! serialize as fixed two-decimal strings.

use crate::error::CostResult;
use crate::line_items::{LineResult, Subtotal};
use crate::money::{Money, MoneyContext};
use serde::Serialize;

/// Itemized cost of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderCostBreakdown {
    pub currency: String,
    pub subtotal: Money,
    /// Clamped total discount
    pub discount: Money,
    pub shipping: Money,
    pub tax: Money,
    /// `discounted_subtotal + shipping + tax`
    pub total: Money,
    pub line_items: Vec<LineResult>,

    /// `subtotal - discount`; not part of the wire format
    #[serde(skip)]
    pub discounted_subtotal: Money,
}

/// Combines the per-stage results into a breakdown
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseAssembler {
    ctx: MoneyContext,
}

impl ResponseAssembler {
    pub fn new(ctx: MoneyContext) -> Self {
        Self { ctx }
    }

    /// Each input is already rounded; the total is their exact sum.
    pub fn assemble(
        &self,
        currency: String,
        lines: Subtotal,
        discount: Money,
        shipping: Money,
        tax: Money,
    ) -> CostResult<OrderCostBreakdown> {
        let discounted_subtotal = self.ctx.round(lines.subtotal.checked_sub(discount)?.amount())?;
        let total = discounted_subtotal.checked_add(shipping)?.checked_add(tax)?;

        Ok(OrderCostBreakdown {
            currency,
            subtotal: lines.subtotal,
            discount,
            shipping,
            tax,
            total: self.ctx.round(total.amount())?,
            line_items: lines.lines,
            discounted_subtotal,
        })
    }
}
