//! # Line Item Aggregation
//!
//! Per-line subtotals and the order subtotal. Each line is rounded before it
//! is summed, so the sum is already exact at two places.

use crate::error::CostResult;
use crate::money::{Money, MoneyContext};
use crate::order::LineItem;
use serde::Serialize;

/// One priced line of the output listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineResult {
    pub sku: String,
    pub quantity: u64,
    pub unit_price: Money,
    pub line_subtotal: Money,
}

/// Aggregated line items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtotal {
    /// Sum of every line subtotal
    pub subtotal: Money,
    /// Priced lines in request order
    pub lines: Vec<LineResult>,
}

/// Computes line subtotals and the order subtotal
#[derive(Debug, Clone, Copy, Default)]
pub struct LineItemAggregator {
    ctx: MoneyContext,
}

impl LineItemAggregator {
    pub fn new(ctx: MoneyContext) -> Self {
        Self { ctx }
    }

    /// Price a single line: `round(unit_price × quantity)`
    pub fn price_line(&self, item: &LineItem) -> CostResult<LineResult> {
        Ok(LineResult {
            sku: item.sku.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_subtotal: item.unit_price.times(item.quantity, &self.ctx)?,
        })
    }

    /// Price every line and accumulate the subtotal
    pub fn aggregate(&self, items: &[LineItem]) -> CostResult<Subtotal> {
        let mut subtotal = self.ctx.zero();
        let mut lines = Vec::with_capacity(items.len());

        for item in items {
            let line = self.price_line(item)?;
            subtotal = subtotal.checked_add(line.line_subtotal)?;
            lines.push(line);
        }

        Ok(Subtotal {
            subtotal: self.ctx.round(subtotal.amount())?,
            lines,
        })
    }
}
