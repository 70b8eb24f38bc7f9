//! # Cost Pipeline
//!
//! A single forward pass over a request:
//!
//! ```text
//! OrderRequest ─► Validator ─► LineItemAggregator ─► DiscountEngine
//!                                                          │
//!   OrderCostBreakdown ◄─ ResponseAssembler ◄─ TaxCalculator ◄─ ShippingCalculator
//! ```
//!
//! Any stage failing aborts the computation; no partial result is returned.

use crate::breakdown::{OrderCostBreakdown, ResponseAssembler};
use crate::discount::DiscountEngine;
use crate::error::CostResult;
use crate::line_items::LineItemAggregator;
use crate::money::MoneyContext;
use crate::order::Order;
use crate::request::OrderRequest;
use crate::shipping::ShippingCalculator;
use crate::tax::TaxCalculator;
use crate::validate::Validator;

/// Runs the whole pipeline under one [`MoneyContext`]
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderCostCalculator {
    ctx: MoneyContext,
}

impl OrderCostCalculator {
    pub fn new(ctx: MoneyContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &MoneyContext {
        &self.ctx
    }

    /// Validate and cost a wire request
    pub fn compute(&self, request: &OrderRequest) -> CostResult<OrderCostBreakdown> {
        let order = Validator::new(self.ctx).validate(request)?;
        self.compute_order(order)
    }

    /// Cost an already-validated order
    pub fn compute_order(&self, order: Order) -> CostResult<OrderCostBreakdown> {
        let ctx = self.ctx;

        let lines = LineItemAggregator::new(ctx).aggregate(&order.items)?;
        let discount = DiscountEngine::new(ctx).apply(lines.subtotal, &order.discounts)?;
        let discounted_subtotal = ctx.round(lines.subtotal.checked_sub(discount)?.amount())?;
        let shipping = ShippingCalculator::new(ctx).calculate(
            order.shipping.as_ref(),
            discounted_subtotal,
            &order.items,
        )?;
        let tax = TaxCalculator::new(ctx).calculate(order.tax.as_ref(), discounted_subtotal, shipping)?;

        ResponseAssembler::new(ctx).assemble(order.currency, lines, discount, shipping, tax)
    }
}

/// Cost a request with the standard two-place, half-up context
pub fn compute_order_cost(request: &OrderRequest) -> CostResult<OrderCostBreakdown> {
    OrderCostCalculator::default().compute(request)
}
