//! # Money
//!
//! Fixed-scale decimal money for the cost pipeline.
//!
//! Every `Money` value is produced by a [`MoneyContext`], which owns the
//! scale and rounding strategy. There is no process-wide decimal context:
//! the context is passed to each operation that can produce extra digits.
//!
//! ```text
//! literal ──► MoneyContext::parse ──► Money (scale 2)
//!                                       │
//!            times(qty) / percent(pct) ─┤  round half-up right after the op
//!            checked_add / checked_sub ─┘  exact, scale already 2
//! ```

use crate::error::{CostError, CostResult};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Parse a base-10 literal, accepting plain (`"15.50"`) and scientific
/// (`"1e2"`) notation.
pub fn parse_decimal(literal: &str) -> CostResult<Decimal> {
    let trimmed = literal.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| CostError::InvalidNumber {
            value: literal.to_string(),
        })
}

/// Arithmetic configuration for money values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoneyContext {
    /// Number of fractional digits kept after every rounding step
    pub scale: u32,
    /// How midpoints are resolved
    pub rounding: RoundingStrategy,
}

impl MoneyContext {
    /// Two places, round half-up.
    pub const STANDARD: MoneyContext = MoneyContext {
        scale: 2,
        rounding: RoundingStrategy::MidpointAwayFromZero,
    };

    /// Round a raw decimal into a money value at this context's scale.
    ///
    /// A rounded zero is always positive zero.
    pub fn round(&self, value: Decimal) -> CostResult<Money> {
        let mut rounded = value.round_dp_with_strategy(self.scale, self.rounding);
        if rounded.is_zero() {
            rounded = Decimal::ZERO;
        }
        rounded.rescale(self.scale);
        if rounded.scale() != self.scale {
            return Err(CostError::Overflow {
                operation: "rounding",
            });
        }
        Ok(Money(rounded))
    }

    /// Parse a literal and round it.
    pub fn parse(&self, literal: &str) -> CostResult<Money> {
        self.round(parse_decimal(literal)?)
    }

    /// Zero at this context's scale (renders as `0.00` for the standard context)
    pub fn zero(&self) -> Money {
        let mut zero = Decimal::ZERO;
        zero.rescale(self.scale);
        Money(zero)
    }
}

impl Default for MoneyContext {
    fn default() -> Self {
        MoneyContext::STANDARD
    }
}

/// A rounded monetary amount.
///
/// Ordering and equality compare numeric value, so `61.00 == 61.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

impl Money {
    /// The underlying decimal
    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Sum of two amounts. Both already sit at the context scale, so no
    /// rounding is needed.
    pub fn checked_add(self, other: Money) -> CostResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(CostError::Overflow {
                operation: "addition",
            })
    }

    /// Difference of two amounts
    pub fn checked_sub(self, other: Money) -> CostResult<Money> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or(CostError::Overflow {
                operation: "subtraction",
            })
    }

    /// `round(self × quantity)`
    pub fn times(self, quantity: u64, ctx: &MoneyContext) -> CostResult<Money> {
        let product = self
            .0
            .checked_mul(Decimal::from(quantity))
            .ok_or(CostError::Overflow {
                operation: "multiplication",
            })?;
        ctx.round(product)
    }

    /// `round(self × rate_percent / 100)`
    pub fn percent(self, rate_percent: Decimal, ctx: &MoneyContext) -> CostResult<Money> {
        let scaled = self
            .0
            .checked_mul(rate_percent)
            .and_then(|product| product.checked_div(ONE_HUNDRED))
            .ok_or(CostError::Overflow {
                operation: "percentage",
            })?;
        ctx.round(scaled)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
