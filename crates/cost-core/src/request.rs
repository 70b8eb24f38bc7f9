//! # Request Schema
//!
//! Wire-level request types. These mirror the inbound JSON one-to-one and
//! carry no guarantees; [`crate::validate::Validator`] turns them into the
//! canonical [`crate::order::Order`].
//!
//! Deserialization never fails on a badly shaped field. Containers land in
//! [`Checked::Invalid`] and leaves in [`Scalar::Other`], so the validator can
//! report the offending field by name.

use crate::error::{CostError, CostResult};
use crate::money::parse_decimal;
use rust_decimal::Decimal;
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A scalar JSON value that may carry a number.
///
/// Numbers arrive either as JSON numbers or as strings holding a base-10
/// literal (`"15.50"`), so both are accepted here and parsed later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    /// An array or object where a scalar was expected
    Other(Value),
}

impl Scalar {
    /// Textual form of the value as the caller sent it
    pub fn literal(&self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s.clone(),
            Scalar::Other(v) => v.to_string(),
        }
    }

    /// Parse as a decimal. Booleans are not numbers.
    pub fn to_decimal(&self) -> CostResult<Decimal> {
        match self {
            Scalar::Number(n) => parse_decimal(&n.to_string()),
            Scalar::Text(s) => parse_decimal(s),
            Scalar::Bool(_) | Scalar::Other(_) => Err(CostError::InvalidNumber {
                value: self.literal(),
            }),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// JSON shape a wire type must arrive in.
///
/// serde would otherwise accept a struct written as an array.
pub trait WireShape {
    fn accepts(value: &Value) -> bool;
}

impl<T> WireShape for Vec<T> {
    fn accepts(value: &Value) -> bool {
        value.is_array()
    }
}

macro_rules! object_shape {
    ($($ty:ty),+) => {
        $(impl WireShape for $ty {
            fn accepts(value: &Value) -> bool {
                value.is_object()
            }
        })+
    };
}

object_shape!(ItemInput, DiscountInput, ShippingInput, TaxInput);

/// A container field that may not have the shape the schema asks for
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Checked<T> {
    Valid(T),
    Invalid(Value),
}

impl<'de, T> Deserialize<'de> for Checked<T>
where
    T: DeserializeOwned + WireShape,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if !T::accepts(&value) {
            return Ok(Checked::Invalid(value));
        }
        let parsed = T::deserialize(&value);
        Ok(match parsed {
            Ok(valid) => Checked::Valid(valid),
            Err(_) => Checked::Invalid(value),
        })
    }
}

impl<T> Checked<T> {
    /// The typed value, if the JSON had the right shape
    pub fn valid(&self) -> Option<&T> {
        match self {
            Checked::Valid(value) => Some(value),
            Checked::Invalid(_) => None,
        }
    }

    pub fn valid_mut(&mut self) -> Option<&mut T> {
        match self {
            Checked::Valid(value) => Some(value),
            Checked::Invalid(_) => None,
        }
    }

    /// Wrap a list whose entries are all well-formed
    pub fn list(entries: Vec<T>) -> Checked<Vec<Checked<T>>> {
        Checked::Valid(entries.into_iter().map(Checked::Valid).collect())
    }
}

/// One entry of `items`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemInput {
    #[serde(default)]
    pub sku: Option<Scalar>,
    #[serde(default)]
    pub quantity: Option<Scalar>,
    #[serde(default)]
    pub unit_price: Option<Scalar>,
}

impl ItemInput {
    pub fn new(sku: &str, quantity: i64, unit_price: &str) -> Self {
        Self {
            sku: Some(sku.into()),
            quantity: Some(quantity.into()),
            unit_price: Some(unit_price.into()),
        }
    }
}

/// One entry of `discounts`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscountInput {
    /// `PERCENT` or `AMOUNT`, any case
    #[serde(rename = "type", default)]
    pub kind: Option<Scalar>,
    #[serde(default)]
    pub value: Option<Scalar>,
}

impl DiscountInput {
    pub fn new(kind: &str, value: &str) -> Self {
        Self {
            kind: Some(kind.into()),
            value: Some(value.into()),
        }
    }
}

/// The `shipping` object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingInput {
    /// `FLAT` or `PER_ITEM`, any case; defaults to `FLAT`
    #[serde(default)]
    pub mode: Option<Scalar>,
    #[serde(default)]
    pub rate: Option<Scalar>,
    #[serde(default)]
    pub free_over: Option<Scalar>,
}

/// The `tax` object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxInput {
    #[serde(default)]
    pub rate_percent: Option<Scalar>,
    #[serde(default)]
    pub apply_on_shipping: Option<Scalar>,
}

/// A complete cost request as it arrives on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub currency: Option<Scalar>,
    #[serde(default)]
    pub items: Option<Checked<Vec<Checked<ItemInput>>>>,
    #[serde(default)]
    pub discounts: Option<Checked<Vec<Checked<DiscountInput>>>>,
    #[serde(default)]
    pub shipping: Option<Checked<ShippingInput>>,
    #[serde(default)]
    pub tax: Option<Checked<TaxInput>>,
}

impl OrderRequest {
    /// Build a request from an already-parsed JSON value
    pub fn from_value(value: Value) -> CostResult<Self> {
        if !value.is_object() {
            return Err(CostError::validation(
                "body",
                "Request body must be a JSON object",
            ));
        }
        serde_json::from_value(value)
            .map_err(|e| CostError::validation("body", format!("Malformed request: {}", e)))
    }

    /// Parse a request from raw JSON bytes
    pub fn from_slice(bytes: &[u8]) -> CostResult<Self> {
        let value: Value = serde_json::from_slice(bytes).map_err(|e| {
            CostError::validation("body", format!("Request body is not valid JSON: {}", e))
        })?;
        Self::from_value(value)
    }

    /// Builder: start a request with line items
    pub fn with_items(items: Vec<ItemInput>) -> Self {
        Self {
            items: Some(Checked::list(items)),
            ..Default::default()
        }
    }

    /// Builder: set discounts
    pub fn discounts(mut self, discounts: Vec<DiscountInput>) -> Self {
        self.discounts = Some(Checked::list(discounts));
        self
    }

    /// Builder: set shipping
    pub fn shipping(mut self, shipping: ShippingInput) -> Self {
        self.shipping = Some(Checked::Valid(shipping));
        self
    }

    /// Builder: set tax
    pub fn tax(mut self, tax: TaxInput) -> Self {
        self.tax = Some(Checked::Valid(tax));
        self
    }
}
