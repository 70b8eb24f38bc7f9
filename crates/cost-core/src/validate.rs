//! # Validation
//!
//! Single parse-and-validate step from [`OrderRequest`] to [`Order`].
//!
//! Checks run in request order (currency, items, discounts, shipping, tax)
//! and the first failure wins.

use crate::discount::Discount;
use crate::error::{CostError, CostResult};
use crate::money::{Money, MoneyContext};
use crate::order::{LineItem, Order, DEFAULT_CURRENCY};
use crate::request::{Checked, DiscountInput, ItemInput, OrderRequest, Scalar};
use crate::shipping::ShippingPolicy;
use crate::tax::TaxPolicy;
use rust_decimal::prelude::ToPrimitive;

/// Turns wire requests into canonical orders
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    ctx: MoneyContext,
}

impl Validator {
    pub fn new(ctx: MoneyContext) -> Self {
        Self { ctx }
    }

    /// Validate a whole request
    pub fn validate(&self, request: &OrderRequest) -> CostResult<Order> {
        let currency = match &request.currency {
            None => DEFAULT_CURRENCY.to_string(),
            Some(Scalar::Text(code)) => code.to_uppercase(),
            Some(_) => {
                return Err(CostError::validation(
                    "currency",
                    "'currency' must be a string",
                ))
            }
        };

        let items = self.validate_items(request.items.as_ref())?;
        let discounts = self.validate_discounts(request.discounts.as_ref())?;

        let shipping = match &request.shipping {
            None => None,
            Some(Checked::Valid(input)) => Some(ShippingPolicy::from_input(input, &self.ctx)?),
            Some(Checked::Invalid(_)) => {
                return Err(CostError::validation(
                    "shipping",
                    "'shipping' must be an object",
                ))
            }
        };

        let tax = match &request.tax {
            None => None,
            Some(Checked::Valid(input)) => Some(TaxPolicy::from_input(input)?),
            Some(Checked::Invalid(_)) => {
                return Err(CostError::validation("tax", "'tax' must be an object"))
            }
        };

        Ok(Order {
            currency,
            items,
            discounts,
            shipping,
            tax,
        })
    }

    /// Validate the `items` list; it must be present and non-empty
    pub fn validate_items(
        &self,
        items: Option<&Checked<Vec<Checked<ItemInput>>>>,
    ) -> CostResult<Vec<LineItem>> {
        let items = match items.and_then(Checked::valid) {
            Some(items) if !items.is_empty() => items,
            _ => {
                return Err(CostError::validation(
                    "items",
                    "'items' must be a non-empty list",
                ))
            }
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Checked::Valid(item) => self.validate_item(index, item),
                Checked::Invalid(_) => Err(CostError::validation(
                    "items",
                    format!("Item at index {} must be an object", index),
                )),
            })
            .collect()
    }

    /// Validate the optional `discounts` list
    pub fn validate_discounts(
        &self,
        discounts: Option<&Checked<Vec<Checked<DiscountInput>>>>,
    ) -> CostResult<Vec<Discount>> {
        let entries = match discounts {
            None => return Ok(Vec::new()),
            Some(Checked::Valid(entries)) => entries,
            Some(Checked::Invalid(_)) => {
                return Err(CostError::validation(
                    "discounts",
                    "'discounts' must be a list",
                ))
            }
        };

        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| match entry {
                Checked::Valid(input) => Discount::from_input(input, &self.ctx),
                Checked::Invalid(_) => Err(CostError::validation(
                    "discounts",
                    format!("Discount at index {} must be an object", index),
                )),
            })
            .collect()
    }

    /// Validate one line item
    pub fn validate_item(&self, index: usize, item: &ItemInput) -> CostResult<LineItem> {
        let sku = match &item.sku {
            Some(Scalar::Text(sku)) if !sku.trim().is_empty() => sku.trim().to_string(),
            _ => {
                return Err(CostError::validation(
                    "sku",
                    format!("Item at index {} missing valid 'sku'", index),
                ))
            }
        };

        let quantity = parse_quantity(&sku, item.quantity.as_ref())?;
        let unit_price = self.parse_unit_price(&sku, item.unit_price.as_ref())?;

        Ok(LineItem {
            sku,
            quantity,
            unit_price,
        })
    }

    fn parse_unit_price(&self, sku: &str, raw: Option<&Scalar>) -> CostResult<Money> {
        let raw = raw.ok_or_else(|| CostError::item(sku, "unit_price", "is required"))?;
        let price = raw.to_decimal().map_err(|_| {
            CostError::item(
                sku,
                "unit_price",
                format!("is not a valid number: '{}'", raw.literal()),
            )
        })?;
        if price.is_sign_negative() && !price.is_zero() {
            return Err(CostError::item(sku, "unit_price", "must be >= 0"));
        }
        self.ctx
            .round(price)
            .map_err(|_| CostError::item(sku, "unit_price", "is out of range"))
    }
}

/// Quantity must be a whole, non-negative number. JSON numbers may carry a
/// zero fraction (`3.0`); strings must hold an integer.
fn parse_quantity(sku: &str, raw: Option<&Scalar>) -> CostResult<u64> {
    let not_integer = || CostError::item(sku, "quantity", "must be an integer");

    let quantity: i128 = match raw {
        Some(Scalar::Number(n)) => {
            let value = Scalar::Number(n.clone())
                .to_decimal()
                .map_err(|_| not_integer())?;
            if !value.fract().is_zero() {
                return Err(not_integer());
            }
            value.to_i128().ok_or_else(not_integer)?
        }
        Some(Scalar::Text(s)) => s.trim().parse::<i128>().map_err(|_| not_integer())?,
        _ => return Err(not_integer()),
    };

    if quantity < 0 {
        return Err(CostError::item(sku, "quantity", "must be >= 0"));
    }
    u64::try_from(quantity).map_err(|_| CostError::item(sku, "quantity", "is too large"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ShippingInput, TaxInput};
    use serde_json::json;

    fn request(value: serde_json::Value) -> OrderRequest {
        OrderRequest::from_value(value).unwrap()
    }

    fn validate(value: serde_json::Value) -> CostResult<Order> {
        Validator::default().validate(&request(value))
    }

    #[test]
    fn test_valid_order() {
        let order = validate(json!({
            "currency": "eur",
            "items": [
                {"sku": "  LAP-001 ", "quantity": 1, "unit_price": 999.99},
                {"sku": "MOU-001", "quantity": "2", "unit_price": "29.99"}
            ]
        }))
        .unwrap();

        assert_eq!(order.currency, "EUR");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].sku, "LAP-001");
        assert_eq!(order.items[1].quantity, 2);
        assert_eq!(order.items[1].unit_price.to_string(), "29.99");
        assert!(order.discounts.is_empty());
        assert!(order.shipping.is_none());
        assert!(order.tax.is_none());
    }

    #[test]
    fn test_currency_defaults_to_usd() {
        let order = validate(json!({"items": [{"sku": "A", "quantity": 1, "unit_price": 1}]}))
            .unwrap();
        assert_eq!(order.currency, "USD");
    }

    #[test]
    fn test_unit_price_is_rounded() {
        let order = validate(json!({"items": [{"sku": "A", "quantity": 1, "unit_price": "10.005"}]}))
            .unwrap();
        assert_eq!(order.items[0].unit_price.to_string(), "10.01");
    }

    #[test]
    fn test_items_must_be_non_empty() {
        let err = validate(json!({"items": []})).unwrap_err();
        assert_eq!(err.to_string(), "'items' must be a non-empty list");
        assert_eq!(err.field(), Some("items"));

        let err = validate(json!({})).unwrap_err();
        assert_eq!(err.field(), Some("items"));
    }

    #[test]
    fn test_sku_must_be_non_empty_string() {
        let err = validate(json!({"items": [{"sku": "   ", "quantity": 1, "unit_price": 1}]}))
            .unwrap_err();
        assert_eq!(err.to_string(), "Item at index 0 missing valid 'sku'");

        let err = validate(json!({"items": [
            {"sku": "A", "quantity": 1, "unit_price": 1},
            {"sku": 42, "quantity": 1, "unit_price": 1}
        ]}))
        .unwrap_err();
        assert_eq!(err.to_string(), "Item at index 1 missing valid 'sku'");
    }

    #[test]
    fn test_negative_quantity() {
        let err = validate(json!({"items": [{"sku": "A", "quantity": -1, "unit_price": 1}]}))
            .unwrap_err();
        assert_eq!(err.to_string(), "Item 'A': 'quantity' must be >= 0");
    }

    #[test]
    fn test_quantity_must_be_integer() {
        for bad in [json!(1.5), json!("two"), json!(true), json!(null), json!("1.5")] {
            let err = validate(json!({"items": [{"sku": "A", "quantity": bad, "unit_price": 1}]}))
                .unwrap_err();
            assert_eq!(err.to_string(), "Item 'A': 'quantity' must be an integer");
        }

        let order = validate(json!({"items": [{"sku": "A", "quantity": 3.0, "unit_price": 1}]}))
            .unwrap();
        assert_eq!(order.items[0].quantity, 3);
    }

    #[test]
    fn test_negative_or_bad_unit_price() {
        let err = validate(json!({"items": [{"sku": "A", "quantity": 1, "unit_price": -0.01}]}))
            .unwrap_err();
        assert_eq!(err.to_string(), "Item 'A': 'unit_price' must be >= 0");

        let err = validate(json!({"items": [{"sku": "A", "quantity": 1, "unit_price": "abc"}]}))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Item 'A': 'unit_price' is not a valid number: 'abc'"
        );

        let err = validate(json!({"items": [{"sku": "A", "quantity": 1}]})).unwrap_err();
        assert_eq!(err.to_string(), "Item 'A': 'unit_price' is required");
    }

    #[test]
    fn test_first_failure_wins() {
        // quantity is checked before unit_price
        let err = validate(json!({"items": [{"sku": "A", "quantity": -1, "unit_price": -1}]}))
            .unwrap_err();
        assert_eq!(err.field(), Some("quantity"));

        // items are checked before discounts
        let err = validate(json!({
            "items": [],
            "discounts": [{"type": "BOGUS", "value": 1}]
        }))
        .unwrap_err();
        assert_eq!(err.field(), Some("items"));
    }

    #[test]
    fn test_policies_are_parsed() {
        let req = OrderRequest::with_items(vec![ItemInput::new("A", 1, "10.00")])
            .discounts(vec![DiscountInput::new("PERCENT", "10")])
            .shipping(ShippingInput {
                mode: Some("PER_ITEM".into()),
                rate: Some("2".into()),
                free_over: None,
            })
            .tax(TaxInput {
                rate_percent: Some("8".into()),
                apply_on_shipping: Some(true.into()),
            });
        let order = Validator::default().validate(&req).unwrap();

        assert_eq!(order.discounts.len(), 1);
        assert!(order.shipping.is_some());
        assert!(order.tax.unwrap().apply_on_shipping);
    }

    #[test]
    fn test_misshapen_containers_name_the_field() {
        let cases = [
            (json!({"items": "abc"}), "items", "'items' must be a non-empty list"),
            (json!({"items": {"sku": "A"}}), "items", "'items' must be a non-empty list"),
            (
                json!({"items": [{"sku": "A", "quantity": 1, "unit_price": 1}, 5]}),
                "items",
                "Item at index 1 must be an object",
            ),
            (
                json!({"items": [["A", 1, 1]]}),
                "items",
                "Item at index 0 must be an object",
            ),
            (
                json!({"items": [{"sku": "A", "quantity": 1, "unit_price": 1}], "discounts": {}}),
                "discounts",
                "'discounts' must be a list",
            ),
            (
                json!({"items": [{"sku": "A", "quantity": 1, "unit_price": 1}], "discounts": ["PERCENT"]}),
                "discounts",
                "Discount at index 0 must be an object",
            ),
            (
                json!({"items": [{"sku": "A", "quantity": 1, "unit_price": 1}], "shipping": "FLAT"}),
                "shipping",
                "'shipping' must be an object",
            ),
            (
                json!({"items": [{"sku": "A", "quantity": 1, "unit_price": 1}], "tax": 8}),
                "tax",
                "'tax' must be an object",
            ),
            (
                json!({"currency": 840, "items": [{"sku": "A", "quantity": 1, "unit_price": 1}]}),
                "currency",
                "'currency' must be a string",
            ),
        ];

        for (body, field, message) in cases {
            let err = validate(body).unwrap_err();
            assert!(err.is_validation());
            assert_eq!(err.field(), Some(field));
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn test_misshapen_item_fields_name_the_field() {
        let err = validate(json!({"items": [{"sku": "A", "quantity": [1], "unit_price": 1}]}))
            .unwrap_err();
        assert_eq!(err.to_string(), "Item 'A': 'quantity' must be an integer");

        let err = validate(json!({"items": [{"sku": "A", "quantity": 1, "unit_price": {"usd": 1}}]}))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Item 'A': 'unit_price' is not a valid number: '{\"usd\":1}'"
        );

        let err = validate(json!({"items": [{"sku": ["A"], "quantity": 1, "unit_price": 1}]}))
            .unwrap_err();
        assert_eq!(err.to_string(), "Item at index 0 missing valid 'sku'");
    }

    #[test]
    fn test_unit_price_out_of_range() {
        let err = validate(json!({"items": [{"sku": "A", "quantity": 1, "unit_price": "1e27"}]}))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Item 'A': 'unit_price' is out of range");
    }

    #[test]
    fn test_unknown_discount_type_fails_validation() {
        let err = validate(json!({
            "items": [{"sku": "A", "quantity": 1, "unit_price": 1}],
            "discounts": [{"type": "BOGO", "value": 1}]
        }))
        .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.status_code(), 400);
    }
}
