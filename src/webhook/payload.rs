//! Inbound tax webhook payload and its conversion into an order context

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::engine::TaxEngineConfig;
use crate::traits::{RateQuery, TaxRateResolver};
use crate::types::*;

/// Monetary amount as sent by the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneyPayload {
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: BigDecimal,
}

/// Read an amount from either a decimal string or a JSON number.
///
/// Floats are parsed from their shortest decimal text, so `0.30` stays
/// `0.3` instead of the nearest binary fraction.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de;

    struct AmountVisitor;

    impl<'de> de::Visitor<'de> for AmountVisitor {
        type Value = BigDecimal;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a decimal amount as a string or number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            BigDecimal::from_str(v.trim())
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(BigDecimal::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(BigDecimal::from(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            if !v.is_finite() {
                return Err(E::invalid_value(de::Unexpected::Float(v), &self));
            }
            BigDecimal::from_str(&v.to_string())
                .map_err(|_| E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}

/// One order line as sent by the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinePayload {
    pub id: String,
    /// Line total in the order's entry basis, before order-level discounts
    pub total_price: MoneyPayload,
    /// Missing means the line is taxed
    #[serde(default)]
    pub tax_exempt: bool,
    #[serde(default)]
    pub tax_class: Option<String>,
    /// Remaining fields (quantities, product refs), passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One order-level discount as sent by the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountPayload {
    pub amount: MoneyPayload,
}

/// Tax base of an order or checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBasePayload {
    pub prices_entered_with_tax: bool,
    #[serde(default)]
    pub currency: Option<String>,
    pub shipping_price: MoneyPayload,
    #[serde(default)]
    pub lines: Vec<LinePayload>,
    #[serde(default)]
    pub discounts: Vec<DiscountPayload>,
}

/// Body of a calculate-taxes webhook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateTaxesPayload {
    pub tax_base: TaxBasePayload,
}

impl CalculateTaxesPayload {
    /// Parse a raw webhook body
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

impl TaxBasePayload {
    /// Build an order context, asking `resolver` for the rate of every taxed unit
    pub fn into_context(
        self,
        resolver: &dyn TaxRateResolver,
        config: &TaxEngineConfig,
    ) -> TaxResult<OrderTaxContext> {
        let shipping_rate = resolver.resolve_rate(&RateQuery {
            unit_id: &config.shipping_unit_id,
            kind: UnitKind::Shipping,
            tax_class: None,
        })?;

        let mut shipping = TaxableUnit::shipping(self.shipping_price.amount, shipping_rate);
        shipping.id = config.shipping_unit_id.clone();

        let mut context = OrderTaxContext::new(self.prices_entered_with_tax, shipping);

        for line in self.lines {
            let unit = if line.tax_exempt {
                TaxableUnit::exempt_line(line.id, line.total_price.amount)
            } else {
                let rate = resolver.resolve_rate(&RateQuery {
                    unit_id: &line.id,
                    kind: UnitKind::Line,
                    tax_class: line.tax_class.as_deref(),
                })?;
                TaxableUnit::line(line.id, line.total_price.amount, rate)
            };
            context.add_line(unit.with_payload(line.extra));
        }

        for discount in self.discounts {
            context.add_discount(Discount::new(discount.amount.amount));
        }

        Ok(context)
    }
}
