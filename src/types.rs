//! Core types and data structures for order tax computation

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity used for the shipping unit when no other sentinel is configured
pub const SHIPPING_UNIT_ID: &str = "shipping";

/// Kinds of taxable units in an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// The order's shipping fee
    Shipping,
    /// A single order line
    Line,
}

/// One shipping fee or one order line, the atomic object that receives a
/// discount share and a tax computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxableUnit {
    /// Stable identity (line id, or the shipping sentinel)
    pub id: String,
    /// Whether this is shipping or a line
    pub kind: UnitKind,
    /// Price as entered by the merchant, in the order's price-entry basis
    pub raw_amount: BigDecimal,
    /// When set the unit carries no tax, but still takes its discount share
    pub tax_exempt: bool,
    /// Resolved tax rate as a fraction (0.23 for 23%), ignored when exempt
    pub rate: BigDecimal,
    /// Opaque line data (quantities, product refs) carried through unchanged
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub payload: Map<String, Value>,
}

impl TaxableUnit {
    /// Create a taxed order line
    pub fn line(id: impl Into<String>, raw_amount: BigDecimal, rate: BigDecimal) -> Self {
        Self {
            id: id.into(),
            kind: UnitKind::Line,
            raw_amount,
            tax_exempt: false,
            rate,
            payload: Map::new(),
        }
    }

    /// Create a tax-exempt order line
    pub fn exempt_line(id: impl Into<String>, raw_amount: BigDecimal) -> Self {
        Self {
            tax_exempt: true,
            ..Self::line(id, raw_amount, BigDecimal::from(0))
        }
    }

    /// Create the shipping unit under the default sentinel identity
    pub fn shipping(raw_amount: BigDecimal, rate: BigDecimal) -> Self {
        Self {
            id: SHIPPING_UNIT_ID.to_string(),
            kind: UnitKind::Shipping,
            raw_amount,
            tax_exempt: false,
            rate,
            payload: Map::new(),
        }
    }

    /// Attach opaque pass-through data to this unit
    pub fn with_payload(mut self, payload: Map<String, Value>) -> Self {
        self.payload = payload;
        self
    }

    /// Rate that actually applies: zero for exempt units
    pub fn effective_rate(&self) -> BigDecimal {
        if self.tax_exempt {
            BigDecimal::from(0)
        } else {
            self.rate.clone()
        }
    }
}

/// An order-level discount (voucher) not already baked into line prices.
/// Discounts have no target; they apply against the order as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub amount: BigDecimal,
}

impl Discount {
    pub fn new(amount: BigDecimal) -> Self {
        Self { amount }
    }
}

/// Everything the engine needs to compute one order's taxes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTaxContext {
    /// True when entered prices already include tax (gross basis)
    pub prices_entered_with_tax: bool,
    /// The shipping unit
    pub shipping: TaxableUnit,
    /// Order lines, in input order
    pub lines: Vec<TaxableUnit>,
    /// Order-level discounts
    pub discounts: Vec<Discount>,
}

impl OrderTaxContext {
    /// Create a context with no lines and no discounts
    pub fn new(prices_entered_with_tax: bool, shipping: TaxableUnit) -> Self {
        Self {
            prices_entered_with_tax,
            shipping,
            lines: Vec::new(),
            discounts: Vec::new(),
        }
    }

    /// Append an order line
    pub fn add_line(&mut self, line: TaxableUnit) {
        self.lines.push(line);
    }

    /// Append an order-level discount
    pub fn add_discount(&mut self, discount: Discount) {
        self.discounts.push(discount);
    }

    /// Every unit taking part in discount allocation: shipping first, then
    /// lines in input order
    pub fn units(&self) -> impl Iterator<Item = &TaxableUnit> {
        std::iter::once(&self.shipping).chain(self.lines.iter())
    }

    /// Sum of all discount amounts
    pub fn total_discount(&self) -> BigDecimal {
        self.discounts.iter().map(|d| &d.amount).sum()
    }
}

/// Final, full-precision tax figures for one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitResult {
    /// Identity of the unit this result belongs to
    pub id: String,
    pub net_amount: BigDecimal,
    pub gross_amount: BigDecimal,
    /// Applied rate as a fraction; zero when exempt
    pub tax_rate: BigDecimal,
}

impl UnitResult {
    /// Tax carried by this unit (gross minus net)
    pub fn tax_amount(&self) -> BigDecimal {
        &self.gross_amount - &self.net_amount
    }
}

/// Errors that can occur while computing order taxes
#[derive(Debug, thiserror::Error)]
pub enum TaxError {
    #[error("Cannot prorate discount of {total_discount} against a zero raw total")]
    DivisionByZero { total_discount: BigDecimal },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid tax rate: {0}")]
    InvalidRate(String),
    #[error("Tax rate not found: {0}")]
    RateNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for tax operations
pub type TaxResult<T> = Result<T, TaxError>;
