//! Assembly of the outbound order tax response

use serde::{Deserialize, Serialize};

use crate::types::*;
use crate::utils::decimal::{format_amount, format_rate};

/// Tax figures for one order line, rendered to two decimals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTaxResponse {
    pub total_net_amount: String,
    pub total_gross_amount: String,
    /// Percentage, e.g. "23.00"
    pub tax_rate: String,
}

impl From<&UnitResult> for LineTaxResponse {
    fn from(result: &UnitResult) -> Self {
        Self {
            total_net_amount: format_amount(&result.net_amount),
            total_gross_amount: format_amount(&result.gross_amount),
            tax_rate: format_rate(&result.tax_rate),
        }
    }
}

/// Response body returned to the platform for an order tax webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTaxResponse {
    pub shipping_price_net_amount: String,
    pub shipping_price_gross_amount: String,
    /// Percentage, e.g. "23.00"
    pub shipping_tax_rate: String,
    /// One entry per input line, in input order
    pub lines: Vec<LineTaxResponse>,
}

impl OrderTaxResponse {
    /// Serialize the response as the JSON webhook body
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Build the response from full-precision results
///
/// This is the only place figures are rounded. Lines are emitted 1:1 in the
/// order given, with no merging even when two lines share a product.
pub fn assemble(shipping: &UnitResult, lines: &[UnitResult]) -> OrderTaxResponse {
    OrderTaxResponse {
        shipping_price_net_amount: format_amount(&shipping.net_amount),
        shipping_price_gross_amount: format_amount(&shipping.gross_amount),
        shipping_tax_rate: format_rate(&shipping.tax_rate),
        lines: lines.iter().map(LineTaxResponse::from).collect(),
    }
}
