//! Net/gross resolution for a single discounted unit

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Whether the merchant's entered prices already include tax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceEntryBasis {
    /// Entered prices are gross; net is derived by dividing out the rate
    TaxInclusive,
    /// Entered prices are net; gross is derived by adding the rate on top
    TaxExclusive,
}

impl PriceEntryBasis {
    /// Map the order's `prices_entered_with_tax` flag to a basis
    pub fn from_prices_entered_with_tax(prices_entered_with_tax: bool) -> Self {
        if prices_entered_with_tax {
            PriceEntryBasis::TaxInclusive
        } else {
            PriceEntryBasis::TaxExclusive
        }
    }
}

impl From<bool> for PriceEntryBasis {
    fn from(prices_entered_with_tax: bool) -> Self {
        Self::from_prices_entered_with_tax(prices_entered_with_tax)
    }
}

/// Net amount from a gross amount (reverse calculation)
pub fn net_from_gross(gross_amount: &BigDecimal, rate: &BigDecimal) -> BigDecimal {
    let divisor = BigDecimal::from(1) + rate;
    gross_amount / divisor
}

/// Gross amount from a net amount
pub fn gross_from_net(net_amount: &BigDecimal, rate: &BigDecimal) -> BigDecimal {
    net_amount * (BigDecimal::from(1) + rate)
}

/// Resolve the final net, gross and rate of one unit
///
/// `discounted_amount` is interpreted in the order's entry basis. Exempt
/// units and zero rates produce `net == gross` with a zero rate. The rate
/// must already be validated as non-negative.
pub fn resolve(
    unit_id: &str,
    discounted_amount: &BigDecimal,
    tax_exempt: bool,
    rate: &BigDecimal,
    basis: PriceEntryBasis,
) -> UnitResult {
    let zero = BigDecimal::from(0);

    if tax_exempt || *rate == zero {
        return UnitResult {
            id: unit_id.to_string(),
            net_amount: discounted_amount.clone(),
            gross_amount: discounted_amount.clone(),
            tax_rate: zero,
        };
    }

    let (net_amount, gross_amount) = match basis {
        PriceEntryBasis::TaxInclusive => (
            net_from_gross(discounted_amount, rate),
            discounted_amount.clone(),
        ),
        PriceEntryBasis::TaxExclusive => (
            discounted_amount.clone(),
            gross_from_net(discounted_amount, rate),
        ),
    };

    UnitResult {
        id: unit_id.to_string(),
        net_amount,
        gross_amount,
        tax_rate: rate.clone(),
    }
}
