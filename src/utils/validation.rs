//! Validation utilities

use crate::types::*;
use bigdecimal::BigDecimal;

/// Validate that an amount is zero or positive
pub fn validate_non_negative_amount(label: &str, amount: &BigDecimal) -> TaxResult<()> {
    if *amount < BigDecimal::from(0) {
        Err(TaxError::InvalidAmount(format!(
            "{} cannot be negative: {}",
            label, amount
        )))
    } else {
        Ok(())
    }
}

/// Validate that a tax rate is a fraction between 0 and 1
pub fn validate_rate(label: &str, rate: &BigDecimal) -> TaxResult<()> {
    if *rate < BigDecimal::from(0) {
        return Err(TaxError::InvalidRate(format!(
            "{} rate cannot be negative: {}",
            label, rate
        )));
    }

    if *rate > BigDecimal::from(1) {
        return Err(TaxError::InvalidRate(format!(
            "{} rate must be a fraction no greater than 1: {}",
            label, rate
        )));
    }

    Ok(())
}

/// Validate that a unit identity is usable
pub fn validate_unit_id(unit_id: &str) -> TaxResult<()> {
    if unit_id.trim().is_empty() {
        return Err(TaxError::Validation(
            "Unit ID cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validate a single taxable unit
pub fn validate_unit(unit: &TaxableUnit) -> TaxResult<()> {
    validate_unit_id(&unit.id)?;
    validate_non_negative_amount(&format!("Amount of '{}'", unit.id), &unit.raw_amount)?;

    // Exempt units ignore their rate entirely
    if !unit.tax_exempt {
        validate_rate(&format!("Unit '{}'", unit.id), &unit.rate)?;
    }

    Ok(())
}

/// Validate a discount amount
pub fn validate_discount(discount: &Discount) -> TaxResult<()> {
    validate_non_negative_amount("Discount amount", &discount.amount)
}
