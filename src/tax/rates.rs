//! Concrete tax rate resolvers

use bigdecimal::BigDecimal;
use std::collections::HashMap;

use crate::traits::{RateQuery, TaxRateResolver};
use crate::types::*;
use crate::utils::validation::validate_rate;

/// Resolver applying the same rate to every taxed unit
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRateResolver {
    rate: BigDecimal,
}

impl FlatRateResolver {
    /// Create a flat resolver, rejecting rates outside 0..=1
    pub fn new(rate: BigDecimal) -> TaxResult<Self> {
        validate_rate("Flat", &rate)?;
        Ok(Self { rate })
    }
}

impl TaxRateResolver for FlatRateResolver {
    fn resolve_rate(&self, _query: &RateQuery<'_>) -> TaxResult<BigDecimal> {
        Ok(self.rate.clone())
    }
}

/// Resolver keyed by the merchant's tax classes
#[derive(Debug, Clone)]
pub struct TaxClassRateResolver {
    /// Rate for lines with no tax class
    default_rate: BigDecimal,
    /// Rate for the shipping fee; falls back to the default rate
    shipping_rate: Option<BigDecimal>,
    /// Explicit rates per tax class
    class_rates: HashMap<String, BigDecimal>,
}

impl TaxClassRateResolver {
    /// Create a new resolver with a default rate for unclassified lines
    pub fn new(default_rate: BigDecimal) -> TaxResult<Self> {
        validate_rate("Default", &default_rate)?;
        Ok(Self {
            default_rate,
            shipping_rate: None,
            class_rates: HashMap::new(),
        })
    }

    /// Set the rate applied to shipping
    pub fn set_shipping_rate(&mut self, rate: BigDecimal) -> TaxResult<()> {
        validate_rate("Shipping", &rate)?;
        self.shipping_rate = Some(rate);
        Ok(())
    }

    /// Set the rate for a specific tax class
    pub fn set_class_rate(&mut self, tax_class: String, rate: BigDecimal) -> TaxResult<()> {
        validate_rate(&format!("Tax class '{}'", tax_class), &rate)?;
        self.class_rates.insert(tax_class, rate);
        Ok(())
    }
}

impl TaxRateResolver for TaxClassRateResolver {
    fn resolve_rate(&self, query: &RateQuery<'_>) -> TaxResult<BigDecimal> {
        match (query.kind, query.tax_class) {
            (UnitKind::Shipping, _) => Ok(self
                .shipping_rate
                .clone()
                .unwrap_or_else(|| self.default_rate.clone())),
            (UnitKind::Line, Some(tax_class)) => self
                .class_rates
                .get(tax_class)
                .cloned()
                .ok_or_else(|| {
                    TaxError::RateNotFound(format!(
                        "No rate for tax class '{}' on unit '{}'",
                        tax_class, query.unit_id
                    ))
                }),
            (UnitKind::Line, None) => Ok(self.default_rate.clone()),
        }
    }
}
