//! Builder for order tax contexts

use bigdecimal::BigDecimal;

use crate::traits::{DefaultOrderValidator, OrderValidator};
use crate::types::*;

/// Builder for creating order tax contexts
pub struct OrderBuilder {
    context: OrderTaxContext,
}

impl OrderBuilder {
    /// Start an order with free, untaxed shipping
    pub fn new(prices_entered_with_tax: bool) -> Self {
        Self {
            context: OrderTaxContext::new(
                prices_entered_with_tax,
                TaxableUnit::shipping(BigDecimal::from(0), BigDecimal::from(0)),
            ),
        }
    }

    /// Set the shipping price and its resolved rate
    pub fn shipping(mut self, raw_amount: BigDecimal, rate: BigDecimal) -> Self {
        self.context.shipping.raw_amount = raw_amount;
        self.context.shipping.rate = rate;
        self
    }

    /// Add a taxed line
    pub fn line(mut self, id: &str, raw_amount: BigDecimal, rate: BigDecimal) -> Self {
        self.context
            .add_line(TaxableUnit::line(id, raw_amount, rate));
        self
    }

    /// Add a tax-exempt line
    pub fn exempt_line(mut self, id: &str, raw_amount: BigDecimal) -> Self {
        self.context
            .add_line(TaxableUnit::exempt_line(id, raw_amount));
        self
    }

    /// Add a prepared unit as a line
    pub fn unit(mut self, unit: TaxableUnit) -> Self {
        self.context.add_line(unit);
        self
    }

    /// Add an order-level discount
    pub fn discount(mut self, amount: BigDecimal) -> Self {
        self.context.add_discount(Discount::new(amount));
        self
    }

    /// Build the context
    pub fn build(self) -> TaxResult<OrderTaxContext> {
        DefaultOrderValidator.validate_order(&self.context)?;
        Ok(self.context)
    }
}
