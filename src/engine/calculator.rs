//! Main tax engine that coordinates allocation, resolution and assembly

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::TaxEngineConfig;
use crate::tax::allocation::{DiscountAllocation, DiscountAllocator};
use crate::tax::resolver::{resolve, PriceEntryBasis};
use crate::tax::response::{assemble, OrderTaxResponse};
use crate::traits::*;
use crate::types::*;

/// Full-precision results for one order, before any rounding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTaxBreakdown {
    /// How the discounts were spread, shipping first then lines
    pub allocation: DiscountAllocation,
    pub shipping: UnitResult,
    /// One result per input line, in input order
    pub lines: Vec<UnitResult>,
}

impl OrderTaxBreakdown {
    /// Round and render the breakdown as a response body
    pub fn to_response(&self) -> OrderTaxResponse {
        assemble(&self.shipping, &self.lines)
    }
}

/// Stateless order tax engine
///
/// Each call is independent: the engine holds configuration only and never
/// shares state between orders, so one instance can serve concurrent calls.
pub struct TaxEngine {
    config: TaxEngineConfig,
    allocator: DiscountAllocator,
    validator: Box<dyn OrderValidator>,
}

impl TaxEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: TaxEngineConfig) -> Self {
        Self::with_validator(config, Box::new(DefaultOrderValidator))
    }

    /// Create a new engine with a custom validator
    pub fn with_validator(config: TaxEngineConfig, validator: Box<dyn OrderValidator>) -> Self {
        Self {
            allocator: DiscountAllocator::new(config.negative_amount_policy),
            config,
            validator,
        }
    }

    /// Engine configuration
    pub fn config(&self) -> &TaxEngineConfig {
        &self.config
    }

    /// Compute the unrounded breakdown for an order
    pub fn breakdown(&self, context: &OrderTaxContext) -> TaxResult<OrderTaxBreakdown> {
        self.validator.validate_order(context)?;

        let allocation = self.allocator.allocate(context.units(), &context.discounts)?;
        let basis = PriceEntryBasis::from(context.prices_entered_with_tax);

        // allocation.units[0] is shipping; lines follow positionally
        let mut results = context
            .units()
            .zip(allocation.units.iter())
            .map(|(unit, allocated)| {
                resolve(
                    &unit.id,
                    &allocated.discounted_amount,
                    unit.tax_exempt,
                    &unit.effective_rate(),
                    basis,
                )
            });

        let shipping = results.next().ok_or_else(|| {
            TaxError::Validation("Order allocation produced no shipping unit".to_string())
        })?;
        let lines: Vec<UnitResult> = results.collect();

        debug!(
            lines = lines.len(),
            prices_entered_with_tax = context.prices_entered_with_tax,
            total_discount = %allocation.total_discount,
            "resolved order taxes"
        );

        Ok(OrderTaxBreakdown {
            allocation,
            shipping,
            lines,
        })
    }

    /// Compute the rendered response for an order
    pub fn calculate(&self, context: &OrderTaxContext) -> TaxResult<OrderTaxResponse> {
        Ok(self.breakdown(context)?.to_response())
    }
}

impl Default for TaxEngine {
    fn default() -> Self {
        Self::new(TaxEngineConfig::default())
    }
}
