//! Proportional allocation of order-level discounts across taxable units

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::*;
use crate::utils::decimal::prorate;

/// What to do when a unit's discount share exceeds its raw amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeAmountPolicy {
    /// Keep the negative discounted amount as computed
    #[default]
    Allow,
    /// Floor the discounted amount at zero
    ClampToZero,
}

/// Discount share assigned to one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocatedUnit {
    /// Identity of the unit
    pub id: String,
    /// Raw amount before allocation
    pub raw_amount: BigDecimal,
    /// Portion of the total discount carried by this unit
    pub discount_share: BigDecimal,
    /// Raw amount after its share is taken off, in the order's entry basis
    pub discounted_amount: BigDecimal,
}

/// Allocation result for a whole order, in the order units were given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountAllocation {
    /// Sum of every discount
    pub total_discount: BigDecimal,
    /// Sum of every unit's raw amount
    pub total_raw: BigDecimal,
    /// Per-unit shares, positionally matching the input units
    pub units: Vec<AllocatedUnit>,
}

impl DiscountAllocation {
    /// Discounted amount for the first unit with the given identity
    pub fn discounted_amount(&self, unit_id: &str) -> Option<&BigDecimal> {
        self.units
            .iter()
            .find(|unit| unit.id == unit_id)
            .map(|unit| &unit.discounted_amount)
    }

    /// Sum of all discounted amounts
    pub fn total_discounted(&self) -> BigDecimal {
        self.units.iter().map(|unit| &unit.discounted_amount).sum()
    }
}

/// Discount allocation engine
///
/// Every unit takes a share of the total discount weighted by its raw,
/// as-entered amount. Tax exemption plays no part here: exempt units are
/// discounted like any other and only skip tax later, in the resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountAllocator {
    policy: NegativeAmountPolicy,
}

impl DiscountAllocator {
    /// Create a new allocator
    pub fn new(policy: NegativeAmountPolicy) -> Self {
        Self { policy }
    }

    /// Allocate `discounts` over `units` (shipping and every line)
    pub fn allocate<'a, I>(
        &self,
        units: I,
        discounts: &[Discount],
    ) -> TaxResult<DiscountAllocation>
    where
        I: IntoIterator<Item = &'a TaxableUnit>,
    {
        let units: Vec<&TaxableUnit> = units.into_iter().collect();
        let zero = BigDecimal::from(0);

        let total_discount: BigDecimal = discounts.iter().map(|d| &d.amount).sum();
        let total_raw: BigDecimal = units.iter().map(|u| &u.raw_amount).sum();

        if total_raw == zero && total_discount != zero {
            return Err(TaxError::DivisionByZero { total_discount });
        }

        debug!(
            units = units.len(),
            discounts = discounts.len(),
            %total_raw,
            %total_discount,
            "allocating order discounts"
        );

        let allocated = units
            .iter()
            .map(|unit| {
                let discount_share = if total_discount == zero {
                    zero.clone()
                } else {
                    prorate(&total_discount, &unit.raw_amount, &total_raw)
                };
                let mut discounted_amount = &unit.raw_amount - &discount_share;

                if discounted_amount < zero {
                    match self.policy {
                        NegativeAmountPolicy::Allow => warn!(
                            unit_id = %unit.id,
                            %discounted_amount,
                            "discount share exceeds unit amount"
                        ),
                        NegativeAmountPolicy::ClampToZero => {
                            warn!(
                                unit_id = %unit.id,
                                %discounted_amount,
                                "clamping discounted amount to zero"
                            );
                            discounted_amount = zero.clone();
                        }
                    }
                }

                AllocatedUnit {
                    id: unit.id.clone(),
                    raw_amount: unit.raw_amount.clone(),
                    discount_share,
                    discounted_amount,
                }
            })
            .collect();

        Ok(DiscountAllocation {
            total_discount,
            total_raw,
            units: allocated,
        })
    }
}
