//! Traits for the engine's collaborators and extensibility

use bigdecimal::BigDecimal;

use crate::types::*;
use crate::utils::validation::{validate_discount, validate_unit};

/// What a rate resolver is asked about a single unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateQuery<'a> {
    /// Identity of the unit (line id or shipping sentinel)
    pub unit_id: &'a str,
    /// Shipping or line
    pub kind: UnitKind,
    /// Merchant tax class attached to the line, if any
    pub tax_class: Option<&'a str>,
}

/// Rate resolution collaborator
///
/// Decides which percentage applies to a taxed unit (jurisdiction, tax
/// class, product category). The engine only ever sees the resolved
/// fraction; exempt units are never passed to a resolver.
pub trait TaxRateResolver: Send + Sync {
    /// Resolve the rate for a unit as a fraction (0.23 for 23%)
    fn resolve_rate(&self, query: &RateQuery<'_>) -> TaxResult<BigDecimal>;
}

/// Trait for implementing custom order validation rules
pub trait OrderValidator: Send + Sync {
    /// Validate an order context before any arithmetic runs
    fn validate_order(&self, context: &OrderTaxContext) -> TaxResult<()>;
}

/// Default order validator rejecting negative prices, discounts and rates
pub struct DefaultOrderValidator;

impl OrderValidator for DefaultOrderValidator {
    fn validate_order(&self, context: &OrderTaxContext) -> TaxResult<()> {
        for unit in context.units() {
            validate_unit(unit)?;
        }

        for discount in &context.discounts {
            validate_discount(discount)?;
        }

        Ok(())
    }
}

/// Signature verification collaborator for inbound webhooks
///
/// Implementations own the merchant signing-key store; the crate keeps no
/// key material of its own.
pub trait SignatureVerifier: Send + Sync {
    /// Whether `signature` authenticates `payload` for the merchant at `domain`
    fn verify(&self, domain: &str, payload: &[u8], signature: &str) -> bool;
}

impl<F> SignatureVerifier for F
where
    F: Fn(&str, &[u8], &str) -> bool + Send + Sync,
{
    fn verify(&self, domain: &str, payload: &[u8], signature: &str) -> bool {
        self(domain, payload, signature)
    }
}
