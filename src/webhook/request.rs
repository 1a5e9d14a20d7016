//! Transport boundary checks for inbound tax webhooks

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::TaxEngine;
use crate::tax::response::OrderTaxResponse;
use crate::traits::{SignatureVerifier, TaxRateResolver};
use crate::types::TaxError;
use crate::webhook::payload::CalculateTaxesPayload;

/// Events whose payload carries a tax base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxEvent {
    OrderCalculateTaxes,
    CheckoutCalculateTaxes,
}

impl TaxEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxEvent::OrderCalculateTaxes => "ORDER_CALCULATE_TAXES",
            TaxEvent::CheckoutCalculateTaxes => "CHECKOUT_CALCULATE_TAXES",
        }
    }
}

impl fmt::Display for TaxEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxEvent {
    type Err = WebhookError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ORDER_CALCULATE_TAXES" => Ok(TaxEvent::OrderCalculateTaxes),
            "CHECKOUT_CALCULATE_TAXES" => Ok(TaxEvent::CheckoutCalculateTaxes),
            _ => Err(WebhookError::MissingEventType),
        }
    }
}

/// Webhook-related errors
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Missing merchant domain")]
    MissingMerchantContext,
    #[error("Missing or unrecognised event type")]
    MissingEventType,
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] TaxError),
}

impl WebhookError {
    /// HTTP status the transport should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            WebhookError::MissingMerchantContext
            | WebhookError::MissingEventType
            | WebhookError::AuthenticationFailed(_)
            | WebhookError::InvalidPayload(_) => 400,
            WebhookError::Engine(TaxError::RateNotFound(_) | TaxError::Config(_)) => 500,
            WebhookError::Engine(_) => 400,
        }
    }
}

/// Inbound webhook as seen by the transport layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookRequest {
    /// Merchant domain header
    pub domain: Option<String>,
    /// Event discriminator header
    pub event: Option<String>,
    /// Detached signature header
    pub signature: Option<String>,
    /// Raw request body
    pub body: Vec<u8>,
}

impl WebhookRequest {
    /// Run the boundary checks in order and return the recognised event
    pub fn authorize(&self, verifier: &dyn SignatureVerifier) -> Result<TaxEvent, WebhookError> {
        let domain = present(&self.domain).ok_or_else(|| {
            warn!("rejecting webhook without merchant domain");
            WebhookError::MissingMerchantContext
        })?;

        let event = present(&self.event)
            .ok_or(WebhookError::MissingEventType)
            .and_then(TaxEvent::from_str)
            .inspect_err(|_| warn!(domain, "rejecting webhook without recognised event"))?;

        let signature = present(&self.signature).ok_or_else(|| {
            warn!(domain, %event, "rejecting unsigned webhook");
            WebhookError::AuthenticationFailed("missing signature".to_string())
        })?;

        if !verifier.verify(domain, &self.body, signature) {
            warn!(domain, %event, "rejecting webhook with invalid signature");
            return Err(WebhookError::AuthenticationFailed(
                "invalid signature".to_string(),
            ));
        }

        Ok(event)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Authorize, parse and compute a calculate-taxes webhook
pub fn handle_calculate_taxes(
    request: &WebhookRequest,
    verifier: &dyn SignatureVerifier,
    resolver: &dyn TaxRateResolver,
    engine: &TaxEngine,
) -> Result<OrderTaxResponse, WebhookError> {
    request.authorize(verifier)?;

    let payload = CalculateTaxesPayload::from_slice(&request.body)?;
    let context = payload.tax_base.into_context(resolver, engine.config())?;

    Ok(engine.calculate(&context)?)
}
