//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::tax::allocation::NegativeAmountPolicy;
use crate::types::*;

/// Settings for a [`TaxEngine`](crate::engine::TaxEngine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxEngineConfig {
    /// Handling of units whose discount share exceeds their raw amount
    pub negative_amount_policy: NegativeAmountPolicy,
    /// Identity given to the shipping unit when building from a webhook payload
    pub shipping_unit_id: String,
}

impl TaxEngineConfig {
    /// Load a configuration document; missing keys take their defaults
    pub fn from_json_str(json: &str) -> TaxResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| TaxError::Config(format!("Could not parse engine config: {}", err)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> TaxResult<()> {
        if self.shipping_unit_id.trim().is_empty() {
            return Err(TaxError::Config(
                "Shipping unit ID cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for TaxEngineConfig {
    fn default() -> Self {
        Self {
            negative_amount_policy: NegativeAmountPolicy::Allow,
            shipping_unit_id: SHIPPING_UNIT_ID.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = TaxEngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, TaxEngineConfig::default());
    }

    #[test]
    fn test_clamp_policy_from_json() {
        let config =
            TaxEngineConfig::from_json_str(r#"{"negative_amount_policy": "clamp_to_zero"}"#)
                .unwrap();

        assert_eq!(
            config.negative_amount_policy,
            NegativeAmountPolicy::ClampToZero
        );
        assert_eq!(config.shipping_unit_id, SHIPPING_UNIT_ID);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result = TaxEngineConfig::from_json_str(r#"{"negative_amount_policy": "round"}"#);
        assert!(matches!(result, Err(TaxError::Config(_))));
    }

    #[test]
    fn test_blank_shipping_id_rejected() {
        let result = TaxEngineConfig::from_json_str(r#"{"shipping_unit_id": " "}"#);
        assert!(matches!(result, Err(TaxError::Config(_))));
    }
}
