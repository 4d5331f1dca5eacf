//! Fee computation defaults

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::fees::ComputeOptions;

/// Fee settings applied when a request does not say otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct FeeSettings {
    /// Billing currency. Amounts are whole units of it.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Double a paid committee meeting's fee when both seats attended
    #[serde(default)]
    pub charge_per_ar: bool,
}

impl FeeSettings {
    /// Options used when a computation request carries none.
    pub fn default_options(&self) -> ComputeOptions {
        ComputeOptions {
            charge_per_ar: self.charge_per_ar,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let currency = self.currency.trim();
        if currency.is_empty() {
            return Err(ValidationError::MissingRequired("fees.currency"));
        }
        if !currency.eq_ignore_ascii_case("INR") {
            return Err(ValidationError::UnsupportedCurrency(currency.to_string()));
        }
        Ok(())
    }
}

impl Default for FeeSettings {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            charge_per_ar: false,
        }
    }
}

fn default_currency() -> String {
    "INR".to_string()
}
