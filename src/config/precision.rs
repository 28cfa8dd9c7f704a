use serde::Deserialize;

use crate::core::precision::{DEFAULT_AMOUNT_PRECISION, DEFAULT_RATE_PRECISION};
use crate::core::{AppError, PrecisionPolicy, Result};

/// Highest precision accepted from configuration
pub const MAX_PRECISION: u32 = 10;

/// Rounding configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PrecisionConfig {
    pub amount_precision: u32,
    pub rate_precision: u32,
}

impl PrecisionConfig {
    pub fn new(amount_precision: u32, rate_precision: u32) -> Self {
        Self {
            amount_precision,
            rate_precision,
        }
    }

    pub fn policy(&self) -> PrecisionPolicy {
        PrecisionPolicy::new(self.amount_precision, self.rate_precision)
    }

    pub fn validate(&self) -> Result<()> {
        if self.amount_precision > MAX_PRECISION || self.rate_precision > MAX_PRECISION {
            return Err(AppError::Configuration(format!(
                "Precision cannot exceed {} decimal places",
                MAX_PRECISION
            )));
        }

        if self.rate_precision < self.amount_precision {
            return Err(AppError::Configuration(
                "RATE_PRECISION must be at least AMOUNT_PRECISION".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for PrecisionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_AMOUNT_PRECISION, DEFAULT_RATE_PRECISION)
    }
}
