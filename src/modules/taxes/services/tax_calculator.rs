use rust_decimal::Decimal;

use crate::core::{AppError, PrecisionPolicy, Result};

/// Tax arithmetic for a single line.
///
/// Works on unrounded values; callers round the final amounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxCalculator {
    policy: PrecisionPolicy,
}

impl TaxCalculator {
    pub fn new(policy: PrecisionPolicy) -> Self {
        Self { policy }
    }

    /// Decimal multiplier for a tax percentage (10 -> 0.1)
    pub fn multiplier(&self, tax_percentage: Decimal) -> Decimal {
        self.policy.percentage_to_decimal(tax_percentage)
    }

    /// tax_amount = net × multiplier, `None` when the product overflows
    pub fn calculate_tax(&self, net: Decimal, multiplier: Decimal) -> Option<Decimal> {
        net.checked_mul(multiplier)
    }

    /// Strips tax out of a tax-inclusive price: gross / (1 + multiplier)
    pub fn back_out_tax(&self, gross: Decimal, multiplier: Decimal) -> Option<Decimal> {
        let divisor = Decimal::ONE.checked_add(multiplier)?;
        if divisor <= Decimal::ZERO {
            return Some(Decimal::ZERO);
        }
        gross.checked_div(divisor)
    }

    /// Validate a tax percentage: 0 to 100 with at most 4 decimal places
    pub fn validate_percentage(&self, tax_percentage: Decimal) -> Result<()> {
        if tax_percentage < Decimal::ZERO {
            return Err(AppError::validation("Tax percentage cannot be negative"));
        }

        if tax_percentage > Decimal::ONE_HUNDRED {
            return Err(AppError::validation("Tax percentage cannot exceed 100"));
        }

        if tax_percentage.normalize().scale() > 4 {
            return Err(AppError::validation(
                "Tax percentage cannot have more than 4 decimal places",
            ));
        }

        Ok(())
    }
}
