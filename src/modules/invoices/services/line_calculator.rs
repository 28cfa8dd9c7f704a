use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::core::PrecisionPolicy;
use crate::modules::invoices::models::{LineAmounts, LineInput, LineItem, TaxMode};
use crate::modules::taxes::TaxCalculator;

/// Turns one row's inputs into its monetary amounts.
///
/// Discount always applies to the tax-exclusive price. In inclusive mode the
/// tax is backed out of `quantity × rate` first, so both modes agree on what
/// was discounted. Intermediate products stay unrounded; only the four
/// outputs are rounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineCalculator {
    policy: PrecisionPolicy,
    tax: TaxCalculator,
}

impl LineCalculator {
    pub fn new(policy: PrecisionPolicy) -> Self {
        Self {
            policy,
            tax: TaxCalculator::new(policy),
        }
    }

    pub fn policy(&self) -> PrecisionPolicy {
        self.policy
    }

    /// Compute a line's amounts.
    ///
    /// Never fails. A negative quantity or rate counts as 0; the discount is
    /// assumed to already be within 0 to 100. Inputs whose products exceed
    /// the decimal range yield zeroed amounts.
    pub fn compute(&self, input: &LineInput, mode: TaxMode) -> LineAmounts {
        match self.checked_compute(input, mode) {
            Some(amounts) => amounts,
            None => {
                warn!(
                    quantity = %input.quantity,
                    rate = %input.rate,
                    "Line amounts out of range, reporting zero"
                );
                self.zeroed()
            }
        }
    }

    fn checked_compute(&self, input: &LineInput, mode: TaxMode) -> Option<LineAmounts> {
        let quantity = non_negative(input.quantity);
        let rate = non_negative(input.rate);

        let published_price = quantity.checked_mul(rate)?;
        let multiplier = self.tax.multiplier(input.tax_percentage);
        let discount_fraction = input.discount_percentage.checked_div(Decimal::ONE_HUNDRED)?;

        let price_net_of_tax = match mode {
            TaxMode::Exclusive => published_price,
            TaxMode::Inclusive => self.tax.back_out_tax(published_price, multiplier)?,
        };

        let discount_amount = price_net_of_tax.checked_mul(discount_fraction)?;
        let item_total = price_net_of_tax.checked_sub(discount_amount)?;
        let tax_amount = self.tax.calculate_tax(item_total, multiplier)?;

        let item_total = self.policy.round(item_total);
        let tax_amount = self.policy.round(tax_amount);

        Some(LineAmounts {
            discount_amount: self.policy.round(discount_amount),
            tax_amount,
            item_total,
            // sum of rounded parts keeps item_total_tax_included == item_total + tax_amount
            item_total_tax_included: self.policy.round(item_total.checked_add(tax_amount)?),
        })
    }

    fn zeroed(&self) -> LineAmounts {
        let zero = self.policy.round(Decimal::ZERO);
        LineAmounts {
            discount_amount: zero,
            tax_amount: zero,
            item_total: zero,
            item_total_tax_included: zero,
        }
    }

    /// Recompute a row in place. Rows waiting on catalog data are skipped.
    pub fn apply(&self, row: &mut LineItem, mode: TaxMode) {
        if row.is_loading {
            debug!("Skipping recomputation of loading row");
            return;
        }

        row.amounts = self.compute(&row.input(), mode);
        debug!(
            quantity = %row.quantity,
            rate = %row.rate,
            item_total = %row.amounts.item_total,
            tax_amount = %row.amounts.tax_amount,
            "Recomputed line"
        );
    }

    /// Recompute every row from its stored inputs
    pub fn apply_all(&self, rows: &mut [LineItem], mode: TaxMode) {
        for row in rows.iter_mut() {
            self.apply(row, mode);
        }
    }
}

fn non_negative(value: Decimal) -> Decimal {
    if value.is_sign_negative() {
        Decimal::ZERO
    } else {
        value
    }
}
