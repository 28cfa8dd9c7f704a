use rust_decimal::Decimal;

use crate::core::PrecisionPolicy;
use crate::modules::invoices::models::{DocumentSummary, LineItem, TaxGroup, TaxMode};

/// Builds the totals block of a document from its computed rows.
///
/// Rows still loading catalog data count as zero. Rows without tax still
/// count toward subtotal and grand total but never form a tax group.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxAggregator {
    policy: PrecisionPolicy,
}

impl TaxAggregator {
    pub fn new(policy: PrecisionPolicy) -> Self {
        Self { policy }
    }

    pub fn summarize(&self, rows: &[LineItem], mode: TaxMode) -> DocumentSummary {
        let mut subtotal = Decimal::ZERO;
        let mut discount_total = Decimal::ZERO;
        let mut grand_total = Decimal::ZERO;
        // (percentage, label, running tax, row count), in first-seen order
        let mut groups: Vec<(Decimal, String, Decimal, usize)> = Vec::new();

        for row in rows.iter().filter(|row| !row.is_loading) {
            let amounts = &row.amounts;

            // sums saturate at the decimal range instead of panicking
            subtotal = subtotal.saturating_add(match mode {
                TaxMode::Exclusive => amounts.item_total,
                TaxMode::Inclusive => amounts.item_total_tax_included,
            });
            discount_total = discount_total.saturating_add(amounts.discount_amount);
            grand_total = grand_total.saturating_add(amounts.item_total_tax_included);

            let percentage = row.tax_percentage();
            if percentage <= Decimal::ZERO {
                continue;
            }

            match groups.iter_mut().find(|(p, ..)| *p == percentage) {
                // first label wins when rows disagree
                Some((_, _, total, count)) => {
                    *total = total.saturating_add(amounts.tax_amount);
                    *count += 1;
                }
                None => groups.push((
                    percentage,
                    row.tax_label().unwrap_or_default().to_string(),
                    amounts.tax_amount,
                    1,
                )),
            }
        }

        let tax_groups: Vec<TaxGroup> = groups
            .into_iter()
            .map(|(tax_percentage, tax_label, total, line_count)| TaxGroup {
                tax_label,
                tax_percentage,
                tax_total: self.policy.round(total),
                line_count,
            })
            .collect();

        let tax_total = self.policy.round(
            tax_groups
                .iter()
                .fold(Decimal::ZERO, |sum, group| sum.saturating_add(group.tax_total)),
        );

        DocumentSummary {
            subtotal: self.policy.round(subtotal),
            discount_total: self.policy.round(discount_total),
            tax_groups,
            tax_total,
            grand_total: self.policy.round(grand_total),
        }
    }
}
