use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tax collected at one percentage across the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxGroup {
    /// Label of the first row seen with this percentage
    pub tax_label: String,
    pub tax_percentage: Decimal,
    pub tax_total: Decimal,
    /// Number of rows that contributed
    pub line_count: usize,
}

/// Document-level totals shown under the line items.
///
/// `subtotal` follows the tax mode: net of tax in exclusive mode, tax
/// included in inclusive mode. `grand_total` is always the sum of the rows'
/// tax-included totals, so it does not depend on the mode. Only in exclusive
/// mode does `grand_total == subtotal + tax_total` hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub subtotal: Decimal,
    pub discount_total: Decimal,
    pub tax_groups: Vec<TaxGroup>,
    /// Sum of the group totals
    pub tax_total: Decimal,
    pub grand_total: Decimal,
}

impl DocumentSummary {
    pub fn tax_group(&self, tax_percentage: Decimal) -> Option<&TaxGroup> {
        self.tax_groups
            .iter()
            .find(|group| group.tax_percentage == tax_percentage)
    }

    pub fn has_tax(&self) -> bool {
        !self.tax_groups.is_empty()
    }
}
