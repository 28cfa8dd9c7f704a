use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A tax rate as offered by the organization (e.g. "VAT" at 11%).
///
/// Rows carry a copy of the rate they were assigned; the label is cosmetic,
/// the percentage drives every calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRate {
    pub id: String,
    pub name: String,
    /// Percentage, 10 for 10%
    pub percentage: Decimal,
}

impl TaxRate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, percentage: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            percentage,
        }
    }

    /// Label shown on the summary row for this tax
    pub fn label(&self) -> &str {
        &self.name
    }
}

/// Tax rates available to the document's tax dropdown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRates {
    rates: Vec<TaxRate>,
}

impl TaxRates {
    pub fn new(rates: Vec<TaxRate>) -> Self {
        Self { rates }
    }

    pub fn find(&self, id: &str) -> Option<&TaxRate> {
        self.rates.iter().find(|rate| rate.id == id)
    }

    /// First rate with the given percentage
    pub fn find_by_percentage(&self, percentage: Decimal) -> Option<&TaxRate> {
        self.rates.iter().find(|rate| rate.percentage == percentage)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaxRate> {
        self.rates.iter()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
