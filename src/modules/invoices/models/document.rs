use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{AppError, Result};

/// Whether the document sells (invoice) or buys (bill)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Rows take the catalog's selling price and sales account
    #[default]
    Sales,
    /// Rows take the catalog's purchase price and purchase account
    Purchase,
}

/// How entered rates relate to tax
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxMode {
    /// Tax is added on top of the entered rate
    #[default]
    Exclusive,
    /// The entered rate already contains tax
    Inclusive,
}

impl TaxMode {
    pub fn from_inclusive(is_inclusive_tax: bool) -> Self {
        if is_inclusive_tax {
            TaxMode::Inclusive
        } else {
            TaxMode::Exclusive
        }
    }

    pub fn is_inclusive(&self) -> bool {
        matches!(self, TaxMode::Inclusive)
    }
}

impl fmt::Display for TaxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxMode::Exclusive => write!(f, "exclusive"),
            TaxMode::Inclusive => write!(f, "inclusive"),
        }
    }
}

/// Base-currency units per transaction-currency unit.
///
/// `rate = rate_base / exchange_rate`. Always strictly positive; 1 on
/// single-currency documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    pub const ONE: ExchangeRate = ExchangeRate(Decimal::ONE);

    pub fn new(value: Decimal) -> Result<Self> {
        if value <= Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Exchange rate must be positive, got: {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Converts a base-currency amount into the transaction currency,
    /// `None` when the quotient is out of range
    pub fn to_transaction(&self, base_amount: Decimal) -> Option<Decimal> {
        base_amount.checked_div(self.0)
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<Decimal> for ExchangeRate {
    type Error = AppError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ExchangeRate> for Decimal {
    fn from(rate: ExchangeRate) -> Self {
        rate.0
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
