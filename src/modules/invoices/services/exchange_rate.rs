use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::Result;
use crate::modules::invoices::models::{DocumentSummary, ExchangeRate, LineItem, TaxMode};
use crate::modules::invoices::services::{LineCalculator, TaxAggregator};

/// What a manual exchange-rate edit should do to the rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeRateUpdate {
    /// Re-derive every catalog row's rate from its base price
    AllRows,
    /// Store the new rate only; rows keep the rates the user typed
    RateOnly,
}

/// Result of an exchange-rate edit
#[derive(Debug, Clone, PartialEq)]
pub enum ExchangeRateOutcome {
    Recomputed {
        exchange_rate: ExchangeRate,
        lines: Vec<LineItem>,
        summary: DocumentSummary,
    },
    /// Nothing was recomputed; the caller only stores the rate
    RateOnly { exchange_rate: ExchangeRate },
}

impl ExchangeRateOutcome {
    pub fn exchange_rate(&self) -> ExchangeRate {
        match self {
            ExchangeRateOutcome::Recomputed { exchange_rate, .. } => *exchange_rate,
            ExchangeRateOutcome::RateOnly { exchange_rate } => *exchange_rate,
        }
    }
}

/// Converts catalog base prices into transaction-currency rates
#[derive(Debug, Clone, Copy, Default)]
pub struct ExchangeRateAdjuster {
    calculator: LineCalculator,
    aggregator: TaxAggregator,
}

impl ExchangeRateAdjuster {
    pub fn new(calculator: LineCalculator) -> Self {
        Self {
            calculator,
            aggregator: TaxAggregator::new(calculator.policy()),
        }
    }

    /// `rate_base / exchange_rate`, rounded to amount precision.
    /// A quotient beyond the decimal range derives a rate of 0.
    pub fn derive_rate(&self, rate_base: Decimal, exchange_rate: ExchangeRate) -> Decimal {
        let rate = exchange_rate.to_transaction(rate_base).unwrap_or_else(|| {
            warn!(%rate_base, %exchange_rate, "Derived rate out of range, using 0");
            Decimal::ZERO
        });
        self.calculator.policy().round(rate)
    }

    /// Re-derive one row's rate from its base price and recompute it
    pub fn rebase_row(&self, row: &mut LineItem, exchange_rate: ExchangeRate, mode: TaxMode) {
        row.rate = self.derive_rate(row.rate_base, exchange_rate);
        self.calculator.apply(row, mode);
    }

    /// Apply a manual exchange-rate edit.
    ///
    /// Fails only when `new_rate` is not positive. Under `AllRows`, rows
    /// without a catalog item have no base price and keep their rate, as do
    /// rows still loading.
    pub fn adjust(
        &self,
        rows: &[LineItem],
        new_rate: Decimal,
        update: ExchangeRateUpdate,
        mode: TaxMode,
    ) -> Result<ExchangeRateOutcome> {
        let exchange_rate = ExchangeRate::new(new_rate)?;

        if update == ExchangeRateUpdate::RateOnly {
            info!(%exchange_rate, "Exchange rate changed, rows left untouched");
            return Ok(ExchangeRateOutcome::RateOnly { exchange_rate });
        }

        let mut lines = rows.to_vec();
        for row in lines.iter_mut() {
            if row.is_loading || row.item.is_none() {
                debug!("Keeping rate of row without catalog base price");
                continue;
            }
            self.rebase_row(row, exchange_rate, mode);
        }

        let summary = self.aggregator.summarize(&lines, mode);
        info!(
            %exchange_rate,
            rows = lines.len(),
            grand_total = %summary.grand_total,
            "Exchange rate changed, rows re-derived"
        );

        Ok(ExchangeRateOutcome::Recomputed {
            exchange_rate,
            lines,
            summary,
        })
    }
}
