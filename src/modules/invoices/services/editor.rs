use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::core::traits::CatalogLookup;
use crate::core::{PrecisionPolicy, Result};
use crate::modules::invoices::models::{
    DocumentKind, DocumentSummary, ExchangeRate, LineItem, TaxMode,
};
use crate::modules::invoices::services::{
    clamp_discount, ExchangeRateOutcome, ExchangeRateUpdate, LineCalculator, LineField,
    RowOperations, TaxAggregator,
};
use crate::modules::items::{CatalogItem, ItemReference};
use crate::modules::taxes::TaxRate;

/// Rows and totals handed back to the page after every edit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorSnapshot {
    pub lines: Vec<LineItem>,
    pub summary: DocumentSummary,
}

/// Line-item state of one document being edited.
///
/// Each edit intent is a method that applies the row operation and returns
/// the rows with freshly aggregated totals. The document always keeps at
/// least one row.
#[derive(Debug, Clone)]
pub struct InvoiceEditor {
    kind: DocumentKind,
    tax_mode: TaxMode,
    exchange_rate: ExchangeRate,
    lines: Vec<LineItem>,
    operations: RowOperations,
    aggregator: TaxAggregator,
}

impl InvoiceEditor {
    /// A new document with a single blank row
    pub fn new(kind: DocumentKind, policy: PrecisionPolicy) -> Self {
        Self::load(kind, TaxMode::Exclusive, ExchangeRate::ONE, Vec::new(), policy)
    }

    /// Open an existing document; every row is recomputed from its inputs
    /// after out-of-range discounts are reset to 0
    pub fn load(
        kind: DocumentKind,
        tax_mode: TaxMode,
        exchange_rate: ExchangeRate,
        mut lines: Vec<LineItem>,
        policy: PrecisionPolicy,
    ) -> Self {
        if lines.is_empty() {
            lines.push(LineItem::blank());
        }

        for row in lines.iter_mut() {
            let clamped = clamp_discount(row.discount_percentage);
            if clamped != row.discount_percentage {
                warn!(discount = %row.discount_percentage, "Loaded discount outside 0-100, stored as 0");
                row.discount_percentage = clamped;
            }
        }

        let calculator = LineCalculator::new(policy);
        calculator.apply_all(&mut lines, tax_mode);

        Self {
            kind,
            tax_mode,
            exchange_rate,
            lines,
            operations: RowOperations::new(calculator),
            aggregator: TaxAggregator::new(policy),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn tax_mode(&self) -> TaxMode {
        self.tax_mode
    }

    pub fn exchange_rate(&self) -> ExchangeRate {
        self.exchange_rate
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn summary(&self) -> DocumentSummary {
        self.aggregator.summarize(&self.lines, self.tax_mode)
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            lines: self.lines.clone(),
            summary: self.summary(),
        }
    }

    pub fn insert_row(&mut self, index: usize) -> EditorSnapshot {
        self.lines = self.operations.insert_at(&self.lines, index, None);
        self.snapshot()
    }

    pub fn remove_row(&mut self, index: usize) -> EditorSnapshot {
        self.lines = self.operations.remove_at(&self.lines, index);
        self.snapshot()
    }

    pub fn clone_row(&mut self, index: usize) -> EditorSnapshot {
        self.lines = self.operations.clone_at(&self.lines, index);
        self.snapshot()
    }

    /// Write a field without recomputing (typing in progress)
    pub fn stage(&mut self, index: usize, field: LineField) -> &[LineItem] {
        self.lines = self.operations.stage(&self.lines, index, field);
        &self.lines
    }

    /// Recompute a row (field blur)
    pub fn commit(&mut self, index: usize) -> EditorSnapshot {
        self.lines = self.operations.commit(&self.lines, index, self.tax_mode);
        self.snapshot()
    }

    pub fn set_quantity(&mut self, index: usize, value: Decimal) -> EditorSnapshot {
        self.lines = self
            .operations
            .set_quantity(&self.lines, index, value, self.tax_mode);
        self.snapshot()
    }

    pub fn set_rate(&mut self, index: usize, value: Decimal) -> EditorSnapshot {
        self.lines = self
            .operations
            .set_rate(&self.lines, index, value, self.tax_mode);
        self.snapshot()
    }

    pub fn set_discount(&mut self, index: usize, value: Decimal) -> EditorSnapshot {
        self.lines = self
            .operations
            .set_discount(&self.lines, index, value, self.tax_mode);
        self.snapshot()
    }

    pub fn set_tax(&mut self, index: usize, tax: Option<TaxRate>) -> EditorSnapshot {
        self.lines = self
            .operations
            .set_tax(&self.lines, index, tax, self.tax_mode);
        self.snapshot()
    }

    /// Switch tax mode; rows are recomputed from stored rates, not from
    /// previously displayed totals
    pub fn set_tax_mode(&mut self, tax_mode: TaxMode) -> EditorSnapshot {
        info!(from = %self.tax_mode, to = %tax_mode, "Tax mode changed");
        self.tax_mode = tax_mode;
        self.operations
            .calculator()
            .apply_all(&mut self.lines, tax_mode);
        self.snapshot()
    }

    /// Change the document's exchange rate.
    ///
    /// Rejects non-positive rates without touching the document.
    pub fn set_exchange_rate(
        &mut self,
        new_rate: Decimal,
        update: ExchangeRateUpdate,
    ) -> Result<ExchangeRateOutcome> {
        let outcome = self
            .operations
            .adjuster()
            .adjust(&self.lines, new_rate, update, self.tax_mode)?;

        self.exchange_rate = outcome.exchange_rate();
        if let ExchangeRateOutcome::Recomputed { lines, .. } = &outcome {
            self.lines = lines.clone();
        }

        Ok(outcome)
    }

    /// Synchronous half of a selection: clears the row or marks it loading
    pub fn begin_item_selection(
        &mut self,
        index: usize,
        item: Option<ItemReference>,
    ) -> EditorSnapshot {
        self.lines = self
            .operations
            .select_item(&self.lines, index, item, self.tax_mode);
        self.snapshot()
    }

    /// Completion of the catalog fetch for `item_id` started by
    /// [`Self::begin_item_selection`]. Results for an item the row no longer
    /// awaits are dropped.
    pub fn finish_item_selection(
        &mut self,
        index: usize,
        item_id: &str,
        fetched: Result<Option<CatalogItem>>,
    ) -> EditorSnapshot {
        self.lines = match fetched {
            Ok(Some(item)) => self.operations.apply_catalog_item(
                &self.lines,
                index,
                &item,
                self.kind,
                self.exchange_rate,
                self.tax_mode,
            ),
            Ok(None) => {
                warn!(index, item_id, "Selected item not found in catalog");
                self.operations
                    .fail_catalog_fetch(&self.lines, index, item_id, self.tax_mode)
            }
            Err(err) => {
                warn!(index, item_id, error = %err, "Catalog fetch failed");
                self.operations
                    .fail_catalog_fetch(&self.lines, index, item_id, self.tax_mode)
            }
        };
        self.snapshot()
    }

    /// Select an item on a row and resolve it against the catalog
    pub async fn select_item(
        &mut self,
        index: usize,
        item: Option<ItemReference>,
        catalog: &dyn CatalogLookup,
    ) -> EditorSnapshot {
        let item_id = item.as_ref().map(|item| item.id.clone());
        let snapshot = self.begin_item_selection(index, item);

        let Some(item_id) = item_id else {
            return snapshot;
        };
        if index >= self.lines.len() {
            return snapshot;
        }

        let fetched = catalog.find_item(&item_id).await;
        self.finish_item_selection(index, &item_id, fetched)
    }
}
