// Row lifecycle operations
//
// Every operation takes the current rows and returns the next rows; the
// input slice is never modified. Recomputation is row-local: an edit only
// recomputes the row it touches, the caller re-aggregates afterwards.
// Out-of-range indexes are ignored with a warning.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::core::parse_input;
use crate::modules::invoices::models::{DocumentKind, ExchangeRate, LineItem, TaxMode};
use crate::modules::invoices::services::{ExchangeRateAdjuster, LineCalculator};
use crate::modules::items::{CatalogItem, ItemReference};
use crate::modules::taxes::TaxRate;

/// A single field write on a row
#[derive(Debug, Clone, PartialEq)]
pub enum LineField {
    Description(String),
    Quantity(Decimal),
    Rate(Decimal),
    /// Values outside 0 to 100 are stored as 0
    Discount(Decimal),
    Tax(Option<TaxRate>),
    Unit {
        unit: Option<String>,
        unit_id: Option<String>,
    },
}

impl LineField {
    /// Quantity from raw input text, malformed text reads as 0
    pub fn quantity_input(raw: &str) -> Self {
        LineField::Quantity(parse_input(raw))
    }

    pub fn rate_input(raw: &str) -> Self {
        LineField::Rate(parse_input(raw))
    }

    pub fn discount_input(raw: &str) -> Self {
        LineField::Discount(parse_input(raw))
    }
}

/// Clamp a discount percentage: anything outside 0 to 100 becomes 0
pub fn clamp_discount(value: Decimal) -> Decimal {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        Decimal::ZERO
    } else {
        value
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RowOperations {
    calculator: LineCalculator,
    adjuster: ExchangeRateAdjuster,
}

impl RowOperations {
    pub fn new(calculator: LineCalculator) -> Self {
        Self {
            calculator,
            adjuster: ExchangeRateAdjuster::new(calculator),
        }
    }

    pub fn calculator(&self) -> LineCalculator {
        self.calculator
    }

    pub fn adjuster(&self) -> ExchangeRateAdjuster {
        self.adjuster
    }

    /// Insert a row after `index` (a blank row when `row` is `None`)
    pub fn insert_at(&self, rows: &[LineItem], index: usize, row: Option<LineItem>) -> Vec<LineItem> {
        let mut next = rows.to_vec();
        let position = index.saturating_add(1).min(next.len());
        next.insert(position, row.unwrap_or_else(LineItem::blank));
        debug!(position, rows = next.len(), "Inserted row");
        next
    }

    /// Remove the row at `index`; the last remaining row is never removed
    pub fn remove_at(&self, rows: &[LineItem], index: usize) -> Vec<LineItem> {
        let mut next = rows.to_vec();
        if next.len() <= 1 {
            debug!("Refusing to remove the only row");
            return next;
        }
        if index >= next.len() {
            warn!(index, rows = next.len(), "Remove ignored, index out of range");
            return next;
        }
        next.remove(index);
        next
    }

    /// Duplicate the row at `index` right after itself, as a new row
    pub fn clone_at(&self, rows: &[LineItem], index: usize) -> Vec<LineItem> {
        let mut next = rows.to_vec();
        match next.get(index).map(LineItem::duplicate) {
            Some(copy) => next.insert(index + 1, copy),
            None => warn!(index, rows = next.len(), "Clone ignored, index out of range"),
        }
        next
    }

    /// Select a catalog item on a row, or clear it with `None`.
    ///
    /// A selection only marks the row as loading; the catalog data arrives
    /// through [`RowOperations::apply_catalog_item`].
    pub fn select_item(
        &self,
        rows: &[LineItem],
        index: usize,
        item: Option<ItemReference>,
        mode: TaxMode,
    ) -> Vec<LineItem> {
        self.update_row(rows, index, |row| match item {
            Some(item) => {
                debug!(item_id = %item.id, "Item selected, awaiting catalog data");
                row.item = Some(item);
                row.is_loading = true;
            }
            None => {
                row.reset();
                self.calculator.apply(row, mode);
            }
        })
    }

    /// Fill a loading row with fetched catalog data and recompute it.
    ///
    /// Ignored unless the row is still loading this very item; a row that
    /// was cleared or pointed at another item keeps its state.
    pub fn apply_catalog_item(
        &self,
        rows: &[LineItem],
        index: usize,
        item: &CatalogItem,
        kind: DocumentKind,
        exchange_rate: ExchangeRate,
        mode: TaxMode,
    ) -> Vec<LineItem> {
        self.update_row(rows, index, |row| {
            if !awaits_item(row, &item.id) {
                warn!(
                    item_id = %item.id,
                    selected = ?row.item.as_ref().map(|selected| selected.id.as_str()),
                    "Discarding catalog data for an item no longer selected"
                );
                return;
            }

            let (price, account) = match kind {
                DocumentKind::Sales => (item.selling_price, item.sales_account.clone()),
                DocumentKind::Purchase => (item.purchase_price, item.purchase_account.clone()),
            };

            row.item = Some(item.reference());
            row.product_type = item.product_type.clone();
            row.description = item.description.clone();
            row.unit = item.unit.clone();
            row.unit_id = item.unit_id.clone();
            row.tax = item.tax.clone();
            row.account = account;
            row.rate_base = price;
            row.is_loading = false;
            self.adjuster.rebase_row(row, exchange_rate, mode);
        })
    }

    /// The catalog fetch for `item_id` failed: clear the loading flag, keep
    /// everything else. Ignored when the row no longer awaits that item.
    pub fn fail_catalog_fetch(
        &self,
        rows: &[LineItem],
        index: usize,
        item_id: &str,
        mode: TaxMode,
    ) -> Vec<LineItem> {
        self.update_row(rows, index, |row| {
            if !awaits_item(row, item_id) {
                debug!(item_id, "Ignoring failed fetch for an item no longer selected");
                return;
            }
            row.is_loading = false;
            self.calculator.apply(row, mode);
        })
    }

    /// Write a field without recomputing
    pub fn stage(&self, rows: &[LineItem], index: usize, field: LineField) -> Vec<LineItem> {
        self.update_row(rows, index, |row| match field {
            LineField::Description(description) => row.description = description,
            LineField::Quantity(quantity) => row.quantity = quantity,
            LineField::Rate(rate) => row.rate = rate,
            LineField::Discount(discount) => {
                let clamped = clamp_discount(discount);
                if clamped != discount {
                    warn!(%discount, "Discount outside 0-100, stored as 0");
                }
                row.discount_percentage = clamped;
            }
            LineField::Tax(tax) => row.tax = tax,
            LineField::Unit { unit, unit_id } => {
                row.unit = unit;
                row.unit_id = unit_id;
            }
        })
    }

    /// Recompute a single row from its stored inputs
    pub fn commit(&self, rows: &[LineItem], index: usize, mode: TaxMode) -> Vec<LineItem> {
        self.update_row(rows, index, |row| self.calculator.apply(row, mode))
    }

    pub fn set_quantity(&self, rows: &[LineItem], index: usize, value: Decimal, mode: TaxMode) -> Vec<LineItem> {
        self.stage_and_commit(rows, index, LineField::Quantity(value), mode)
    }

    pub fn set_rate(&self, rows: &[LineItem], index: usize, value: Decimal, mode: TaxMode) -> Vec<LineItem> {
        self.stage_and_commit(rows, index, LineField::Rate(value), mode)
    }

    pub fn set_discount(&self, rows: &[LineItem], index: usize, value: Decimal, mode: TaxMode) -> Vec<LineItem> {
        self.stage_and_commit(rows, index, LineField::Discount(value), mode)
    }

    pub fn set_tax(&self, rows: &[LineItem], index: usize, tax: Option<TaxRate>, mode: TaxMode) -> Vec<LineItem> {
        self.stage_and_commit(rows, index, LineField::Tax(tax), mode)
    }

    fn stage_and_commit(&self, rows: &[LineItem], index: usize, field: LineField, mode: TaxMode) -> Vec<LineItem> {
        let staged = self.stage(rows, index, field);
        self.commit(&staged, index, mode)
    }

    fn update_row<F>(&self, rows: &[LineItem], index: usize, update: F) -> Vec<LineItem>
    where
        F: FnOnce(&mut LineItem),
    {
        let mut next = rows.to_vec();
        match next.get_mut(index) {
            Some(row) => update(row),
            None => warn!(index, rows = rows.len(), "Row edit ignored, index out of range"),
        }
        next
    }
}

fn awaits_item(row: &LineItem, item_id: &str) -> bool {
    row.is_loading && row.item.as_ref().is_some_and(|selected| selected.id == item_id)
}
