mod document;
mod line_item;
mod summary;

pub use document::{DocumentKind, ExchangeRate, TaxMode};
pub use line_item::{LineAmounts, LineInput, LineItem, RowKey};
pub use summary::{DocumentSummary, TaxGroup};
