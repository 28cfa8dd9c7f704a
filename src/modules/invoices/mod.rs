// Invoices module: line items, their computation and document totals

pub mod models;
pub mod services;

pub use models::{
    DocumentKind, DocumentSummary, ExchangeRate, LineAmounts, LineInput, LineItem, RowKey,
    TaxGroup, TaxMode,
};
pub use services::{
    EditorSnapshot, ExchangeRateAdjuster, ExchangeRateOutcome, ExchangeRateUpdate, InvoiceEditor,
    LineCalculator, LineField, RowOperations, TaxAggregator,
};
