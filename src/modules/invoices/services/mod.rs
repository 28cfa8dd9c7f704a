pub mod editor;
pub mod exchange_rate;
pub mod line_calculator;
pub mod row_operations;
pub mod tax_aggregator;

pub use editor::{EditorSnapshot, InvoiceEditor};
pub use exchange_rate::{ExchangeRateAdjuster, ExchangeRateOutcome, ExchangeRateUpdate};
pub use line_calculator::LineCalculator;
pub use row_operations::{clamp_discount, LineField, RowOperations};
pub use tax_aggregator::TaxAggregator;
