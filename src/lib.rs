//! Invoice line-item computation engine
//!
//! Turns editable line items (item, quantity, rate, discount, tax) plus the
//! document's tax mode and exchange rate into per-line amounts and document
//! totals, with fixed rounding rules so totals never depend on the order
//! rows were edited in.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::invoices;
pub use modules::items;
pub use modules::taxes;
