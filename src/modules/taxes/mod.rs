pub mod models;
pub mod services;

pub use models::{TaxRate, TaxRates};
pub use services::TaxCalculator;
