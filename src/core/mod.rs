pub mod error;
pub mod precision;
pub mod traits;

pub use error::{AppError, Result};
pub use precision::{parse_input, PrecisionPolicy};
