pub mod models;
pub mod services;

pub use models::{AccountReference, CatalogItem, ItemReference};
pub use services::InMemoryCatalog;
