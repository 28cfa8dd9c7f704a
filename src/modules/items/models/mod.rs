mod catalog_item;

pub use catalog_item::{AccountReference, CatalogItem, ItemReference};
