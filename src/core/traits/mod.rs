pub mod catalog;

pub use catalog::CatalogLookup;
