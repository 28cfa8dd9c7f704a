// Catalog items as returned by the item lookup collaborator.
//
// Prices are published in the organization's base currency; the row
// converts them with the document's exchange rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::taxes::TaxRate;

/// Identifier and display label of a catalog item selected on a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReference {
    pub id: String,
    pub name: String,
}

impl ItemReference {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Ledger account an item posts to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountReference {
    pub id: String,
    pub name: String,
}

/// Full catalog entry for an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,

    /// Free-text classification ("goods", "service", ...)
    #[serde(default)]
    pub product_type: String,

    /// Price on sales documents, base currency
    #[serde(default)]
    pub selling_price: Decimal,

    /// Price on purchase documents, base currency
    #[serde(default)]
    pub purchase_price: Decimal,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub unit: Option<String>,

    #[serde(default)]
    pub unit_id: Option<String>,

    #[serde(default)]
    pub tax: Option<TaxRate>,

    #[serde(default)]
    pub sales_account: Option<AccountReference>,

    #[serde(default)]
    pub purchase_account: Option<AccountReference>,
}

impl CatalogItem {
    pub fn reference(&self) -> ItemReference {
        ItemReference::new(self.id.clone(), self.name.clone())
    }
}
