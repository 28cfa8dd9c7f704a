// Test data factories for line items, taxes and catalog items

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use invoice_engine::core::traits::CatalogLookup;
use invoice_engine::core::{AppError, Result};
use invoice_engine::invoices::LineItem;
use invoice_engine::items::{AccountReference, CatalogItem, ItemReference};
use invoice_engine::taxes::TaxRate;

/// Tax rate named after its percentage ("Tax 10%")
pub fn tax(percentage: Decimal) -> TaxRate {
    TaxRate::new(
        format!("tax-{}", percentage),
        format!("Tax {}%", percentage),
        percentage,
    )
}

/// A free-form row with the given inputs, not yet computed
pub fn row(quantity: Decimal, rate: Decimal, discount: Decimal, tax_percentage: Decimal) -> LineItem {
    let mut row = LineItem::blank();
    row.quantity = quantity;
    row.rate = rate;
    row.discount_percentage = discount;
    if tax_percentage > Decimal::ZERO {
        row.tax = Some(tax(tax_percentage));
    }
    row
}

/// A row that came from the catalog: `rate_base` in base currency
pub fn catalog_row(item_id: &str, rate: Decimal, rate_base: Decimal) -> LineItem {
    let mut row = LineItem::blank();
    row.item = Some(ItemReference::new(item_id, format!("Item {}", item_id)));
    row.rate = rate;
    row.rate_base = rate_base;
    row
}

pub fn catalog_item(id: &str, selling_price: Decimal, tax_percentage: Option<Decimal>) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        name: format!("Item {}", id),
        product_type: "goods".to_string(),
        selling_price,
        purchase_price: selling_price * dec!(0.6),
        description: format!("Description of {}", id),
        unit: Some("pcs".to_string()),
        unit_id: Some("unit-pcs".to_string()),
        tax: tax_percentage.map(tax),
        sales_account: Some(AccountReference {
            id: "acc-4000".to_string(),
            name: "Sales".to_string(),
        }),
        purchase_account: Some(AccountReference {
            id: "acc-5000".to_string(),
            name: "Cost of Goods Sold".to_string(),
        }),
    }
}

/// Catalog whose every lookup fails
pub struct FailingCatalog;

#[async_trait]
impl CatalogLookup for FailingCatalog {
    async fn find_item(&self, item_id: &str) -> Result<Option<CatalogItem>> {
        Err(AppError::catalog(format!("lookup of {} timed out", item_id)))
    }
}
