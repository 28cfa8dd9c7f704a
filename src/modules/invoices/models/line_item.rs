// Line item model
//
// A line item is one editable row of an invoice or bill. Editable inputs
// (quantity, rate, discount, tax) live on the row; monetary outputs live in
// `LineAmounts` and are only ever written by the line calculator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::items::{AccountReference, ItemReference};
use crate::modules::taxes::TaxRate;

/// Persistence identity of a row.
///
/// On the wire this is the optional `id` field: present for rows loaded from
/// storage, omitted for rows created in the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum RowKey {
    #[default]
    Draft,
    Persisted(String),
}

impl RowKey {
    pub fn is_draft(&self) -> bool {
        matches!(self, RowKey::Draft)
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            RowKey::Draft => None,
            RowKey::Persisted(id) => Some(id),
        }
    }
}

impl From<Option<String>> for RowKey {
    fn from(id: Option<String>) -> Self {
        match id {
            Some(id) => RowKey::Persisted(id),
            None => RowKey::Draft,
        }
    }
}

impl From<RowKey> for Option<String> {
    fn from(key: RowKey) -> Self {
        match key {
            RowKey::Draft => None,
            RowKey::Persisted(id) => Some(id),
        }
    }
}

/// Computed monetary values of a row, rounded to amount precision
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineAmounts {
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    /// Net of tax, after discount
    pub item_total: Decimal,
    /// `item_total + tax_amount`
    pub item_total_tax_included: Decimal,
}

/// Inputs of the line computation, copied off a row
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineInput {
    pub quantity: Decimal,
    pub rate: Decimal,
    pub discount_percentage: Decimal,
    pub tax_percentage: Decimal,
}

/// One row of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "id", default, skip_serializing_if = "RowKey::is_draft")]
    pub key: RowKey,

    #[serde(default)]
    pub item: Option<ItemReference>,

    #[serde(default)]
    pub product_type: String,

    #[serde(default)]
    pub unit: Option<String>,

    #[serde(default)]
    pub unit_id: Option<String>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub quantity: Decimal,

    /// Unit price in the transaction currency
    #[serde(default)]
    pub rate: Decimal,

    /// Unit price as published by the catalog, base currency
    #[serde(default)]
    pub rate_base: Decimal,

    /// 0 to 100
    #[serde(default)]
    pub discount_percentage: Decimal,

    #[serde(default)]
    pub tax: Option<TaxRate>,

    #[serde(default)]
    pub account: Option<AccountReference>,

    #[serde(default)]
    pub amounts: LineAmounts,

    /// Set while the selected item's catalog data is being fetched
    #[serde(default, skip_serializing)]
    pub is_loading: bool,
}

impl LineItem {
    /// A fresh row: quantity 1, every amount 0, no item and no tax
    pub fn blank() -> Self {
        Self {
            key: RowKey::Draft,
            item: None,
            product_type: String::new(),
            unit: None,
            unit_id: None,
            description: String::new(),
            quantity: Decimal::ONE,
            rate: Decimal::ZERO,
            rate_base: Decimal::ZERO,
            discount_percentage: Decimal::ZERO,
            tax: None,
            account: None,
            amounts: LineAmounts::default(),
            is_loading: false,
        }
    }

    /// A row loaded from storage
    pub fn persisted(id: impl Into<String>) -> Self {
        Self {
            key: RowKey::Persisted(id.into()),
            ..Self::blank()
        }
    }

    pub fn is_persisted(&self) -> bool {
        !self.key.is_draft()
    }

    /// 0 when the row has no tax
    pub fn tax_percentage(&self) -> Decimal {
        self.tax
            .as_ref()
            .map(|tax| tax.percentage)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn tax_label(&self) -> Option<&str> {
        self.tax.as_ref().map(|tax| tax.label())
    }

    pub fn input(&self) -> LineInput {
        LineInput {
            quantity: self.quantity,
            rate: self.rate,
            discount_percentage: self.discount_percentage,
            tax_percentage: self.tax_percentage(),
        }
    }

    /// Copy of the row's editable fields, treated as new on save
    pub fn duplicate(&self) -> Self {
        Self {
            key: RowKey::Draft,
            is_loading: false,
            ..self.clone()
        }
    }

    /// Clears catalog-derived and computed fields, keeping the row's identity
    pub fn reset(&mut self) {
        let key = std::mem::take(&mut self.key);
        *self = Self {
            key,
            ..Self::blank()
        };
    }
}

impl Default for LineItem {
    fn default() -> Self {
        Self::blank()
    }
}
