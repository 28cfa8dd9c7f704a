use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

use crate::core::traits::CatalogLookup;
use crate::core::Result;
use crate::modules::items::CatalogItem;

/// Catalog backed by a map, used by the driver binary and in tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: HashMap<String, CatalogItem>,
}

impl InMemoryCatalog {
    pub fn new(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|item| (item.id.clone(), item))
                .collect(),
        }
    }

    pub fn insert(&mut self, item: CatalogItem) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl CatalogLookup for InMemoryCatalog {
    async fn find_item(&self, item_id: &str) -> Result<Option<CatalogItem>> {
        let found = self.items.get(item_id).cloned();
        debug!(item_id, found = found.is_some(), "Catalog lookup");
        Ok(found)
    }
}
