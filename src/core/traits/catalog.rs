use async_trait::async_trait;

use crate::core::Result;
use crate::modules::items::CatalogItem;

/// Catalog item lookup used when a row selects an item.
///
/// The fetch is the only asynchronous boundary of the engine. Implementations
/// own retry policy; the editor never retries.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Fetch a catalog item by id, `Ok(None)` when it does not exist
    async fn find_item(&self, item_id: &str) -> Result<Option<CatalogItem>>;
}
