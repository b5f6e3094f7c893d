//! Storage abstraction the HTTP handlers are written against.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

use super::types::{Item, ItemInput};

/// Persistence operations for items, keyed by string id.
///
/// Absence is not an error: lookups return `None`, deletes report how many
/// documents were removed.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Look up a single item.
    async fn find(&self, id: &str) -> Result<Option<Item>>;

    /// Items in the store's natural order, skipping `skip` and returning at
    /// most `limit`.
    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<Item>>;

    /// Insert a new item under a freshly generated id.
    async fn create(&self, input: ItemInput) -> Result<Item>;

    /// Replace every non-id field of the item.
    ///
    /// Returns `None` when the store reports that no document was modified,
    /// which covers both a missing id and values identical to the stored ones.
    async fn update(&self, id: &str, input: ItemInput) -> Result<Option<Item>>;

    /// Delete every document with this id, returning how many were removed.
    async fn delete(&self, id: &str) -> Result<u64>;
}

/// Repository handle shared across request handlers.
pub type SharedRepository = Arc<dyn ItemRepository>;
