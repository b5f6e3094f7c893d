//! In-memory item repository.
//!
//! Mirrors the observable behavior of the MongoDB backend (insertion order,
//! zero modified count for no-op updates) without a server, so handlers can
//! be exercised in tests and the service can run locally with `--in-memory`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::{Result, ServiceError};

use super::repository::ItemRepository;
use super::types::{Item, ItemDocument, ItemInput};

/// Configuration for in-memory repository behavior.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfig {
    /// Whether every operation should fail as if the database were down.
    pub fail_all: bool,
}

/// Insertion-ordered, process-local item store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    config: InMemoryConfig,
    documents: Arc<Mutex<Vec<ItemDocument>>>,
}

impl InMemoryItemRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with custom configuration.
    pub fn with_config(config: InMemoryConfig) -> Self {
        Self {
            config,
            documents: Arc::default(),
        }
    }

    /// A repository whose every call fails with an IO error.
    pub fn failing() -> Self {
        Self::with_config(InMemoryConfig { fail_all: true })
    }

    /// Store a document as-is, including its id.
    pub fn insert_document(&self, document: ItemDocument) {
        self.documents().push(document);
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn documents(&self) -> MutexGuard<'_, Vec<ItemDocument>> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_available(&self) -> Result<()> {
        if self.config.fail_all {
            return Err(ServiceError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "in-memory store configured to fail",
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn find(&self, id: &str) -> Result<Option<Item>> {
        self.check_available()?;
        Ok(self
            .documents()
            .iter()
            .find(|doc| doc.id == id)
            .cloned()
            .map(Item::from))
    }

    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<Item>> {
        self.check_available()?;
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .documents()
            .iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .map(Item::from)
            .collect())
    }

    async fn create(&self, input: ItemInput) -> Result<Item> {
        self.check_available()?;
        let document = ItemDocument::new(input);
        self.documents().push(document.clone());
        Ok(Item::from(document))
    }

    async fn update(&self, id: &str, input: ItemInput) -> Result<Option<Item>> {
        self.check_available()?;
        let mut documents = self.documents();
        let Some(doc) = documents.iter_mut().find(|doc| doc.id == id) else {
            return Ok(None);
        };

        let unchanged = doc.name == input.name
            && doc.description == input.description
            && doc.price == input.price;
        if unchanged {
            return Ok(None);
        }

        doc.name = input.name;
        doc.description = input.description;
        doc.price = input.price;
        Ok(Some(Item::from(doc.clone())))
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        self.check_available()?;
        let mut documents = self.documents();
        let before = documents.len();
        documents.retain(|doc| doc.id != id);
        Ok((before - documents.len()) as u64)
    }
}
