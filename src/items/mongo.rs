//! MongoDB-backed item repository.

use std::time::Instant;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Client, Collection};
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::error::Result;
use crate::metrics;

use super::repository::ItemRepository;
use super::types::{Item, ItemDocument, ItemInput};

/// Item repository over a single MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoItemRepository {
    /// Driver client, kept for shutdown.
    client: Client,
    /// The items collection.
    collection: Collection<ItemDocument>,
}

impl MongoItemRepository {
    /// Connect to MongoDB and verify the deployment answers a `ping`.
    pub async fn connect(config: &Config) -> Result<Self> {
        info!("Connecting to MongoDB at {}", config.redacted_mongodb_url());
        let client = Client::with_uri_str(&config.mongodb_url).await?;

        client
            .database(&config.mongodb_database)
            .run_command(doc! { "ping": 1 })
            .await?;
        info!(
            "Connected to MongoDB (database={}, collection={})",
            config.mongodb_database, config.mongodb_collection
        );

        Ok(Self::new(
            client,
            &config.mongodb_database,
            &config.mongodb_collection,
        ))
    }

    /// Wrap an existing client without contacting the server.
    pub fn new(client: Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection(collection);
        Self { client, collection }
    }

    /// The underlying collection.
    pub fn collection(&self) -> &Collection<ItemDocument> {
        &self.collection
    }

    /// Close the driver's connection pools.
    pub async fn shutdown(self) {
        info!("Closing MongoDB connection");
        self.client.shutdown().await;
    }
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    #[instrument(skip(self))]
    async fn find(&self, id: &str) -> Result<Option<Item>> {
        let start = Instant::now();
        let found = self.collection.find_one(doc! { "_id": id }).await?;
        metrics::record_db_latency(start, "find");

        Ok(found.map(Item::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<Item>> {
        // The driver treats a limit of 0 as "no limit".
        if limit == 0 {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let cursor = self
            .collection
            .find(doc! {})
            .skip(skip)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await?;
        let docs: Vec<ItemDocument> = cursor.try_collect().await?;
        metrics::record_db_latency(start, "list");

        debug!("Listed {} items", docs.len());
        Ok(docs.into_iter().map(Item::from).collect())
    }

    #[instrument(skip(self, input))]
    async fn create(&self, input: ItemInput) -> Result<Item> {
        let document = ItemDocument::new(input);

        let start = Instant::now();
        self.collection.insert_one(&document).await?;
        metrics::record_db_latency(start, "create");

        debug!("Inserted item {}", document.id);
        Ok(Item::from(document))
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: &str, input: ItemInput) -> Result<Option<Item>> {
        let item = Item::from_input(id, input);
        let changes = doc! {
            "$set": {
                "name": item.name.as_str(),
                "description": item.description.as_str(),
                "price": item.price,
            }
        };

        let start = Instant::now();
        let result = self
            .collection
            .update_one(doc! { "_id": id }, changes)
            .await?;
        metrics::record_db_latency(start, "update");

        debug!(
            "Update matched {} and modified {} documents",
            result.matched_count, result.modified_count
        );
        if result.modified_count == 0 {
            Ok(None)
        } else {
            Ok(Some(item))
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<u64> {
        let start = Instant::now();
        let result = self.collection.delete_many(doc! { "_id": id }).await?;
        metrics::record_db_latency(start, "delete");

        Ok(result.deleted_count)
    }
}
