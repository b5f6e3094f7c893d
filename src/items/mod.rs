//! Item module.
//!
//! This module handles:
//! - Item types and the persisted document shape
//! - The repository trait handlers depend on
//! - MongoDB-backed repository
//! - In-memory repository for tests and local runs

pub mod memory;
pub mod mongo;
pub mod repository;
pub mod types;

pub use memory::InMemoryItemRepository;
pub use mongo::MongoItemRepository;
pub use repository::{ItemRepository, SharedRepository};
pub use types::{Item, ItemDocument, ItemInput};
