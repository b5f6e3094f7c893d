//! CRUD HTTP service for "items" stored in a MongoDB collection.
//!
//! Requests flow through three layers:
//!
//! ```text
//! router ──▶ handler ──▶ ItemRepository ──▶ MongoDB
//! ```
//!
//! Handlers only translate between HTTP and repository calls: absence becomes
//! `404`, an update that touched nothing becomes `304`, and any database
//! failure surfaces as a generic `500`.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`items`]: Item types and repository backends
//! - [`api`]: HTTP routes, handlers and OpenAPI document
//! - [`metrics`]: Prometheus counters and latency histograms
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod items;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
