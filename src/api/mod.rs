//! HTTP API module for the item routes plus health, metrics and docs.

pub mod docs;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
