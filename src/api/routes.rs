//! HTTP API route definitions.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::API_V1_STR;

use super::docs::{self, OPENAPI_PATH, SWAGGER_UI_PATH};
use super::handlers::{
    create_item, delete_item, get_item, health, list_items, render_metrics, update_item, AppState,
};

/// Create the API router.
pub fn create_router(state: AppState, project_name: &str) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        // Item endpoints
        .nest(API_V1_STR, item_routes())
        .with_state(state)
        // Docs
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_PATH, docs::openapi(project_name)))
        .layer(TraceLayer::new_for_http())
}

/// Item CRUD routes, mounted under the version prefix.
fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/items", post(create_item).get(list_items))
        .route("/items/", get(list_items).post(create_item))
        .route(
            "/items/:item_id",
            get(get_item).put(update_item).delete(delete_item),
        )
}
