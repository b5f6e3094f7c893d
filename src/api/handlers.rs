//! HTTP API handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::items::{Item, ItemInput, SharedRepository};
use crate::metrics;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Item storage backend.
    pub repository: SharedRepository,
    /// Prometheus scrape handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state without a metrics recorder.
    pub fn new(repository: SharedRepository) -> Self {
        Self {
            repository,
            metrics: None,
        }
    }

    /// Attach the Prometheus handle rendered at `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Offset pagination for the item listing.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Number of items to skip.
    #[serde(default)]
    #[param(default = 0)]
    pub skip: u64,
    /// Maximum number of items to return.
    #[serde(default = "default_limit")]
    #[param(default = 100)]
    pub limit: u64,
}

fn default_limit() -> u64 {
    100
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Metrics handler - renders Prometheus text, 503 without a recorder.
pub async fn render_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

/// Fetch a single item.
#[utoipa::path(
    get,
    path = "/api/v1/items/{item_id}",
    tag = "Items",
    params(("item_id" = String, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 404, description = "No item with this id"),
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Response, ApiError> {
    metrics::inc_item_requests("get");

    match state.repository.find(&item_id).await? {
        Some(item) => Ok(Json(item).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

/// List items in storage order.
#[utoipa::path(
    get,
    path = "/api/v1/items/",
    tag = "Items",
    params(ListParams),
    responses((status = 200, description = "Items", body = [Item]))
)]
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Item>>, ApiError> {
    metrics::inc_item_requests("list");

    let items = state.repository.list(params.skip, params.limit).await?;
    Ok(Json(items))
}

/// Create an item under a new id.
#[utoipa::path(
    post,
    path = "/api/v1/items",
    tag = "Items",
    request_body = ItemInput,
    responses((status = 201, description = "Item created", body = Item))
)]
pub async fn create_item(
    State(state): State<AppState>,
    Json(input): Json<ItemInput>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    metrics::inc_item_requests("create");

    let item = state.repository.create(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Replace every field of an item except its id.
///
/// `304` passes through the store's zero modified count; it does not tell
/// "already equal" apart from "write not applied".
#[utoipa::path(
    put,
    path = "/api/v1/items/{item_id}",
    tag = "Items",
    params(("item_id" = String, Path, description = "Item id")),
    request_body = ItemInput,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 304, description = "Store reported no modification"),
        (status = 404, description = "No item with this id"),
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Json(input): Json<ItemInput>,
) -> Result<Response, ApiError> {
    metrics::inc_item_requests("update");

    if state.repository.find(&item_id).await?.is_none() {
        return Ok(StatusCode::NOT_FOUND.into_response());
    }

    match state.repository.update(&item_id, input).await? {
        Some(item) => Ok(Json(item).into_response()),
        None => Ok(StatusCode::NOT_MODIFIED.into_response()),
    }
}

/// Delete every document with this id.
#[utoipa::path(
    delete,
    path = "/api/v1/items/{item_id}",
    tag = "Items",
    params(("item_id" = String, Path, description = "Item id")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "No item with this id"),
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    metrics::inc_item_requests("delete");

    let deleted = state.repository.delete(&item_id).await?;
    if deleted == 0 {
        Ok(StatusCode::NOT_FOUND)
    } else {
        Ok(StatusCode::NO_CONTENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::items::InMemoryItemRepository;

    fn state() -> AppState {
        AppState::new(Arc::new(InMemoryItemRepository::new()))
    }

    #[tokio::test]
    async fn metrics_without_recorder_is_unavailable() {
        let response = render_metrics(State(state())).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn get_unknown_item_is_not_found() {
        let response = get_item(State(state()), Path("missing".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_unknown_item_is_not_found() {
        let status = delete_item(State(state()), Path("missing".to_string()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn list_params_default_when_absent() {
        let params: ListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.skip, 0);
        assert_eq!(params.limit, 100);
    }
}
