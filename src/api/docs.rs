//! OpenAPI document for the item routes.

use utoipa::OpenApi;

use crate::items::{Item, ItemInput};

use super::handlers;

/// Path the OpenAPI JSON is served at.
pub const OPENAPI_PATH: &str = "/api/v1/openapi.json";

/// Path the Swagger UI is served at.
pub const SWAGGER_UI_PATH: &str = "/docs";

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_item,
        handlers::list_items,
        handlers::create_item,
        handlers::update_item,
        handlers::delete_item,
    ),
    components(schemas(Item, ItemInput)),
    tags((name = "Items", description = "Item CRUD operations"))
)]
pub struct ApiDoc;

/// Build the OpenAPI document titled with the project name.
pub fn openapi(project_name: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = project_name.to_string();
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_item_route() {
        let doc = openapi("items");
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert_eq!(doc.info.title, "items");
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/items/{item_id}"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/items/"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/items"));
    }
}
