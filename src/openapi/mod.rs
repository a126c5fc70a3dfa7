use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Geo Catalog API",
        version = "0.1.0",
        description = r#"
# Geo Catalog API

Stores geographic coordinates and the catalog entries (title, description,
image, hashtag) attached to them.

## Images

`img_source` is sent as base64 text (standard or URL-safe alphabet) and is
always returned with the standard alphabet.

## Error Handling

Every error uses the same body:

```json
{
  "error": "Not Found",
  "message": "Not found: no geo catalog with id 999",
  "request_id": "2f1c3e0a-8d1e-4a5b-9c55-1b2a3c4d5e6f",
  "timestamp": "2024-01-01T00:00:00Z"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "coordinate", description = "Register, list and delete coordinates"),
        (name = "geo_catalog", description = "Attach, search and delete catalog entries"),
        (name = "health", description = "Service health")
    ),
    paths(
        crate::handlers::coordinates::create_coordinate,
        crate::handlers::coordinates::list_coordinates,
        crate::handlers::coordinates::delete_coordinate,
        crate::handlers::geo_catalogs::create_geo_catalog,
        crate::handlers::geo_catalogs::list_geo_catalogs,
        crate::handlers::geo_catalogs::delete_geo_catalog,
        crate::handlers::geo_catalogs::list_hashtags,
        crate::health::health_check,
        crate::health::liveness,
    ),
    components(
        schemas(
            crate::errors::ErrorResponse,
            crate::dto::CreateCoordinateRequest,
            crate::dto::CoordinateView,
            crate::dto::CoordinateSummaryView,
            crate::dto::CoordinatesList,
            crate::dto::CreateGeoCatalogRequest,
            crate::dto::GeoCatalogEntryView,
            crate::dto::GeoCatalogRow,
            crate::dto::GeoCatalogsList,
            crate::dto::HashtagsList,
            crate::dto::DeleteResponse,
            crate::health::HealthInfo,
            crate::health::HealthStatus,
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
