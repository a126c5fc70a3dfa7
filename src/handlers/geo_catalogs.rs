use crate::{
    dto::{
        CoordinateView, CreateGeoCatalogRequest, DeleteGeoCatalogQuery, DeleteResponse,
        GeoCatalogRow, GeoCatalogSearchQuery, GeoCatalogsList, HashtagsList,
    },
    errors::ServiceError,
    handlers::common::{success_response, validate_input},
    services::CreateGeoCatalogInput,
    AppState,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

pub fn geo_catalogs_router() -> Router<AppState> {
    Router::new()
        .route(
            "/geo_catalog",
            post(create_geo_catalog).delete(delete_geo_catalog),
        )
        .route("/geo_catalogs", get(list_geo_catalogs))
        .route("/hashtags", get(list_hashtags))
}

/// Attach a catalog entry to the coordinate at the given position
#[utoipa::path(
    post,
    path = "/geo_catalog",
    request_body = CreateGeoCatalogRequest,
    responses(
        (status = 200, description = "Entry attached; returns the owning coordinate with all its entries", body = CoordinateView),
        (status = 400, description = "Invalid request, no coordinate at this latitude and longitude, or the entry could not be saved", body = crate::errors::ErrorResponse)
    ),
    tag = "geo_catalog"
)]
pub async fn create_geo_catalog(
    State(state): State<AppState>,
    payload: Result<Json<CreateGeoCatalogRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(payload) = payload?;
    validate_input(&payload)?;
    let input = CreateGeoCatalogInput::try_from(payload)?;

    let owner = state
        .services
        .geo_catalogs
        .create_geo_catalog(input)
        .await
        .map_err(|e| match e {
            ServiceError::NotFound(message) => ServiceError::BadRequest(message),
            other => other.persistence_as_bad_request("Could not save geo catalog"),
        })?;

    Ok(success_response(CoordinateView::from(owner)))
}

/// List catalog entries joined with their coordinates
#[utoipa::path(
    get,
    path = "/geo_catalogs",
    params(GeoCatalogSearchQuery),
    responses(
        (status = 200, description = "Matching entries, one row per entry", body = GeoCatalogsList),
        (status = 400, description = "Invalid query", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "geo_catalog"
)]
pub async fn list_geo_catalogs(
    State(state): State<AppState>,
    query: Result<Query<GeoCatalogSearchQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Query(query) = query?;

    let geo_catalogs = state
        .services
        .geo_catalogs
        .list_geo_catalogs(query.into())
        .await?
        .into_iter()
        .map(GeoCatalogRow::from)
        .collect();

    Ok(success_response(GeoCatalogsList { geo_catalogs }))
}

/// Delete a catalog entry by id
#[utoipa::path(
    delete,
    path = "/geo_catalog",
    params(DeleteGeoCatalogQuery),
    responses(
        (status = 200, description = "Entry deleted", body = DeleteResponse),
        (status = 400, description = "The entry could not be deleted", body = crate::errors::ErrorResponse),
        (status = 404, description = "Missing or unknown id", body = crate::errors::ErrorResponse)
    ),
    tag = "geo_catalog"
)]
pub async fn delete_geo_catalog(
    State(state): State<AppState>,
    query: Result<Query<DeleteGeoCatalogQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Query(query) = query?;
    let removed = state
        .services
        .geo_catalogs
        .delete_geo_catalog(query.parsed_id())
        .await
        .map_err(|e| e.persistence_as_bad_request("Could not delete geo catalog"))?;

    Ok(success_response(DeleteResponse {
        success: format!("Geo catalog {} deleted", removed.id),
    }))
}

/// Every distinct hashtag in use
#[utoipa::path(
    get,
    path = "/hashtags",
    responses(
        (status = 200, description = "Distinct hashtags, sorted", body = HashtagsList),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "geo_catalog"
)]
pub async fn list_hashtags(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let hashtags = state.services.geo_catalogs.list_hashtags().await?;
    Ok(success_response(HashtagsList { hashtags }))
}
