use crate::{
    dto::{
        CoordinateSummaryView, CoordinateView, CoordinatesList, CreateCoordinateRequest,
        DeleteCoordinateQuery, DeleteResponse,
    },
    errors::ServiceError,
    handlers::common::{success_response, validate_input},
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

pub fn coordinates_router() -> Router<AppState> {
    Router::new()
        .route(
            "/coordinate",
            post(create_coordinate).delete(delete_coordinate),
        )
        .route("/coordinates", get(list_coordinates))
}

/// Register a new coordinate
#[utoipa::path(
    post,
    path = "/coordinate",
    request_body = CreateCoordinateRequest,
    responses(
        (status = 200, description = "Coordinate created, with an empty catalog list", body = CoordinateView,
            headers(("X-Request-Id" = String, description = "Unique request id for tracing"))
        ),
        (status = 400, description = "Invalid request or the coordinate could not be saved", body = crate::errors::ErrorResponse),
        (status = 409, description = "A coordinate already exists at this latitude and longitude", body = crate::errors::ErrorResponse)
    ),
    tag = "coordinate"
)]
pub async fn create_coordinate(
    State(state): State<AppState>,
    payload: Result<Json<CreateCoordinateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(payload) = payload?;
    validate_input(&payload)?;

    let created = state
        .services
        .coordinates
        .create_coordinate(payload.into())
        .await
        .map_err(|e| e.persistence_as_bad_request("Could not save coordinate"))?;

    Ok(success_response(CoordinateView::from(created)))
}

/// List every coordinate with its catalog count
#[utoipa::path(
    get,
    path = "/coordinates",
    responses(
        (status = 200, description = "All stored coordinates", body = CoordinatesList),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "coordinate"
)]
pub async fn list_coordinates(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let coordinates = state
        .services
        .coordinates
        .list_coordinates()
        .await?
        .into_iter()
        .map(CoordinateSummaryView::from)
        .collect();

    Ok(success_response(CoordinatesList { coordinates }))
}

/// Delete a coordinate that owns no catalog entries
#[utoipa::path(
    delete,
    path = "/coordinate",
    params(DeleteCoordinateQuery),
    responses(
        (status = 200, description = "Coordinate deleted", body = DeleteResponse),
        (status = 400, description = "Invalid query or the coordinate could not be deleted", body = crate::errors::ErrorResponse),
        (status = 404, description = "No coordinate at this latitude and longitude", body = crate::errors::ErrorResponse),
        (status = 409, description = "Coordinate still owns catalog entries", body = crate::errors::ErrorResponse)
    ),
    tag = "coordinate"
)]
pub async fn delete_coordinate(
    State(state): State<AppState>,
    query: Result<Query<DeleteCoordinateQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Query(query) = query?;
    validate_input(&query)?;

    let removed = state
        .services
        .coordinates
        .delete_coordinate(query.latitude, query.longitude)
        .await
        .map_err(|e| e.persistence_as_bad_request("Could not delete coordinate"))?;

    Ok(success_response(DeleteResponse {
        success: format!(
            "Coordinate ({}, {}) deleted",
            removed.latitude, removed.longitude
        ),
    }))
}
