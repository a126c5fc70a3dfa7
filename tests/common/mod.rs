#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use geo_catalog_api::{
    build_router,
    config::AppConfig,
    db::{self, DbConfig},
    AppState,
};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Helper harness for spinning up the full router over a private in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "development".to_string(),
        );

        let pool = db::establish_connection_with_config(&DbConfig::in_memory())
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = build_router(state.clone());

        Self { router, state }
    }

    /// Issue a request against the router, with an optional JSON body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        self.request_with_headers(method, uri, body, &[]).await
    }

    pub async fn request_with_headers(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// POST /coordinate for a bare (latitude, longitude) pair
    pub async fn create_coordinate(&self, latitude: f64, longitude: f64) -> Response {
        self.request(
            Method::POST,
            "/coordinate",
            Some(json!({ "latitude": latitude, "longitude": longitude })),
        )
        .await
    }

    /// POST /geo_catalog with no image
    pub async fn create_geo_catalog(
        &self,
        title: &str,
        hashtag: &str,
        latitude: f64,
        longitude: f64,
    ) -> Response {
        self.request(
            Method::POST,
            "/geo_catalog",
            Some(json!({
                "title": title,
                "description": format!("{} description", title),
                "hashtag": hashtag,
                "latitude": latitude,
                "longitude": longitude,
            })),
        )
        .await
    }

    pub async fn coordinate_count(&self) -> u64 {
        geo_catalog_api::entities::Coordinate::find()
            .count(self.state.db.as_ref())
            .await
            .expect("count coordinates")
    }

    pub async fn geo_catalog_count(&self) -> u64 {
        geo_catalog_api::entities::GeoCatalog::find()
            .count(self.state.db.as_ref())
            .await
            .expect("count geo catalogs")
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}
