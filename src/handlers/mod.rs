pub mod common;
pub mod coordinates;
pub mod geo_catalogs;

use crate::db::DbPool;
use crate::services::{CoordinateService, GeoCatalogService};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub coordinates: Arc<CoordinateService>,
    pub geo_catalogs: Arc<GeoCatalogService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            coordinates: Arc::new(CoordinateService::new(db_pool.clone())),
            geo_catalogs: Arc::new(GeoCatalogService::new(db_pool)),
        }
    }
}
