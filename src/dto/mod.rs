pub mod coordinate;
pub mod geo_catalog;
pub mod image;

pub use coordinate::{
    CoordinateSummaryView, CoordinateView, CoordinatesList, CreateCoordinateRequest,
    DeleteCoordinateQuery,
};
pub use geo_catalog::{
    CreateGeoCatalogRequest, DeleteGeoCatalogQuery, GeoCatalogEntryView, GeoCatalogRow,
    GeoCatalogSearchQuery, GeoCatalogsList, HashtagsList,
};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned by successful deletes
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "Geo catalog 3 deleted")]
    pub success: String,
}
