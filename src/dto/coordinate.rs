use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::geo_catalog::GeoCatalogEntryView;
use crate::services::{CoordinateSummary, CoordinateWithCatalogs, NewCoordinate};

pub(crate) fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite"))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateCoordinateRequest {
    #[validate(range(min = -90.0, max = 90.0), custom = "validate_finite")]
    #[schema(example = json!(-23.3528444))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0), custom = "validate_finite")]
    #[schema(example = json!(-44.7228947))]
    pub longitude: f64,
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub contact: Option<String>,
    #[validate(length(max = 255))]
    pub city: Option<String>,
    #[validate(length(max = 255))]
    #[schema(example = "Sudeste")]
    pub region: Option<String>,
    #[validate(length(max = 255))]
    pub country: Option<String>,
}

impl From<CreateCoordinateRequest> for NewCoordinate {
    fn from(req: CreateCoordinateRequest) -> Self {
        Self {
            latitude: req.latitude,
            longitude: req.longitude,
            name: req.name,
            contact: req.contact,
            city: req.city,
            region: req.region,
            country: req.country,
        }
    }
}

/// Query string for `DELETE /coordinate`
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteCoordinateQuery {
    #[validate(range(min = -90.0, max = 90.0), custom = "validate_finite")]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0), custom = "validate_finite")]
    pub longitude: f64,
}

/// A coordinate with the catalog entries it owns
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoordinateView {
    pub id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub name: Option<String>,
    pub contact: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    pub total_catalogs: u64,
    pub geo_catalogs: Vec<GeoCatalogEntryView>,
}

impl From<CoordinateWithCatalogs> for CoordinateView {
    fn from(owner: CoordinateWithCatalogs) -> Self {
        let c = owner.coordinate;
        Self {
            id: c.id,
            latitude: c.latitude,
            longitude: c.longitude,
            name: c.name,
            contact: c.contact,
            city: c.city,
            region: c.region,
            country: c.country,
            created_at: c.created_at,
            total_catalogs: owner.geo_catalogs.len() as u64,
            geo_catalogs: owner
                .geo_catalogs
                .into_iter()
                .map(GeoCatalogEntryView::from)
                .collect(),
        }
    }
}

/// A coordinate in the listing, with its catalog count
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoordinateSummaryView {
    pub id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub name: Option<String>,
    pub contact: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    pub total_catalogs: u64,
}

impl From<CoordinateSummary> for CoordinateSummaryView {
    fn from(summary: CoordinateSummary) -> Self {
        let c = summary.coordinate;
        Self {
            id: c.id,
            latitude: c.latitude,
            longitude: c.longitude,
            name: c.name,
            contact: c.contact,
            city: c.city,
            region: c.region,
            country: c.country,
            created_at: c.created_at,
            total_catalogs: summary.total_catalogs,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoordinatesList {
    pub coordinates: Vec<CoordinateSummaryView>,
}
