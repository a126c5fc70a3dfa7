use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::coordinate::validate_finite;
use super::image::{decode_image, encode_image};
use crate::entities::geo_catalog::{self, NewGeoCatalog};
use crate::errors::ServiceError;
use crate::services::{CreateGeoCatalogInput, GeoCatalogFilter, GeoCatalogWithCoordinate};

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

/// Body of `POST /geo_catalog`. The descriptive coordinate fields are
/// accepted for compatibility and ignored; the entry attaches to whatever
/// coordinate is already stored at (`latitude`, `longitude`).
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateGeoCatalogRequest {
    #[validate(length(min = 1, max = 144), custom = "validate_not_blank")]
    #[schema(example = "Lighthouse")]
    pub title: String,
    #[validate(length(max = 3000))]
    #[schema(example = "This is an example of description of a geographic catalog.")]
    pub description: String,
    /// Base64 image bytes, standard or URL-safe alphabet
    #[schema(example = "VGhpcyBpcyB0aGUgd2F5")]
    pub img_source: Option<String>,
    #[validate(length(min = 1, max = 40), custom = "validate_not_blank")]
    #[schema(example = "#coast")]
    pub hashtag: String,
    #[validate(range(min = -90.0, max = 90.0), custom = "validate_finite")]
    #[schema(example = json!(-23.3528444))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0), custom = "validate_finite")]
    #[schema(example = json!(-44.7228947))]
    pub longitude: f64,
    pub name: Option<String>,
    pub contact: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl TryFrom<CreateGeoCatalogRequest> for CreateGeoCatalogInput {
    type Error = ServiceError;

    fn try_from(req: CreateGeoCatalogRequest) -> Result<Self, Self::Error> {
        let img_source = decode_image(req.img_source.as_deref())?;
        Ok(Self {
            entry: NewGeoCatalog {
                title: req.title,
                description: req.description,
                img_source,
                hashtag: req.hashtag,
            },
            latitude: req.latitude,
            longitude: req.longitude,
        })
    }
}

/// Query string for `GET /geo_catalogs`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GeoCatalogSearchQuery {
    /// Case-sensitive substring of the hashtag
    pub hashtag: Option<String>,
    /// Exact region of the owning coordinate
    pub region: Option<String>,
}

impl From<GeoCatalogSearchQuery> for GeoCatalogFilter {
    fn from(query: GeoCatalogSearchQuery) -> Self {
        Self {
            hashtag: query.hashtag,
            region: query.region,
        }
    }
}

/// Query string for `DELETE /geo_catalog`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteGeoCatalogQuery {
    /// Entry id; absent or non-numeric ids are reported as not found
    pub id: Option<String>,
}

impl DeleteGeoCatalogQuery {
    pub fn parsed_id(&self) -> Option<i32> {
        self.id.as_deref().and_then(|raw| raw.trim().parse().ok())
    }
}

/// A catalog entry nested under its coordinate
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GeoCatalogEntryView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub hashtag: String,
    pub img_source: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<geo_catalog::Model> for GeoCatalogEntryView {
    fn from(m: geo_catalog::Model) -> Self {
        Self {
            id: m.id,
            img_source: encode_image(m.img_source.as_deref()),
            title: m.title,
            description: m.description,
            hashtag: m.hashtag,
            created_at: m.created_at,
        }
    }
}

/// One flattened (coordinate, entry) row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GeoCatalogRow {
    pub id: i32,
    pub title: String,
    pub name: Option<String>,
    pub contact: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub description: String,
    pub hashtag: String,
    pub created_at: DateTime<Utc>,
    pub img_source: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
}

impl From<GeoCatalogWithCoordinate> for GeoCatalogRow {
    fn from(row: GeoCatalogWithCoordinate) -> Self {
        let GeoCatalogWithCoordinate {
            geo_catalog: g,
            coordinate: c,
        } = row;
        Self {
            id: g.id,
            img_source: encode_image(g.img_source.as_deref()),
            title: g.title,
            name: c.name,
            contact: c.contact,
            city: c.city,
            region: c.region,
            country: c.country,
            description: g.description,
            hashtag: g.hashtag,
            created_at: g.created_at,
            longitude: c.longitude,
            latitude: c.latitude,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GeoCatalogsList {
    pub geo_catalogs: Vec<GeoCatalogRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HashtagsList {
    pub hashtags: Vec<String>,
}
