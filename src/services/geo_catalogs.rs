use crate::{
    db::record_operation,
    entities::{
        coordinate,
        geo_catalog::{self, NewGeoCatalog, MAX_HASHTAG_LEN},
    },
    errors::ServiceError,
    services::coordinates::{find_by_position, CoordinateWithCatalogs},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use std::{sync::Arc, time::Instant};
use tracing::{debug, info, instrument};

/// Catalog entry to attach to the coordinate at (`latitude`, `longitude`)
#[derive(Debug, Clone, PartialEq)]
pub struct CreateGeoCatalogInput {
    pub entry: NewGeoCatalog,
    pub latitude: f64,
    pub longitude: f64,
}

/// Listing filters. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoCatalogFilter {
    /// Case-sensitive substring of the entry hashtag
    pub hashtag: Option<String>,
    /// Exact match on the owning coordinate's region
    pub region: Option<String>,
}

impl GeoCatalogFilter {
    fn hashtag(&self) -> Option<&str> {
        self.hashtag.as_deref().filter(|h| !h.is_empty())
    }

    fn region(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.is_empty())
    }
}

/// One catalog entry joined with the coordinate that owns it
#[derive(Debug, Clone, PartialEq)]
pub struct GeoCatalogWithCoordinate {
    pub geo_catalog: geo_catalog::Model,
    pub coordinate: coordinate::Model,
}

#[derive(Clone)]
pub struct GeoCatalogService {
    db: Arc<DatabaseConnection>,
}

impl GeoCatalogService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Appends an entry to the coordinate at the given position and returns
    /// that coordinate with its full entry list. Nothing is written when no
    /// coordinate matches.
    #[instrument(skip(self, input), fields(latitude = input.latitude, longitude = input.longitude, hashtag = %input.entry.hashtag))]
    pub async fn create_geo_catalog(
        &self,
        input: CreateGeoCatalogInput,
    ) -> Result<CoordinateWithCatalogs, ServiceError> {
        let started = Instant::now();
        let result = self.attach_entry(input).await;
        record_operation("create_geo_catalog", started, &result);

        let owner = result?;
        info!(
            coordinate_id = owner.coordinate.id,
            total_catalogs = owner.geo_catalogs.len(),
            "Attached geo catalog entry"
        );
        Ok(owner)
    }

    async fn attach_entry(
        &self,
        input: CreateGeoCatalogInput,
    ) -> Result<CoordinateWithCatalogs, ServiceError> {
        let txn = self.db.begin().await?;

        let coordinate = find_by_position(&txn, input.latitude, input.longitude)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "no coordinate at ({}, {})",
                    input.latitude, input.longitude
                ))
            })?;

        let created = coordinate.add_geo_catalog(input.entry).insert(&txn).await?;
        debug!(geo_catalog_id = created.id, "Inserted geo catalog entry");

        let geo_catalogs = coordinate
            .find_related(geo_catalog::Entity)
            .order_by_asc(geo_catalog::Column::Id)
            .all(&txn)
            .await?;

        txn.commit().await?;

        Ok(CoordinateWithCatalogs {
            coordinate,
            geo_catalogs,
        })
    }

    /// One row per (coordinate, entry) pair, ordered by entry id
    #[instrument(skip(self))]
    pub async fn list_geo_catalogs(
        &self,
        filter: GeoCatalogFilter,
    ) -> Result<Vec<GeoCatalogWithCoordinate>, ServiceError> {
        let started = Instant::now();
        let result = self.search(&filter).await;
        record_operation("list_geo_catalogs", started, &result);
        result
    }

    async fn search(
        &self,
        filter: &GeoCatalogFilter,
    ) -> Result<Vec<GeoCatalogWithCoordinate>, ServiceError> {
        let mut query = geo_catalog::Entity::find()
            .find_also_related(coordinate::Entity)
            .order_by_asc(geo_catalog::Column::Id);

        // LIKE narrows the candidates; its case folding and wildcards are
        // corrected by the exact substring check below. Needles longer than
        // any stored hashtag skip it, as SQLite caps LIKE pattern length.
        if let Some(needle) = filter.hashtag() {
            if !needle.contains('\\') && needle.chars().count() <= MAX_HASHTAG_LEN {
                query = query.filter(geo_catalog::Column::Hashtag.contains(needle));
            }
        }
        if let Some(region) = filter.region() {
            query = query.filter(coordinate::Column::Region.eq(region));
        }

        let rows = query.all(&*self.db).await?;

        Ok(rows
            .into_iter()
            .filter_map(|(geo_catalog, coordinate)| {
                coordinate.map(|coordinate| GeoCatalogWithCoordinate {
                    geo_catalog,
                    coordinate,
                })
            })
            .filter(|row| {
                filter
                    .hashtag()
                    .map_or(true, |needle| row.geo_catalog.hashtag.contains(needle))
            })
            .collect())
    }

    /// Deletes exactly one entry. A missing id and an unknown id are both
    /// `NotFound` and leave the store unchanged.
    #[instrument(skip(self))]
    pub async fn delete_geo_catalog(
        &self,
        id: Option<i32>,
    ) -> Result<geo_catalog::Model, ServiceError> {
        let id = id.ok_or_else(|| ServiceError::NotFound("geo catalog id is required".into()))?;

        let started = Instant::now();
        let result = self.remove_entry(id).await;
        record_operation("delete_geo_catalog", started, &result);

        let removed = result?;
        info!(geo_catalog_id = removed.id, "Deleted geo catalog entry");
        Ok(removed)
    }

    async fn remove_entry(&self, id: i32) -> Result<geo_catalog::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let entry = geo_catalog::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("no geo catalog with id {}", id)))?;

        geo_catalog::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(entry)
    }

    /// Every distinct hashtag, sorted ascending
    #[instrument(skip(self))]
    pub async fn list_hashtags(&self) -> Result<Vec<String>, ServiceError> {
        let started = Instant::now();
        let result = geo_catalog::Entity::find()
            .select_only()
            .column(geo_catalog::Column::Hashtag)
            .distinct()
            .into_tuple::<String>()
            .all(&*self.db)
            .await
            .map_err(ServiceError::from);
        record_operation("list_hashtags", started, &result);

        let mut hashtags = result?;
        hashtags.sort();
        hashtags.dedup();
        Ok(hashtags)
    }
}
