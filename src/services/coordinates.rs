use crate::{
    db::{is_unique_violation, record_operation},
    entities::{coordinate, geo_catalog},
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
    TransactionTrait,
};
use std::{collections::HashMap, sync::Arc, time::Instant};
use tracing::{info, instrument, warn};

/// Fields accepted when registering a coordinate
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    pub name: Option<String>,
    pub contact: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

/// A coordinate together with every catalog entry it owns, ordered by entry id
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateWithCatalogs {
    pub coordinate: coordinate::Model,
    pub geo_catalogs: Vec<geo_catalog::Model>,
}

/// A coordinate and how many catalog entries reference it
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSummary {
    pub coordinate: coordinate::Model,
    pub total_catalogs: u64,
}

/// First coordinate stored at exactly (`latitude`, `longitude`), if any.
/// The unique index on the pair makes "first" and "only" the same row.
pub async fn find_by_position<C: ConnectionTrait>(
    conn: &C,
    latitude: f64,
    longitude: f64,
) -> Result<Option<coordinate::Model>, DbErr> {
    coordinate::Entity::find()
        .filter(coordinate::Column::Latitude.eq(latitude))
        .filter(coordinate::Column::Longitude.eq(longitude))
        .order_by_asc(coordinate::Column::Id)
        .one(conn)
        .await
}

#[derive(Clone)]
pub struct CoordinateService {
    db: Arc<DatabaseConnection>,
}

impl CoordinateService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Stores a new coordinate. A pair that already exists is rejected with
    /// `DuplicateEntity` and leaves the store unchanged.
    #[instrument(skip(self))]
    pub async fn create_coordinate(
        &self,
        input: NewCoordinate,
    ) -> Result<CoordinateWithCatalogs, ServiceError> {
        let started = Instant::now();
        let result = self.insert_coordinate(input).await;
        record_operation("create_coordinate", started, &result);

        let coordinate = result?;
        info!(
            coordinate_id = coordinate.id,
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            "Created coordinate"
        );

        Ok(CoordinateWithCatalogs {
            coordinate,
            geo_catalogs: Vec::new(),
        })
    }

    async fn insert_coordinate(
        &self,
        input: NewCoordinate,
    ) -> Result<coordinate::Model, ServiceError> {
        let (latitude, longitude) = (input.latitude, input.longitude);
        let txn = self.db.begin().await?;

        let model = coordinate::ActiveModel {
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            name: Set(input.name),
            contact: Set(input.contact),
            city: Set(input.city),
            region: Set(input.region),
            country: Set(input.country),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let coordinate = model.insert(&txn).await.map_err(|e| {
            if is_unique_violation(&e) {
                warn!(latitude, longitude, "Rejected duplicate coordinate");
                ServiceError::DuplicateEntity(format!(
                    "coordinate ({}, {}) already exists",
                    latitude, longitude
                ))
            } else {
                ServiceError::DatabaseError(e)
            }
        })?;

        txn.commit().await?;
        Ok(coordinate)
    }

    /// Every stored coordinate with its catalog count, ordered by id
    #[instrument(skip(self))]
    pub async fn list_coordinates(&self) -> Result<Vec<CoordinateSummary>, ServiceError> {
        let started = Instant::now();
        let result = self.load_summaries().await;
        record_operation("list_coordinates", started, &result);
        result
    }

    async fn load_summaries(&self) -> Result<Vec<CoordinateSummary>, ServiceError> {
        let coordinates = coordinate::Entity::find()
            .order_by_asc(coordinate::Column::Id)
            .all(&*self.db)
            .await?;

        let counts: HashMap<i32, i64> = geo_catalog::Entity::find()
            .select_only()
            .column(geo_catalog::Column::CoordinateId)
            .column_as(geo_catalog::Column::Id.count(), "total")
            .group_by(geo_catalog::Column::CoordinateId)
            .into_tuple::<(i32, i64)>()
            .all(&*self.db)
            .await?
            .into_iter()
            .collect();

        Ok(coordinates
            .into_iter()
            .map(|coordinate| {
                let total = counts.get(&coordinate.id).copied().unwrap_or_default();
                CoordinateSummary {
                    total_catalogs: u64::try_from(total).unwrap_or_default(),
                    coordinate,
                }
            })
            .collect())
    }

    /// Removes the coordinate at exactly (`latitude`, `longitude`).
    /// Catalog entries are never cascaded: a coordinate that still owns
    /// entries is refused with `Conflict`.
    #[instrument(skip(self))]
    pub async fn delete_coordinate(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<coordinate::Model, ServiceError> {
        let started = Instant::now();
        let result = self.remove_coordinate(latitude, longitude).await;
        record_operation("delete_coordinate", started, &result);

        let coordinate = result?;
        info!(coordinate_id = coordinate.id, "Deleted coordinate");
        Ok(coordinate)
    }

    async fn remove_coordinate(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<coordinate::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let coordinate = find_by_position(&txn, latitude, longitude)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "no coordinate at ({}, {})",
                    latitude, longitude
                ))
            })?;

        let owned = coordinate
            .find_related(geo_catalog::Entity)
            .count(&txn)
            .await?;
        if owned > 0 {
            return Err(still_referenced(&coordinate, owned));
        }

        coordinate.clone().delete(&txn).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) {
                still_referenced(&coordinate, 1)
            } else {
                ServiceError::DatabaseError(e)
            }
        })?;

        txn.commit().await?;
        Ok(coordinate)
    }
}

fn still_referenced(coordinate: &coordinate::Model, owned: u64) -> ServiceError {
    ServiceError::Conflict(format!(
        "coordinate ({}, {}) still has {} geo catalog entries",
        coordinate.latitude, coordinate.longitude, owned
    ))
}
