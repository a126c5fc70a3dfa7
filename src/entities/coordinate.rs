use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use super::geo_catalog::{self, NewGeoCatalog};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "coordinates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub name: Option<String>,
    pub contact: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::geo_catalog::Entity")]
    GeoCatalogs,
}

impl Related<super::geo_catalog::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeoCatalogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Builds a catalog entry owned by this coordinate. The entry is not
    /// persisted until the caller inserts the returned active model.
    pub fn add_geo_catalog(&self, entry: NewGeoCatalog) -> geo_catalog::ActiveModel {
        geo_catalog::ActiveModel {
            title: Set(entry.title),
            description: Set(entry.description),
            img_source: Set(entry.img_source),
            hashtag: Set(entry.hashtag),
            coordinate_id: Set(self.id),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
    }
}
