use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Longest hashtag the `geo_catalogs.hashtag` column holds
pub const MAX_HASHTAG_LEN: usize = 40;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "geo_catalogs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub img_source: Option<Vec<u8>>,
    pub hashtag: String,
    pub created_at: DateTimeUtc,
    pub coordinate_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::coordinate::Entity",
        from = "Column::CoordinateId",
        to = "super::coordinate::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Coordinate,
}

impl Related<super::coordinate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Coordinate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Catalog entry contents before it is attached to a coordinate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewGeoCatalog {
    pub title: String,
    pub description: String,
    pub img_source: Option<Vec<u8>>,
    pub hashtag: String,
}
