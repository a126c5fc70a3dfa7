use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_coordinates_table::Migration),
            Box::new(m20240101_000002_create_geo_catalogs_table::Migration),
        ]
    }
}

mod m20240101_000001_create_coordinates_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_coordinates_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Coordinates::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Coordinates::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Coordinates::Latitude).double().not_null())
                        .col(ColumnDef::new(Coordinates::Longitude).double().not_null())
                        .col(ColumnDef::new(Coordinates::Name).string().null())
                        .col(ColumnDef::new(Coordinates::Contact).string().null())
                        .col(ColumnDef::new(Coordinates::City).string().null())
                        .col(ColumnDef::new(Coordinates::Region).string().null())
                        .col(ColumnDef::new(Coordinates::Country).string().null())
                        .col(
                            ColumnDef::new(Coordinates::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            // One row per (latitude, longitude) pair
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_coordinates_lat_lon")
                        .table(Coordinates::Table)
                        .col(Coordinates::Latitude)
                        .col(Coordinates::Longitude)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_coordinates_region")
                        .table(Coordinates::Table)
                        .col(Coordinates::Region)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Coordinates::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Coordinates {
        Table,
        Id,
        Latitude,
        Longitude,
        Name,
        Contact,
        City,
        Region,
        Country,
        CreatedAt,
    }
}

mod m20240101_000002_create_geo_catalogs_table {

    use super::m20240101_000001_create_coordinates_table::Coordinates;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_geo_catalogs_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(GeoCatalogs::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(GeoCatalogs::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(GeoCatalogs::Title).string_len(144).not_null())
                        .col(ColumnDef::new(GeoCatalogs::Description).text().not_null())
                        .col(ColumnDef::new(GeoCatalogs::ImgSource).blob().null())
                        .col(ColumnDef::new(GeoCatalogs::Hashtag).string_len(40).not_null())
                        .col(
                            ColumnDef::new(GeoCatalogs::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(ColumnDef::new(GeoCatalogs::CoordinateId).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_geo_catalogs_coordinate_id")
                                .from(GeoCatalogs::Table, GeoCatalogs::CoordinateId)
                                .to(Coordinates::Table, Coordinates::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::NoAction),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_geo_catalogs_coordinate_id")
                        .table(GeoCatalogs::Table)
                        .col(GeoCatalogs::CoordinateId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_geo_catalogs_hashtag")
                        .table(GeoCatalogs::Table)
                        .col(GeoCatalogs::Hashtag)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(GeoCatalogs::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum GeoCatalogs {
        Table,
        Id,
        Title,
        Description,
        ImgSource,
        Hashtag,
        CreatedAt,
        CoordinateId,
    }
}
