// Coordinate and catalog services
pub mod coordinates;
pub mod geo_catalogs;

pub use coordinates::{CoordinateService, CoordinateSummary, CoordinateWithCatalogs, NewCoordinate};
pub use geo_catalogs::{
    CreateGeoCatalogInput, GeoCatalogFilter, GeoCatalogService, GeoCatalogWithCoordinate,
};
