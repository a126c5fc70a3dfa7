pub mod coordinate;
pub mod geo_catalog;

pub use coordinate::Entity as Coordinate;
pub use geo_catalog::Entity as GeoCatalog;
