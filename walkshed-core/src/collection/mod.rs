mod collection_error;
mod crs;
mod geometry_collection;
mod geometry_record;

pub use collection_error::CollectionError;
pub use crs::{Crs, WGS84_EPSG};
pub use geometry_collection::{count_features, GeometryCollection};
pub use geometry_record::GeometryRecord;
