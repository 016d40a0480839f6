pub mod fs;
pub mod geo_utils;
mod polygonal_rtree;

pub use polygonal_rtree::PolygonalRTree;
