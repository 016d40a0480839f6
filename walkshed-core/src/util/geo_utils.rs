use geo::{BoundingRect, Geometry};
use rstar::primitives::Rectangle;

/// creates a rectangular rtree envelope from the bounding box of a geometry.
///
/// empty geometries have no bounds, so the result may be None
///
/// # Arguments
///
/// * `geometry` - value to create an envelope from
///
/// # Returns
///
/// * an envelope if possible, otherwise None
pub fn get_bounding_rectangle(geometry: &Geometry<f64>) -> Option<Rectangle<(f64, f64)>> {
    geometry
        .bounding_rect()
        .map(|rect| Rectangle::from_corners(rect.min().x_y(), rect.max().x_y()))
}
