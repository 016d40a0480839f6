use std::f64::consts::{FRAC_PI_2, PI};

use geo::{
    algorithm::orient::Direction, unary_union, Coord, Geometry, LineString, MultiPolygon, Orient,
    Polygon,
};

use super::{BufferConfig, BufferError};
use crate::collection::{GeometryCollection, GeometryRecord};

/// buffers every record of a collection. without `dissolve` each record keeps
/// its attributes and receives its own buffer; with `dissolve` all buffers are
/// unioned into a single record without attributes.
pub fn buffer_collection(
    collection: &GeometryCollection,
    config: &BufferConfig,
) -> Result<GeometryCollection, BufferError> {
    config.validate()?;

    let records = if config.dissolve {
        // one union over every part of every record
        let parts = collection
            .records
            .iter()
            .flat_map(|record| buffer_parts(&record.geometry, config))
            .collect::<Vec<_>>();
        log::debug!(
            "dissolving {} buffered parts from {} records",
            parts.len(),
            collection.records.len()
        );
        vec![GeometryRecord::new(
            simplify_multi(unary_union(parts.iter())),
            None,
        )]
    } else {
        collection
            .records
            .iter()
            .map(|record| GeometryRecord {
                geometry: simplify_multi(buffer_geometry(&record.geometry, config)),
                properties: record.properties.clone(),
                id: record.id.clone(),
            })
            .collect()
    };

    Ok(GeometryCollection::new(collection.crs, records))
}

/// buffers a single geometry with round caps and round joins. points become
/// circles, lines become the union of a capsule around each segment, polygons
/// are unioned with a capsule around each segment of their rings.
pub fn buffer_geometry(geometry: &Geometry<f64>, config: &BufferConfig) -> MultiPolygon<f64> {
    unary_union(buffer_parts(geometry, config).iter())
}

/// the overlapping shapes whose union is the buffer of `geometry`
fn buffer_parts(geometry: &Geometry<f64>, config: &BufferConfig) -> Vec<Polygon<f64>> {
    let distance = config.distance;
    let segments = config.segments;
    match geometry {
        Geometry::Point(p) => vec![circle(p.0, distance, segments)],
        Geometry::MultiPoint(mp) => mp
            .iter()
            .map(|p| circle(p.0, distance, segments))
            .collect(),
        Geometry::Line(l) => vec![capsule(l.start, l.end, distance, segments)],
        Geometry::LineString(ls) => line_string_parts(ls, distance, segments),
        Geometry::MultiLineString(mls) => mls
            .iter()
            .flat_map(|ls| line_string_parts(ls, distance, segments))
            .collect(),
        Geometry::Polygon(p) => polygon_parts(p, distance, segments),
        Geometry::MultiPolygon(mp) => mp
            .iter()
            .flat_map(|p| polygon_parts(p, distance, segments))
            .collect(),
        Geometry::Rect(r) => polygon_parts(&r.to_polygon(), distance, segments),
        Geometry::Triangle(t) => polygon_parts(&t.to_polygon(), distance, segments),
        Geometry::GeometryCollection(gc) => {
            gc.iter().flat_map(|g| buffer_parts(g, config)).collect()
        }
    }
}

fn line_string_parts(ls: &LineString<f64>, distance: f64, segments: u32) -> Vec<Polygon<f64>> {
    match ls.0.as_slice() {
        [] => vec![],
        [only] => vec![circle(*only, distance, segments)],
        coords => coords
            .windows(2)
            .map(|pair| capsule(pair[0], pair[1], distance, segments))
            .collect(),
    }
}

/// the polygon itself plus its rings swept by the buffer radius. the ring capsules
/// grow the exterior and shrink the holes.
fn polygon_parts(polygon: &Polygon<f64>, distance: f64, segments: u32) -> Vec<Polygon<f64>> {
    // every part shares the counter-clockwise winding of the circles and capsules
    let oriented = polygon.orient(Direction::Default);
    let mut parts = Vec::with_capacity(1 + oriented.exterior().0.len());
    for ring in std::iter::once(oriented.exterior()).chain(oriented.interiors().iter()) {
        parts.extend(line_string_parts(ring, distance, segments));
    }
    parts.push(oriented);
    parts
}

/// regular polygon approximating a circle with `4 * segments` vertices
fn circle(center: Coord<f64>, radius: f64, segments: u32) -> Polygon<f64> {
    let n = 4 * segments;
    let step = 2.0 * PI / n as f64;
    let ring = (0..n)
        .map(|i| offset(center, radius, i as f64 * step))
        .collect::<Vec<_>>();
    Polygon::new(LineString::new(ring), vec![])
}

/// stadium shape around the segment a -> b with semicircular end caps
fn capsule(a: Coord<f64>, b: Coord<f64>, radius: f64, segments: u32) -> Polygon<f64> {
    if a == b {
        return circle(a, radius, segments);
    }
    let heading = (b.y - a.y).atan2(b.x - a.x);
    let half = 2 * segments;
    let step = PI / half as f64;
    let around_b = (0..=half).map(|i| offset(b, radius, heading - FRAC_PI_2 + i as f64 * step));
    let around_a = (0..=half).map(|i| offset(a, radius, heading + FRAC_PI_2 + i as f64 * step));
    Polygon::new(LineString::new(around_b.chain(around_a).collect()), vec![])
}

fn offset(center: Coord<f64>, radius: f64, angle: f64) -> Coord<f64> {
    Coord {
        x: center.x + radius * angle.cos(),
        y: center.y + radius * angle.sin(),
    }
}

/// single-part results are written as plain polygons
fn simplify_multi(mp: MultiPolygon<f64>) -> Geometry<f64> {
    if mp.0.len() == 1 {
        let mut polygons = mp.0;
        Geometry::Polygon(polygons.remove(0))
    } else {
        Geometry::MultiPolygon(mp)
    }
}
