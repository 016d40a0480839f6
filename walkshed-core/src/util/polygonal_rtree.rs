use geo::{Geometry, Intersects};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, RTreeObject};

use super::geo_utils;

type IndexedEnvelope = GeomWithData<Rectangle<(f64, f64)>, usize>;

/// spatial index over arbitrary geometries with attached data. envelopes are
/// stored in an rtree and candidates are confirmed with an exact intersects test.
pub struct PolygonalRTree<D> {
    rtree: RTree<IndexedEnvelope>,
    entries: Vec<(Geometry<f64>, D)>,
}

impl<D> PolygonalRTree<D> {
    /// builds the index. geometries without bounds (empty geometries) cannot
    /// intersect anything and are left out of the rtree.
    pub fn new(entries: Vec<(Geometry<f64>, D)>) -> PolygonalRTree<D> {
        let envelopes = entries
            .iter()
            .enumerate()
            .filter_map(|(idx, (geometry, _))| {
                geo_utils::get_bounding_rectangle(geometry).map(|r| GeomWithData::new(r, idx))
            })
            .collect::<Vec<_>>();
        if envelopes.len() < entries.len() {
            log::debug!(
                "{} empty geometries excluded from spatial index",
                entries.len() - envelopes.len()
            );
        }
        PolygonalRTree {
            rtree: RTree::bulk_load(envelopes),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// all entries whose geometry intersects the query geometry
    pub fn intersection<'a>(
        &'a self,
        query: &'a Geometry<f64>,
    ) -> impl Iterator<Item = &'a (Geometry<f64>, D)> + 'a {
        let candidates = match geo_utils::get_bounding_rectangle(query) {
            Some(rect) => self
                .rtree
                .locate_in_envelope_intersecting(&rect.envelope())
                .map(|node| node.data)
                .collect::<Vec<_>>(),
            None => vec![],
        };
        candidates
            .into_iter()
            .map(move |idx| &self.entries[idx])
            .filter(move |(geometry, _)| geometry.intersects(query))
    }

    /// true if the query geometry intersects at least one indexed geometry
    pub fn intersects_any(&self, query: &Geometry<f64>) -> bool {
        self.intersection(query).next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{point, polygon};

    fn squares() -> PolygonalRTree<&'static str> {
        PolygonalRTree::new(vec![
            (
                Geometry::Polygon(polygon![
                    (x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 2.0),
                ]),
                "west",
            ),
            (
                Geometry::Polygon(polygon![
                    (x: 1.0, y: 0.0), (x: 3.0, y: 0.0), (x: 3.0, y: 2.0), (x: 1.0, y: 2.0),
                ]),
                "east",
            ),
            (
                // triangle whose bbox covers (4.5, 0.5) without the triangle itself doing so
                Geometry::Polygon(polygon![
                    (x: 4.0, y: 0.0), (x: 6.0, y: 2.0), (x: 4.0, y: 2.0),
                ]),
                "triangle",
            ),
        ])
    }

    #[test]
    fn finds_all_intersecting_entries() {
        let index = squares();
        let query = Geometry::Point(point!(x: 1.5, y: 1.0));
        let mut found = index.intersection(&query).map(|(_, d)| *d).collect::<Vec<_>>();
        found.sort();
        assert_eq!(found, vec!["east", "west"]);
    }

    #[test]
    fn bbox_hit_is_confirmed_exactly() {
        let index = squares();
        assert!(!index.intersects_any(&Geometry::Point(point!(x: 5.5, y: 0.5))));
        assert!(index.intersects_any(&Geometry::Point(point!(x: 4.5, y: 1.5))));
    }

    #[test]
    fn boundary_touch_counts_as_intersection() {
        let index = squares();
        assert!(index.intersects_any(&Geometry::Point(point!(x: 3.0, y: 1.0))));
        assert!(!index.intersects_any(&Geometry::Point(point!(x: 3.5, y: 1.0))));
    }
}
