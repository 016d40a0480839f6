use std::path::Path;

use geo::MapCoords;
use geojson::{FeatureCollection, GeoJson, JsonObject};

use super::{CollectionError, Crs, GeometryRecord};
use crate::projection::Projection;

const CRS_MEMBER: &str = "crs";

/// an ordered set of geometry records sharing one coordinate reference system.
#[derive(Clone, Debug, Default)]
pub struct GeometryCollection {
    pub crs: Crs,
    pub records: Vec<GeometryRecord>,
    /// number of features skipped on read due to null or malformed geometries
    pub dropped: usize,
}

impl GeometryCollection {
    pub fn new(crs: Crs, records: Vec<GeometryRecord>) -> GeometryCollection {
        GeometryCollection {
            crs,
            records,
            dropped: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// reads a GeoJSON FeatureCollection from a file. the CRS is taken from the
    /// legacy `crs` member and falls back to WGS84 when absent. features with null
    /// or undecodable geometries are dropped with a warning.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<GeometryCollection, CollectionError> {
        let filepath = path.as_ref();
        let feature_collection = read_feature_collection(filepath)?;
        let crs = match feature_collection
            .foreign_members
            .as_ref()
            .and_then(|m| m.get(CRS_MEMBER))
        {
            Some(member) => Crs::from_geojson_member(member)?,
            None => Crs::default(),
        };

        let mut records = Vec::with_capacity(feature_collection.features.len());
        let mut dropped = 0;
        for feature in feature_collection.features.into_iter() {
            match GeometryRecord::try_from_feature(feature) {
                Ok(record) => records.push(record),
                Err(msg) => {
                    log::warn!("dropping feature from {}: {msg}", filepath.display());
                    dropped += 1;
                }
            }
        }

        Ok(GeometryCollection {
            crs,
            records,
            dropped,
        })
    }

    /// writes this collection as a GeoJSON FeatureCollection with the CRS
    /// declared in the `crs` member.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), CollectionError> {
        let filepath = path.as_ref();
        let mut foreign_members = JsonObject::new();
        foreign_members.insert(String::from(CRS_MEMBER), self.crs.to_geojson_member());
        let feature_collection = FeatureCollection {
            bbox: None,
            features: self.records.iter().map(|r| r.to_feature()).collect(),
            foreign_members: Some(foreign_members),
        };
        let contents = serde_json::to_string(&feature_collection)?;
        std::fs::write(filepath, contents).map_err(|source| CollectionError::WriteError {
            path: filepath.display().to_string(),
            source,
        })
    }

    /// reprojects every record into the target CRS. a collection already in the
    /// target CRS is returned unchanged.
    pub fn to_crs(self, target: Crs) -> Result<GeometryCollection, CollectionError> {
        if self.crs == target {
            return Ok(self);
        }
        let from = Projection::try_from(self.crs)?;
        let to = Projection::try_from(target)?;
        let records = self
            .records
            .into_iter()
            .map(|record| {
                let geometry = record
                    .geometry
                    .try_map_coords(|coord| from.transform(coord, &to))?;
                Ok(GeometryRecord { geometry, ..record })
            })
            .collect::<Result<Vec<_>, CollectionError>>()?;
        Ok(GeometryCollection {
            crs: target,
            records,
            dropped: self.dropped,
        })
    }
}

/// counts the features of a GeoJSON FeatureCollection file, including any
/// features whose geometry is null.
pub fn count_features<P: AsRef<Path>>(path: P) -> Result<usize, CollectionError> {
    let feature_collection = read_feature_collection(path.as_ref())?;
    Ok(feature_collection.features.len())
}

/// helper to read a FeatureCollection from a file
fn read_feature_collection(filepath: &Path) -> Result<FeatureCollection, CollectionError> {
    let path_str = filepath.display().to_string();
    let contents =
        std::fs::read_to_string(filepath).map_err(|source| CollectionError::ReadError {
            path: path_str.clone(),
            source,
        })?;
    let dataset = contents
        .parse::<GeoJson>()
        .map_err(|e| CollectionError::InvalidGeoJson(path_str.clone(), e.to_string()))?;
    match dataset {
        GeoJson::Geometry(_) => Err(CollectionError::NotAFeatureCollection(
            path_str,
            String::from("Geometry"),
        )),
        GeoJson::Feature(_) => Err(CollectionError::NotAFeatureCollection(
            path_str,
            String::from("Feature"),
        )),
        GeoJson::FeatureCollection(feature_collection) => Ok(feature_collection),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{point, polygon, Geometry};

    const UTM_COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:EPSG::32610" } },
        "features": [
            { "type": "Feature", "properties": { "name": "a" },
              "geometry": { "type": "Point", "coordinates": [550000.0, 5270000.0] } },
            { "type": "Feature", "properties": { "name": "b" }, "geometry": null }
        ]
    }"#;

    #[test]
    fn read_declared_crs_and_drop_null_geometries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("amenities.geojson");
        std::fs::write(&path, UTM_COLLECTION).unwrap();

        let collection = GeometryCollection::read(&path).unwrap();
        assert_eq!(collection.crs, Crs::from_epsg(32610));
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.dropped, 1);
        assert_eq!(collection.records[0].property_str("name"), Some("a"));
        assert_eq!(count_features(&path).unwrap(), 2);
    }

    #[test]
    fn missing_crs_defaults_to_wgs84() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walkshed.geojson");
        std::fs::write(
            &path,
            r#"{"type": "FeatureCollection", "features": []}"#,
        )
        .unwrap();
        let collection = GeometryCollection::read(&path).unwrap();
        assert_eq!(collection.crs, Crs::wgs84());
        assert!(collection.is_empty());
    }

    #[test]
    fn single_feature_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("single.geojson");
        std::fs::write(
            &path,
            r#"{"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}}"#,
        )
        .unwrap();
        match GeometryCollection::read(&path) {
            Err(CollectionError::NotAFeatureCollection(_, kind)) => assert_eq!(kind, "Feature"),
            other => panic!("expected NotAFeatureCollection, found {other:?}"),
        }
    }

    #[test]
    fn write_then_read_keeps_crs_and_properties() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.geojson");
        let mut props = JsonObject::new();
        props.insert(String::from("category"), serde_json::Value::from("Library"));
        let collection = GeometryCollection::new(
            Crs::from_epsg(32610),
            vec![
                GeometryRecord::new(Geometry::Point(point!(x: 1.0, y: 2.0)), Some(props)),
                GeometryRecord::new(
                    Geometry::Polygon(polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)]),
                    None,
                ),
            ],
        );
        collection.write(&path).unwrap();

        let read = GeometryCollection::read(&path).unwrap();
        assert_eq!(read.crs, Crs::from_epsg(32610));
        assert_eq!(read.records, collection.records);
    }

    #[test]
    fn to_crs_moves_geometries_into_target() {
        let collection = GeometryCollection::new(
            Crs::wgs84(),
            vec![GeometryRecord::new(
                Geometry::Point(point!(x: -123.0, y: 0.0)),
                None,
            )],
        );
        let projected = collection.to_crs(Crs::from_epsg(32610)).unwrap();
        assert_eq!(projected.crs, Crs::from_epsg(32610));
        match &projected.records[0].geometry {
            Geometry::Point(p) => {
                // zone 10 central meridian
                assert!((p.x() - 500_000.0).abs() < 0.01);
                assert!(p.y().abs() < 0.01);
            }
            other => panic!("expected point, found {other:?}"),
        }
    }

    #[test]
    fn to_crs_rejects_unsupported_target() {
        let collection = GeometryCollection::new(Crs::wgs84(), vec![]);
        assert!(collection.to_crs(Crs::from_epsg(2263)).is_err());
    }
}
