use std::path::{Path, PathBuf};

use walkshed_core::{
    collection::{GeometryCollection, GeometryRecord},
    util::{fs::create_dirs, PolygonalRTree},
};

use super::{JoinError, JoinOutcome, Partition};
use crate::model::scan::{
    artifact_name::output_name, AmenityInput, ArtifactDescriptor, WalkshedInput,
};

/// amenities split by whether they intersect a walkshed. both sides share
/// the walkshed's CRS.
#[derive(Clone, Debug)]
pub struct JoinPartition {
    pub reachable: GeometryCollection,
    pub unreachable: GeometryCollection,
    /// amenities dropped on read, outside of both sides
    pub dropped: usize,
}

impl JoinPartition {
    pub fn get(&self, partition: Partition) -> &GeometryCollection {
        match partition {
            Partition::Reachable => &self.reachable,
            Partition::Unreachable => &self.unreachable,
        }
    }
}

/// partitions amenities into those intersecting at least one walkshed geometry
/// and those intersecting none. amenities are reprojected into the walkshed
/// CRS first when the two differ; walksheds are never reprojected.
pub fn spatial_join(
    walksheds: &GeometryCollection,
    amenities: GeometryCollection,
) -> Result<JoinPartition, JoinError> {
    let target = walksheds.crs;
    let amenities = if amenities.crs != target {
        log::info!("reprojecting amenities from {} to {target}", amenities.crs);
        amenities.to_crs(target)?
    } else {
        amenities
    };
    let dropped = amenities.dropped;

    let index = PolygonalRTree::new(
        walksheds
            .records
            .iter()
            .map(|r| (r.geometry.clone(), ()))
            .collect(),
    );
    let (reachable, unreachable): (Vec<GeometryRecord>, Vec<GeometryRecord>) = amenities
        .records
        .into_iter()
        .partition(|record| index.intersects_any(&record.geometry));

    Ok(JoinPartition {
        reachable: GeometryCollection::new(target, reachable),
        unreachable: GeometryCollection::new(target, unreachable),
        dropped,
    })
}

/// joins one walkshed file against one amenity file and writes each non-empty
/// side as `Reachable <name>.geojson` / `Unreachable <name>.geojson` into the
/// output directory, each with a descriptor sidecar. an empty side is not
/// written and any output left for it by an earlier run is removed.
pub fn join_files(
    walkshed: &WalkshedInput,
    amenity: &AmenityInput,
    output_directory: &Path,
) -> Result<JoinOutcome, JoinError> {
    let walksheds = GeometryCollection::read(&walkshed.path)?;
    let amenities = GeometryCollection::read(&amenity.path)?;
    let result = spatial_join(&walksheds, amenities)?;
    if result.dropped > 0 {
        log::warn!(
            "{} amenities of {} had no usable geometry and were left out of the join",
            result.dropped,
            amenity.path.display()
        );
    }

    create_dirs(output_directory).map_err(|source| JoinError::OutputDirectoryError {
        path: output_directory.display().to_string(),
        source,
    })?;
    let name = output_name(&walkshed.base_name, &amenity.category);
    let write = |partition| {
        write_partition(walkshed, amenity, &result, partition, &name, output_directory)
    };
    let reachable = write(Partition::Reachable)?;
    let unreachable = write(Partition::Unreachable)?;

    Ok(JoinOutcome {
        name,
        reachable,
        unreachable,
        reachable_count: result.reachable.len(),
        unreachable_count: result.unreachable.len(),
        dropped: result.dropped,
    })
}

fn write_partition(
    walkshed: &WalkshedInput,
    amenity: &AmenityInput,
    result: &JoinPartition,
    partition: Partition,
    name: &str,
    output_directory: &Path,
) -> Result<Option<PathBuf>, JoinError> {
    let collection = result.get(partition);
    let path = output_directory.join(partition.file_name(name));
    if collection.is_empty() {
        log::info!("no {partition} amenities for {name}, nothing written");
        remove_stale(&path)?;
        remove_stale(&ArtifactDescriptor::sidecar_path(&path)?)?;
        return Ok(None);
    }

    collection.write(&path)?;
    ArtifactDescriptor {
        location: Some(walkshed.location.clone()),
        region: Some(amenity.region.clone()),
        profile: Some(walkshed.profile.clone()),
        category: Some(amenity.category.clone()),
        partition: Some(partition),
    }
    .write_for(&path)?;
    log::debug!(
        "wrote {} {partition} amenities to {}",
        collection.len(),
        path.display()
    );
    Ok(Some(path))
}

fn remove_stale(path: &Path) -> Result<(), JoinError> {
    if path.is_file() {
        log::info!("removing stale output {}", path.display());
        std::fs::remove_file(path).map_err(|source| JoinError::StaleOutputError {
            path: path.display().to_string(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{point, polygon, Geometry};
    use geojson::JsonObject;
    use walkshed_core::collection::Crs;

    fn amenity(x: f64, y: f64, name: &str) -> GeometryRecord {
        let mut props = JsonObject::new();
        props.insert(String::from("name"), serde_json::Value::from(name));
        GeometryRecord::new(Geometry::Point(point!(x: x, y: y)), Some(props))
    }

    fn unit_walkshed(crs: Crs) -> GeometryCollection {
        GeometryCollection::new(
            crs,
            vec![GeometryRecord::new(
                Geometry::Polygon(polygon![
                    (x: 0.0, y: 0.0),
                    (x: 10.0, y: 0.0),
                    (x: 10.0, y: 10.0),
                    (x: 0.0, y: 10.0),
                ]),
                None,
            )],
        )
    }

    fn names(collection: &GeometryCollection) -> Vec<&str> {
        collection
            .records
            .iter()
            .filter_map(|r| r.property_str("name"))
            .collect()
    }

    #[test]
    fn partition_is_exact_complement() {
        let walksheds = unit_walkshed(Crs::from_epsg(32610));
        let amenities = GeometryCollection::new(
            Crs::from_epsg(32610),
            vec![
                amenity(5.0, 5.0, "inside"),
                amenity(10.0, 5.0, "boundary"),
                amenity(15.0, 5.0, "outside"),
                amenity(-1.0, -1.0, "corner"),
            ],
        );
        let result = spatial_join(&walksheds, amenities).unwrap();
        assert_eq!(names(&result.reachable), vec!["inside", "boundary"]);
        assert_eq!(names(&result.unreachable), vec!["outside", "corner"]);
        assert_eq!(result.reachable.len() + result.unreachable.len(), 4);
    }

    #[test]
    fn amenities_take_the_walkshed_crs() {
        // 200m square centered on the zone 10 central meridian at the equator
        let walksheds = GeometryCollection::new(
            Crs::from_epsg(32610),
            vec![GeometryRecord::new(
                Geometry::Polygon(polygon![
                    (x: 499_900.0, y: -100.0),
                    (x: 500_100.0, y: -100.0),
                    (x: 500_100.0, y: 100.0),
                    (x: 499_900.0, y: 100.0),
                ]),
                None,
            )],
        );
        let amenities = GeometryCollection::new(
            Crs::wgs84(),
            vec![amenity(-123.0, 0.0, "near"), amenity(-122.9, 0.0, "far")],
        );
        let result = spatial_join(&walksheds, amenities).unwrap();
        assert_eq!(result.reachable.crs, Crs::from_epsg(32610));
        assert_eq!(result.unreachable.crs, Crs::from_epsg(32610));
        assert_eq!(names(&result.reachable), vec!["near"]);
        assert_eq!(names(&result.unreachable), vec!["far"]);
        match &result.reachable.records[0].geometry {
            Geometry::Point(p) => assert!((p.x() - 500_000.0).abs() < 0.01),
            other => panic!("expected point, found {other:?}"),
        }
    }

    #[test]
    fn disjoint_amenities_write_only_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let walkshed_path = dir.path().join("RP Burbridge Cost Walking.geojson");
        let amenity_path = dir.path().join("Buffer Joined Burbridge Clinic.geojson");
        unit_walkshed(Crs::from_epsg(32610))
            .write(&walkshed_path)
            .unwrap();
        GeometryCollection::new(
            Crs::from_epsg(32610),
            vec![amenity(50.0, 50.0, "a"), amenity(60.0, 60.0, "b")],
        )
        .write(&amenity_path)
        .unwrap();

        let out = dir.path().join("joined");
        // leftover from an earlier run that found reachable clinics
        create_dirs(&out).unwrap();
        let stale = out.join("Reachable Burbridge Cost Walking Clinic.geojson");
        std::fs::write(&stale, "{}").unwrap();

        let outcome = join_files(
            &WalkshedInput::try_from_path(&walkshed_path).unwrap(),
            &AmenityInput::try_from_path(&amenity_path).unwrap(),
            &out,
        )
        .unwrap();
        assert_eq!(outcome.name, "Burbridge Cost Walking Clinic");
        assert_eq!(outcome.reachable, None);
        assert!(!stale.exists());
        let unreachable = outcome.unreachable.clone().unwrap();
        assert_eq!(
            unreachable,
            out.join("Unreachable Burbridge Cost Walking Clinic.geojson")
        );
        assert_eq!(outcome.unreachable_count, 2);
        assert_eq!(outcome.primary_artifact(), Some(unreachable.as_path()));
        assert_eq!(GeometryCollection::read(&unreachable).unwrap().len(), 2);

        let descriptor = ArtifactDescriptor::read_for(&unreachable).unwrap().unwrap();
        assert_eq!(descriptor.partition, Some(Partition::Unreachable));
        assert_eq!(descriptor.category.as_deref(), Some("Clinic"));
        assert_eq!(descriptor.location.as_deref(), Some("Burbridge"));
        // the amenity side keeps its own region
        assert_eq!(descriptor.region.as_deref(), Some("Burbridge"));
        assert_eq!(
            AmenityInput::try_from_path(&unreachable).unwrap().region,
            "Burbridge"
        );
    }
}
