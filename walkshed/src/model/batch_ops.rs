use std::path::{Path, PathBuf};

use kdam::tqdm;
use thiserror::Error;
use walkshed_core::{
    buffer::{buffer_collection, BufferConfig, BufferError},
    collection::{CollectionError, Crs, GeometryCollection},
    util::fs::create_dirs,
};

use super::scan::{scan, ArtifactDescriptor, ScanError};

pub const GEOJSON_EXTENSION: &str = "geojson";
const REPROJECTED_PREFIX: &str = "RP";
const BUFFERED_PREFIX: &str = "Buffer";

#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    ScanError {
        #[from]
        source: ScanError,
    },
    #[error(transparent)]
    CollectionError {
        #[from]
        source: CollectionError,
    },
    #[error(transparent)]
    BufferError {
        #[from]
        source: BufferError,
    },
    #[error("failure preparing output directory {path}: {source}")]
    OutputDirectoryError {
        path: String,
        source: std::io::Error,
    },
}

/// tally of a batch of per-file transformations
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub written: usize,
    pub failed: usize,
}

/// `RP <file name>`
pub fn reprojected_name(file_name: &str) -> String {
    format!("{REPROJECTED_PREFIX} {file_name}")
}

/// `Buffer` followed by the file name without its `RP` prefix, so
/// `RP Joined Burbridge Library.geojson` becomes `Buffer Joined Burbridge Library.geojson`
pub fn buffered_name(file_name: &str) -> String {
    match file_name.strip_prefix(REPROJECTED_PREFIX) {
        Some(rest) if rest.starts_with(' ') => format!("{BUFFERED_PREFIX}{rest}"),
        _ => format!("{BUFFERED_PREFIX} {file_name}"),
    }
}

/// reprojects every GeoJSON file of `input_directory` into `target`, writing
/// `RP <name>` files and their descriptors into `output_directory`
pub fn reproject_directory(
    input_directory: &Path,
    output_directory: &Path,
    target: Crs,
) -> Result<BatchSummary, BatchError> {
    run_batch(input_directory, output_directory, "reproject", reprojected_name, |input| {
        Ok(GeometryCollection::read(input)?.to_crs(target)?)
    })
}

/// buffers every GeoJSON file of `input_directory`, writing `Buffer<name>`
/// files and their descriptors into `output_directory`
pub fn buffer_directory(
    input_directory: &Path,
    output_directory: &Path,
    config: &BufferConfig,
) -> Result<BatchSummary, BatchError> {
    config.validate()?;
    run_batch(input_directory, output_directory, "buffer", buffered_name, |input| {
        let collection = GeometryCollection::read(input)?;
        if collection.crs == Crs::wgs84() {
            log::warn!(
                "{} is in geographic coordinates, buffer distance {} is in degrees",
                input.display(),
                config.distance
            );
        }
        Ok(buffer_collection(&collection, config)?)
    })
}

fn run_batch<N, F>(
    input_directory: &Path,
    output_directory: &Path,
    desc: &str,
    rename: N,
    transform: F,
) -> Result<BatchSummary, BatchError>
where
    N: Fn(&str) -> String,
    F: Fn(&Path) -> Result<GeometryCollection, BatchError>,
{
    let inputs = scan(input_directory, GEOJSON_EXTENSION)?;
    create_dirs(output_directory).map_err(|source| BatchError::OutputDirectoryError {
        path: output_directory.display().to_string(),
        source,
    })?;

    let mut summary = BatchSummary::default();
    let total = inputs.len();
    for input in tqdm!(inputs.iter(), total = total, desc = desc.to_string()) {
        let result = output_path(input, output_directory, &rename).and_then(|output| {
            transform(input)?.write(&output)?;
            ArtifactDescriptor::copy_between(input, &output)?;
            Ok(output)
        });
        match result {
            Ok(output) => {
                log::debug!("{desc}: {} -> {}", input.display(), output.display());
                summary.written += 1;
            }
            Err(e) => {
                log::error!("{desc} failed for {}: {e}", input.display());
                summary.failed += 1;
            }
        }
    }
    eprintln!();
    log::info!("{desc}: {} files written, {} failed", summary.written, summary.failed);
    Ok(summary)
}

fn output_path<N>(input: &Path, output_directory: &Path, rename: &N) -> Result<PathBuf, BatchError>
where
    N: Fn(&str) -> String,
{
    let file_name = input.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        ScanError::InvalidFileName(
            input.display().to_string(),
            String::from("file name is missing or not valid UTF-8"),
        )
    })?;
    Ok(output_directory.join(rename(file_name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{point, Geometry};
    use walkshed_core::collection::GeometryRecord;

    #[test]
    fn output_names() {
        assert_eq!(
            reprojected_name("Kirkland RT Walking.geojson"),
            "RP Kirkland RT Walking.geojson"
        );
        assert_eq!(
            buffered_name("RP Joined Burbridge Library.geojson"),
            "Buffer Joined Burbridge Library.geojson"
        );
        assert_eq!(
            buffered_name("RPM Joined North Clinic.geojson"),
            "Buffer RPM Joined North Clinic.geojson"
        );
    }

    #[test]
    fn reproject_then_buffer_directory() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        let projected = dir.path().join("projected");
        let buffered = dir.path().join("buffered");
        create_dirs(&raw).unwrap();

        let input = raw.join("Joined Burbridge Library.geojson");
        GeometryCollection::new(
            Crs::wgs84(),
            vec![GeometryRecord::new(Geometry::Point(point!(x: -123.0, y: 0.0)), None)],
        )
        .write(&input)
        .unwrap();
        ArtifactDescriptor {
            category: Some(String::from("Library")),
            ..Default::default()
        }
        .write_for(&input)
        .unwrap();
        std::fs::write(raw.join("broken.geojson"), "not json").unwrap();

        let summary = reproject_directory(&raw, &projected, Crs::from_epsg(32610)).unwrap();
        assert_eq!(summary, BatchSummary { written: 1, failed: 1 });
        let rp = projected.join("RP Joined Burbridge Library.geojson");
        assert_eq!(GeometryCollection::read(&rp).unwrap().crs, Crs::from_epsg(32610));
        assert_eq!(
            ArtifactDescriptor::read_for(&rp).unwrap().and_then(|d| d.category),
            Some(String::from("Library"))
        );

        let summary = buffer_directory(&projected, &buffered, &BufferConfig::default()).unwrap();
        assert_eq!(summary, BatchSummary { written: 1, failed: 0 });
        let out = GeometryCollection::read(buffered.join("Buffer Joined Burbridge Library.geojson"))
            .unwrap();
        assert_eq!(out.crs, Crs::from_epsg(32610));
        assert!(matches!(out.records[0].geometry, Geometry::Polygon(_)));
    }
}
