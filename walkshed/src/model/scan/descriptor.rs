use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{artifact_name::file_stem, ScanError};
use crate::model::join::Partition;

pub const DESCRIPTOR_SUFFIX: &str = ".descriptor.json";

/// structured metadata stored next to an artifact as `<stem>.descriptor.json`.
/// any field present here takes precedence over the tokens of the file name.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    /// walkshed location, a report block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// amenity region, matched against the region of a location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition: Option<Partition>,
}

impl ArtifactDescriptor {
    /// location of the sidecar belonging to an artifact
    pub fn sidecar_path(artifact: &Path) -> Result<PathBuf, ScanError> {
        let stem = file_stem(artifact)?;
        let file_name = format!("{stem}{DESCRIPTOR_SUFFIX}");
        Ok(match artifact.parent() {
            Some(parent) => parent.join(file_name),
            None => PathBuf::from(file_name),
        })
    }

    /// reads the sidecar of an artifact, if one exists
    pub fn read_for(artifact: &Path) -> Result<Option<ArtifactDescriptor>, ScanError> {
        let path = Self::sidecar_path(artifact)?;
        if !path.is_file() {
            return Ok(None);
        }
        let path_str = path.display().to_string();
        let contents =
            std::fs::read_to_string(&path).map_err(|source| ScanError::DescriptorReadError {
                path: path_str.clone(),
                source,
            })?;
        let descriptor = serde_json::from_str(&contents)
            .map_err(|source| ScanError::DescriptorJsonError {
                path: path_str,
                source,
            })?;
        Ok(Some(descriptor))
    }

    pub fn write_for(&self, artifact: &Path) -> Result<(), ScanError> {
        let path = Self::sidecar_path(artifact)?;
        let path_str = path.display().to_string();
        let contents = serde_json::to_string_pretty(self).map_err(|source| {
            ScanError::DescriptorJsonError {
                path: path_str.clone(),
                source,
            }
        })?;
        std::fs::write(&path, contents).map_err(|source| ScanError::DescriptorWriteError {
            path: path_str,
            source,
        })
    }

    /// carries the descriptor of `source` over to `target`, returning false when
    /// `source` has none
    pub fn copy_between(source: &Path, target: &Path) -> Result<bool, ScanError> {
        match Self::read_for(source)? {
            Some(descriptor) => {
                descriptor.write_for(target)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidecar_sits_next_to_artifact() {
        let path =
            ArtifactDescriptor::sidecar_path(Path::new("/data/RP Burbridge Cost Walking.geojson"))
                .unwrap();
        assert_eq!(
            path,
            PathBuf::from("/data/RP Burbridge Cost Walking.descriptor.json")
        );
    }

    #[test]
    fn write_read_and_copy() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("Burbridge Cost Walking.geojson");
        let target = dir.path().join("RP Burbridge Cost Walking.geojson");
        assert_eq!(ArtifactDescriptor::read_for(&source).unwrap(), None);
        assert!(!ArtifactDescriptor::copy_between(&source, &target).unwrap());

        let descriptor = ArtifactDescriptor {
            location: Some(String::from("Burbridge")),
            profile: Some(String::from("Walking")),
            ..Default::default()
        };
        descriptor.write_for(&source).unwrap();
        assert!(ArtifactDescriptor::copy_between(&source, &target).unwrap());
        assert_eq!(
            ArtifactDescriptor::read_for(&target).unwrap(),
            Some(descriptor)
        );
    }

    #[test]
    fn partition_is_lowercase_on_disk() {
        let descriptor = ArtifactDescriptor {
            partition: Some(Partition::Unreachable),
            ..Default::default()
        };
        let json = serde_json::to_string(&descriptor).unwrap();
        assert_eq!(json, r#"{"partition":"unreachable"}"#);
    }
}
