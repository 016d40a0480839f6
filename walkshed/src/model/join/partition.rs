use std::{fmt::Display, path::Path};

use serde::{Deserialize, Serialize};

use crate::model::scan::{artifact_name::first_token, ArtifactDescriptor, ScanError};

/// the two sides of a spatial join of amenities against a walkshed.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    /// amenities intersecting at least one walkshed geometry
    Reachable,
    /// amenities intersecting no walkshed geometry
    Unreachable,
}

impl Partition {
    /// leading file name token of artifacts holding this partition
    pub fn prefix(&self) -> &'static str {
        match self {
            Partition::Reachable => "Reachable",
            Partition::Unreachable => "Unreachable",
        }
    }

    pub fn file_name(&self, output_name: &str) -> String {
        format!("{} {output_name}.geojson", self.prefix())
    }

    /// partition encoded in the first token of a file name
    pub fn from_file_name(path: &Path) -> Option<Partition> {
        match first_token(path)?.as_str() {
            "Reachable" => Some(Partition::Reachable),
            "Unreachable" => Some(Partition::Unreachable),
            _ => None,
        }
    }

    /// partition of an artifact, read from its descriptor when present and
    /// otherwise from its file name
    pub fn of_artifact(path: &Path) -> Result<Option<Partition>, ScanError> {
        let from_descriptor = ArtifactDescriptor::read_for(path)?.and_then(|d| d.partition);
        Ok(from_descriptor.or_else(|| Partition::from_file_name(path)))
    }
}

impl Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix().to_lowercase())
    }
}
