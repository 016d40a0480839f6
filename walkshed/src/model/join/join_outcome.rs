use std::path::{Path, PathBuf};

/// what a single walkshed/amenity join produced on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinOutcome {
    /// name shared by both partition outputs
    pub name: String,
    pub reachable: Option<PathBuf>,
    pub unreachable: Option<PathBuf>,
    pub reachable_count: usize,
    pub unreachable_count: usize,
    /// amenities dropped on read due to null or malformed geometries
    pub dropped: usize,
}

impl JoinOutcome {
    /// the artifact the report is counted from: reachable when it was written,
    /// otherwise unreachable, otherwise nothing.
    pub fn primary_artifact(&self) -> Option<&Path> {
        self.reachable.as_deref().or(self.unreachable.as_deref())
    }

    pub fn amenity_count(&self) -> usize {
        self.reachable_count + self.unreachable_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(reachable: Option<&str>, unreachable: Option<&str>) -> JoinOutcome {
        JoinOutcome {
            name: String::from("Argyle Cost Cane Clinic"),
            reachable: reachable.map(PathBuf::from),
            unreachable: unreachable.map(PathBuf::from),
            reachable_count: 0,
            unreachable_count: 0,
            dropped: 0,
        }
    }

    #[test]
    fn reachable_takes_priority() {
        let both = outcome(Some("r.geojson"), Some("u.geojson"));
        assert_eq!(both.primary_artifact(), Some(Path::new("r.geojson")));
        let only_unreachable = outcome(None, Some("u.geojson"));
        assert_eq!(
            only_unreachable.primary_artifact(),
            Some(Path::new("u.geojson"))
        );
        assert_eq!(outcome(None, None).primary_artifact(), None);
    }
}
