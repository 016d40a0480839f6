use std::path::{Path, PathBuf};

use super::{
    artifact_name::{file_stem, AmenityName, WalkshedName},
    ArtifactDescriptor, ScanError,
};

/// a walkshed file along with the location and profile it was generated for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkshedInput {
    pub path: PathBuf,
    pub location: String,
    pub profile: String,
    /// prefix of the names of join outputs made from this walkshed
    pub base_name: String,
}

/// an amenity file along with the region and category of its records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmenityInput {
    pub path: PathBuf,
    pub region: String,
    pub category: String,
}

impl WalkshedInput {
    /// resolves walkshed metadata from the descriptor sidecar when it names
    /// both location and profile, otherwise from the file name tokens.
    pub fn try_from_path(path: &Path) -> Result<WalkshedInput, ScanError> {
        let stem = file_stem(path)?;
        let descriptor = ArtifactDescriptor::read_for(path)?.unwrap_or_default();
        let parsed = WalkshedName::parse(&stem);
        match (descriptor.location, descriptor.profile, parsed) {
            (Some(location), Some(profile), parsed) => Ok(WalkshedInput {
                path: path.to_path_buf(),
                location,
                profile,
                base_name: parsed.map(|n| n.base).unwrap_or(stem),
            }),
            (location, profile, parsed) => {
                let name = parsed?;
                Ok(WalkshedInput {
                    path: path.to_path_buf(),
                    location: location.unwrap_or(name.location),
                    profile: profile.unwrap_or(name.profile),
                    base_name: name.base,
                })
            }
        }
    }
}

impl AmenityInput {
    /// resolves amenity metadata from the descriptor sidecar when it names
    /// both region and category, otherwise from the file name tokens.
    pub fn try_from_path(path: &Path) -> Result<AmenityInput, ScanError> {
        let stem = file_stem(path)?;
        let descriptor = ArtifactDescriptor::read_for(path)?.unwrap_or_default();
        match (descriptor.region, descriptor.category) {
            (Some(region), Some(category)) => Ok(AmenityInput {
                path: path.to_path_buf(),
                region,
                category,
            }),
            (region, category) => {
                let name = AmenityName::parse(&stem)?;
                Ok(AmenityInput {
                    path: path.to_path_buf(),
                    region: region.unwrap_or(name.region),
                    category: category.unwrap_or(name.category),
                })
            }
        }
    }
}
