use serde::{Deserialize, Serialize};

/// a housing location that walksheds are generated for.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LocationConfig {
    /// location token used in walkshed file names
    pub name: String,
    /// location token used in amenity file names. locations without a region
    /// are never joined against amenities.
    #[serde(default)]
    pub region: Option<String>,
    /// origin of the walkshed in WGS84 degrees
    #[serde(default)]
    pub origin: Option<Origin>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Origin {
    pub lon: f64,
    pub lat: f64,
}
