use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::CollectionError;

/// EPSG code of WGS84 geographic coordinates, the GeoJSON default.
pub const WGS84_EPSG: u32 = 4326;

const OGC_CRS84: &str = "urn:ogc:def:crs:OGC:1.3:CRS84";
const OGC_CRS84_SHORT: &str = "urn:ogc:def:crs:OGC::CRS84";

/// a coordinate reference system identified by its EPSG code.
///
/// collections are compared by CRS before any spatial predicate is evaluated,
/// so two values are equal only when they name the same EPSG code.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Crs {
    epsg: u32,
}

impl Crs {
    pub fn from_epsg(epsg: u32) -> Crs {
        Crs { epsg }
    }

    pub fn wgs84() -> Crs {
        Crs { epsg: WGS84_EPSG }
    }

    pub fn epsg(&self) -> u32 {
        self.epsg
    }

    /// the OGC URN used when writing the `crs` member of a GeoJSON document
    pub fn urn(&self) -> String {
        format!("urn:ogc:def:crs:EPSG::{}", self.epsg)
    }

    /// builds the legacy GeoJSON `crs` member for this CRS
    pub fn to_geojson_member(&self) -> serde_json::Value {
        json!({
            "type": "name",
            "properties": { "name": self.urn() }
        })
    }

    /// reads a CRS from the legacy GeoJSON `crs` member, which has the form
    /// `{"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::32610"}}`.
    pub fn from_geojson_member(member: &serde_json::Value) -> Result<Crs, CollectionError> {
        let name = member
            .get("properties")
            .and_then(|p| p.get("name"))
            .and_then(|n| n.as_str())
            .ok_or_else(|| {
                CollectionError::UnsupportedCrs(format!("crs member has no name: {member}"))
            })?;
        Crs::try_from(name)
    }
}

impl Default for Crs {
    fn default() -> Self {
        Crs::wgs84()
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{}", self.epsg)
    }
}

impl TryFrom<&str> for Crs {
    type Error = CollectionError;

    /// accepts `EPSG:32610`, `EPSG::32610`, `urn:ogc:def:crs:EPSG::32610`,
    /// `urn:ogc:def:crs:EPSG:9.9.1:32610`, a bare `32610` and the OGC CRS84 URNs.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed == OGC_CRS84 || trimmed == OGC_CRS84_SHORT {
            return Ok(Crs::wgs84());
        }
        let upper = trimmed.to_uppercase();
        let code = match upper.rfind("EPSG") {
            Some(idx) => upper[idx + 4..].rsplit(':').next().unwrap_or_default(),
            None => upper.as_str(),
        };
        code.trim()
            .parse::<u32>()
            .map(Crs::from_epsg)
            .map_err(|e| CollectionError::UnsupportedCrs(format!("'{value}': {e}")))
    }
}

impl TryFrom<String> for Crs {
    type Error = CollectionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Crs::try_from(value.as_str())
    }
}

impl From<Crs> for String {
    fn from(value: Crs) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_urn_forms() {
        assert_eq!(
            Crs::try_from("urn:ogc:def:crs:EPSG::32610").unwrap(),
            Crs::from_epsg(32610)
        );
        assert_eq!(
            Crs::try_from("urn:ogc:def:crs:EPSG:9.9.1:3857").unwrap(),
            Crs::from_epsg(3857)
        );
        assert_eq!(Crs::try_from(OGC_CRS84).unwrap(), Crs::wgs84());
    }

    #[test]
    fn parses_short_forms() {
        assert_eq!(Crs::try_from("EPSG:3031").unwrap(), Crs::from_epsg(3031));
        assert_eq!(Crs::try_from("epsg::32610").unwrap(), Crs::from_epsg(32610));
        assert_eq!(Crs::try_from("4326").unwrap(), Crs::wgs84());
    }

    #[test]
    fn rejects_garbage() {
        assert!(Crs::try_from("WGS 84 / UTM zone 10N").is_err());
        assert!(Crs::try_from("EPSG:").is_err());
    }

    #[test]
    fn geojson_member_round_trip() {
        let crs = Crs::from_epsg(32610);
        let member = crs.to_geojson_member();
        assert_eq!(
            member["properties"]["name"],
            serde_json::Value::from("urn:ogc:def:crs:EPSG::32610")
        );
        assert_eq!(Crs::from_geojson_member(&member).unwrap(), crs);
    }
}
