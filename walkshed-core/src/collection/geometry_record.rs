use geo::Geometry;
use geojson::{feature::Id, Feature, JsonObject};

/// a single feature of a geometry collection: a decoded geometry along with
/// the attributes and id it was read with.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryRecord {
    pub geometry: Geometry<f64>,
    pub properties: Option<JsonObject>,
    pub id: Option<Id>,
}

impl GeometryRecord {
    pub fn new(geometry: Geometry<f64>, properties: Option<JsonObject>) -> GeometryRecord {
        GeometryRecord {
            geometry,
            properties,
            id: None,
        }
    }

    /// unpacks a GeoJSON feature. features without a geometry or with a geometry
    /// that cannot be decoded are rejected with a message describing why.
    pub fn try_from_feature(feature: Feature) -> Result<GeometryRecord, String> {
        let label = match &feature.id {
            Some(Id::String(s)) => s.to_string(),
            Some(Id::Number(n)) => n.to_string(),
            None => String::from("<no id>"),
        };
        let geom = feature
            .geometry
            .ok_or_else(|| format!("feature {label} has a null geometry"))?;
        let geometry: Geometry<f64> = geom
            .try_into()
            .map_err(|e| format!("failed to decode geometry for feature {label}: {e}"))?;
        Ok(GeometryRecord {
            geometry,
            properties: feature.properties,
            id: feature.id,
        })
    }

    pub fn to_feature(&self) -> Feature {
        Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::from(&self.geometry)),
            id: self.id.clone(),
            properties: self.properties.clone(),
            foreign_members: None,
        }
    }

    /// reads a string attribute, if present
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.get(key))
            .and_then(|v| v.as_str())
    }
}
