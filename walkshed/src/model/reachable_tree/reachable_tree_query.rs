use serde::{Deserialize, Serialize};

use crate::config::{Origin, ProfileConfig};

/// parameters of a single walkshed request: an origin in WGS84 degrees and
/// the routing costs of one mobility profile.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReachableTreeQuery {
    pub lon: f64,
    pub lat: f64,
    pub uphill: f64,
    pub downhill: f64,
    pub avoid_curbs: bool,
    pub street_avoidance: f64,
    pub max_cost: f64,
}

impl ReachableTreeQuery {
    pub fn new(origin: &Origin, profile: &ProfileConfig, max_cost: f64) -> ReachableTreeQuery {
        ReachableTreeQuery {
            lon: origin.lon,
            lat: origin.lat,
            uphill: profile.uphill,
            downhill: profile.downhill,
            avoid_curbs: profile.avoid_curbs,
            street_avoidance: profile.street_avoidance,
            max_cost,
        }
    }

    /// URL query parameters in the order and spelling the service expects.
    /// curb avoidance is sent as 0 or 1.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("lon", self.lon.to_string()),
            ("lat", self.lat.to_string()),
            ("uphill", self.uphill.to_string()),
            ("downhill", self.downhill.to_string()),
            ("avoidCurbs", u8::from(self.avoid_curbs).to_string()),
            ("streetAvoidance", self.street_avoidance.to_string()),
            ("max_cost", self.max_cost.to_string()),
        ]
    }
}
