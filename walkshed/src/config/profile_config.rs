use serde::{Deserialize, Serialize};

/// a mobility profile along with the routing costs used to build its walkshed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProfileConfig {
    pub name: String,
    /// 1-based row offset of this profile within a report location block
    pub rank: usize,
    /// maximum uphill incline tolerated, as a fraction
    pub uphill: f64,
    /// maximum downhill incline tolerated, as a fraction
    pub downhill: f64,
    pub avoid_curbs: bool,
    /// preference for avoiding streets, in [0, 1]
    pub street_avoidance: f64,
}
