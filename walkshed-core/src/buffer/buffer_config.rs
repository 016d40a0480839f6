use serde::{Deserialize, Serialize};

use super::BufferError;

/// parameters of a buffer operation, expressed in the units of the collection's CRS.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BufferConfig {
    /// buffer distance. 10 is 10 meters for a UTM collection.
    #[serde(default = "BufferConfig::default_distance")]
    pub distance: f64,
    /// number of segments used to approximate a quarter circle
    #[serde(default = "BufferConfig::default_segments")]
    pub segments: u32,
    /// union every buffered feature into a single feature. walksheds are
    /// dissolved, amenities are not.
    #[serde(default)]
    pub dissolve: bool,
}

impl BufferConfig {
    fn default_distance() -> f64 {
        10.0
    }

    fn default_segments() -> u32 {
        5
    }

    pub fn validate(&self) -> Result<(), BufferError> {
        if !self.distance.is_finite() || self.distance <= 0.0 {
            return Err(BufferError::InvalidDistance(self.distance));
        }
        if self.segments == 0 {
            return Err(BufferError::InvalidSegments(self.segments));
        }
        Ok(())
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            distance: Self::default_distance(),
            segments: Self::default_segments(),
            dissolve: false,
        }
    }
}
