use std::{collections::HashSet, path::Path};

use ::config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use walkshed_core::{buffer::BufferConfig, collection::Crs};

use super::{ConfigError, LocationConfig, ProfileConfig};
use crate::model::report::ReportLayout;

const DEFAULT_CONFIG: &str = include_str!("walkshed-config-default.toml");

/// settings for the remote reachable-tree service
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ReachableTreeConfig {
    pub url: String,
    /// cost budget of every walkshed query
    pub max_cost: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ReprojectConfig {
    pub target_crs: Crs,
}

/// run configuration shared by every walkshed operation.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WalkshedConfig {
    pub locations: Vec<LocationConfig>,
    pub profiles: Vec<ProfileConfig>,
    pub report: ReportLayout,
    pub reachable_tree: ReachableTreeConfig,
    pub reproject: ReprojectConfig,
    pub buffer: BufferConfig,
}

impl WalkshedConfig {
    /// loads the embedded defaults, optionally overridden by a user TOML or JSON file
    pub fn load(config_file: Option<&Path>) -> Result<WalkshedConfig, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        if let Some(path) = config_file {
            log::info!("reading walkshed configuration from {}", path.display());
            builder = builder.add_source(File::from(path));
        }
        let conf: WalkshedConfig = builder.build()?.try_deserialize()?;
        conf.validate()?;
        Ok(conf)
    }

    /// position of a location in the configured list, which is its report block index
    pub fn location_index(&self, name: &str) -> Option<usize> {
        self.locations.iter().position(|l| l.name == name)
    }

    pub fn location(&self, name: &str) -> Option<&LocationConfig> {
        self.locations.iter().find(|l| l.name == name)
    }

    pub fn profile(&self, name: &str) -> Option<&ProfileConfig> {
        self.profiles.iter().find(|p| p.name == name)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        for location in self.locations.iter() {
            if !names.insert(location.name.as_str()) {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "location '{}' is listed more than once",
                    location.name
                )));
            }
        }

        let mut names = HashSet::new();
        let mut ranks = HashSet::new();
        for profile in self.profiles.iter() {
            if !names.insert(profile.name.as_str()) {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "profile '{}' is listed more than once",
                    profile.name
                )));
            }
            if profile.rank == 0 || profile.rank >= self.report.block_size {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "profile '{}' has rank {} which must be in [1, {})",
                    profile.name, profile.rank, self.report.block_size
                )));
            }
            if !ranks.insert(profile.rank) {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "profile '{}' shares rank {} with another profile",
                    profile.name, profile.rank
                )));
            }
        }

        self.report
            .validate()
            .map_err(|e| ConfigError::InvalidConfiguration(e.to_string()))?;
        self.buffer
            .validate()
            .map_err(|e| ConfigError::InvalidConfiguration(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let conf = WalkshedConfig::load(None).unwrap();
        assert_eq!(conf.location_index("Argyle"), Some(0));
        assert_eq!(conf.location_index("Burbridge"), Some(2));
        assert_eq!(
            conf.location("MaryPilgrim").and_then(|l| l.region.clone()),
            Some(String::from("North"))
        );
        assert_eq!(conf.profile("Walking").map(|p| p.rank), Some(2));
        assert_eq!(conf.profile("Manual").map(|p| p.downhill), Some(0.1));
        assert_eq!(conf.report.block_size, 6);
        assert_eq!(conf.reproject.target_crs, Crs::from_epsg(32610));
        assert_eq!(conf.buffer, BufferConfig::default());
        assert_eq!(conf.reachable_tree.max_cost, 900.0);
    }

    #[test]
    fn user_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("override.toml");
        std::fs::write(
            &path,
            r#"
            [[locations]]
            name = "Burbridge"
            region = "Burbridge"

            [buffer]
            distance = 25.0
            dissolve = true
            "#,
        )
        .unwrap();

        let conf = WalkshedConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(conf.locations.len(), 1);
        assert_eq!(conf.location_index("Burbridge"), Some(0));
        assert_eq!(conf.buffer.distance, 25.0);
        assert!(conf.buffer.dissolve);
        // untouched sections keep their defaults
        assert_eq!(conf.profiles.len(), 5);
    }

    #[test]
    fn rank_outside_block_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(
            &path,
            r#"
            [[profiles]]
            name = "Scooter"
            rank = 6
            uphill = 0.1
            downhill = 0.1
            avoid_curbs = false
            street_avoidance = 0.5
            "#,
        )
        .unwrap();
        match WalkshedConfig::load(Some(path.as_path())) {
            Err(ConfigError::InvalidConfiguration(msg)) => assert!(msg.contains("Scooter")),
            other => panic!("expected invalid configuration, found {other:?}"),
        }
    }
}
