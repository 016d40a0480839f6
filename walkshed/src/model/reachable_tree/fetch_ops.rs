use std::path::{Path, PathBuf};

use itertools::Itertools;
use kdam::tqdm;
use walkshed_core::{collection::CollectionError, util::fs::create_dirs};

use super::{
    ReachableTree, ReachableTreeError, ReachableTreeLayer, ReachableTreeQuery,
    ReachableTreeSource,
};
use crate::{
    config::{LocationConfig, Origin, ProfileConfig, WalkshedConfig},
    model::scan::ArtifactDescriptor,
};

/// tally of a batch of reachable tree requests
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub fetched: usize,
    pub failed: usize,
    /// locations left out because they have no configured origin
    pub skipped_locations: usize,
}

/// requests the reachable tree of every (location, profile) pair and writes each
/// response as `<location> RT|Cost|Origin <profile>.geojson` files. only
/// locations with an origin are requested; a non-empty `location_names` further
/// restricts the batch. a failed request is logged and the batch moves on.
pub fn fetch_walksheds(
    source: &dyn ReachableTreeSource,
    config: &WalkshedConfig,
    output_directory: &Path,
    location_names: &[String],
) -> Result<FetchSummary, ReachableTreeError> {
    create_dirs(output_directory).map_err(|source| ReachableTreeError::OutputDirectoryError {
        path: output_directory.display().to_string(),
        source,
    })?;
    for name in location_names.iter() {
        if config.location(name).is_none() {
            log::warn!("location '{name}' is not configured and will not be fetched");
        }
    }

    let mut summary = FetchSummary::default();
    let selected = config
        .locations
        .iter()
        .filter(|l| location_names.is_empty() || location_names.contains(&l.name))
        .collect_vec();
    let mut jobs: Vec<(&LocationConfig, Origin, &ProfileConfig)> = vec![];
    for location in selected {
        match location.origin {
            Some(origin) => jobs.extend(config.profiles.iter().map(|p| (location, origin, p))),
            None => {
                log::debug!("location {} has no origin, skipping", location.name);
                summary.skipped_locations += 1;
            }
        }
    }

    let total = jobs.len();
    let job_iter = tqdm!(jobs.into_iter(), total = total, desc = "fetch walksheds");
    for (location, origin, profile) in job_iter {
        let query = ReachableTreeQuery::new(&origin, profile, config.reachable_tree.max_cost);
        let result = source
            .reachable_tree(&query)
            .and_then(|tree| write_reachable_tree(&tree, &location.name, &profile.name, output_directory));
        match result {
            Ok(_) => summary.fetched += 1,
            Err(e) => {
                log::error!("walkshed {} {} abandoned: {e}", location.name, profile.name);
                summary.failed += 1;
            }
        }
    }
    eprintln!();
    log::info!(
        "fetched {} walksheds, {} failed, {} locations without an origin",
        summary.fetched,
        summary.failed,
        summary.skipped_locations
    );
    Ok(summary)
}

/// writes every layer of a reachable tree along with a descriptor naming its
/// location and profile
pub fn write_reachable_tree(
    tree: &ReachableTree,
    location: &str,
    profile: &str,
    output_directory: &Path,
) -> Result<Vec<PathBuf>, ReachableTreeError> {
    let mut written = Vec::with_capacity(ReachableTreeLayer::ALL.len());
    for layer in ReachableTreeLayer::ALL {
        let path = output_directory.join(layer.file_name(location, profile));
        let contents = serde_json::to_string(tree.layer(layer)).map_err(CollectionError::from)?;
        std::fs::write(&path, contents).map_err(|source| CollectionError::WriteError {
            path: path.display().to_string(),
            source,
        })?;
        ArtifactDescriptor {
            location: Some(location.to_string()),
            profile: Some(profile.to_string()),
            ..Default::default()
        }
        .write_for(&path)?;
        written.push(path);
    }
    Ok(written)
}
