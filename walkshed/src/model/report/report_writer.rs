use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use walkshed_core::collection::count_features;

use super::{
    report_layout::{HEADER_ROW, LOCATION_COLUMN, PROFILE_COLUMN},
    ReportError, ReportGrid, ReportLayout,
};
use crate::{config::WalkshedConfig, model::join::Partition};

/// the cell a count was written to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCell {
    pub row: usize,
    pub column: usize,
    pub count: usize,
}

/// writes reachable amenity counts into a report file. the file is opened,
/// updated and saved on every call and is never held open between calls.
pub struct ReportWriter {
    path: PathBuf,
    layout: ReportLayout,
    location_indices: HashMap<String, usize>,
    profile_ranks: HashMap<String, usize>,
}

impl ReportWriter {
    pub fn new(
        path: &Path,
        layout: ReportLayout,
        location_indices: HashMap<String, usize>,
        profile_ranks: HashMap<String, usize>,
    ) -> ReportWriter {
        ReportWriter {
            path: path.to_path_buf(),
            layout,
            location_indices,
            profile_ranks,
        }
    }

    /// builds a writer using the configured location order and profile ranks
    pub fn from_config(path: &Path, config: &WalkshedConfig) -> ReportWriter {
        let location_indices = config
            .locations
            .iter()
            .enumerate()
            .map(|(idx, l)| (l.name.clone(), idx))
            .collect();
        let profile_ranks = config
            .profiles
            .iter()
            .map(|p| (p.name.clone(), p.rank))
            .collect();
        ReportWriter::new(path, config.report, location_indices, profile_ranks)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// records the amenity count of `artifact` in the (location, profile, category)
    /// cell. unreachable artifacts always record 0. the location and profile labels
    /// of the row are written even when the category has no column, in which case
    /// [`ReportError::CategoryColumnMissing`] is returned after saving.
    pub fn record(
        &self,
        location: &str,
        profile: &str,
        category: &str,
        artifact: &Path,
    ) -> Result<RecordedCell, ReportError> {
        let location_index = self
            .location_indices
            .get(location)
            .ok_or_else(|| ReportError::UnknownLocation(location.to_string()))?;
        let rank = self
            .profile_ranks
            .get(profile)
            .ok_or_else(|| ReportError::UnknownProfile(profile.to_string()))?;
        // rank 0 is the block's first row, which is the header row for location 0
        if *rank == 0 || *rank >= self.layout.block_size {
            return Err(ReportError::RankOutsideBlock {
                profile: profile.to_string(),
                rank: *rank,
                block_size: self.layout.block_size,
            });
        }
        let row = self.layout.row(*location_index, *rank);
        let count = artifact_count(artifact)?;

        let mut grid = ReportGrid::open(&self.path)?;
        grid.set(row, LOCATION_COLUMN, location);
        grid.set(row, PROFILE_COLUMN, profile);
        let column = grid.find_in_row(HEADER_ROW, self.layout.category_columns(), category);
        if let Some(column) = column {
            grid.set(row, column, &count.to_string());
        }
        grid.save(&self.path)?;

        match column {
            Some(column) => {
                log::debug!("recorded {count} for {location}/{profile}/{category} at ({row}, {column})");
                Ok(RecordedCell { row, column, count })
            }
            None => Err(ReportError::CategoryColumnMissing {
                category: category.to_string(),
                first: self.layout.first_category_column,
                last: self.layout.last_category_column,
            }),
        }
    }
}

/// number of amenities an artifact contributes to the report: its feature
/// count, or 0 for the unreachable side of a join
pub fn artifact_count(artifact: &Path) -> Result<usize, ReportError> {
    match Partition::of_artifact(artifact)? {
        Some(Partition::Unreachable) => Ok(0),
        _ => Ok(count_features(artifact)?),
    }
}

/// creates a new report with `location`, `profile` and the category labels
/// in the header row. an existing report is only replaced when `overwrite` is set.
pub fn init_report(
    path: &Path,
    layout: &ReportLayout,
    categories: &[String],
    overwrite: bool,
) -> Result<(), ReportError> {
    layout.validate()?;
    if categories.len() > layout.category_capacity() {
        return Err(ReportError::TooManyCategories {
            count: categories.len(),
            capacity: layout.category_capacity(),
        });
    }
    if path.exists() && !overwrite {
        return Err(ReportError::ReportExists(path.display().to_string()));
    }
    let mut grid = ReportGrid::default();
    grid.set(HEADER_ROW, LOCATION_COLUMN, "location");
    grid.set(HEADER_ROW, PROFILE_COLUMN, "profile");
    for (offset, category) in categories.iter().enumerate() {
        grid.set(HEADER_ROW, layout.first_category_column + offset, category);
    }
    grid.save(path)?;
    log::info!(
        "created report {} with categories [{}]",
        path.display(),
        categories.join(", ")
    );
    Ok(())
}
