use std::path::Path;

use kdam::tqdm;
use thiserror::Error;

use super::{
    batch_ops::GEOJSON_EXTENSION,
    join::join_files,
    report::{ReportError, ReportWriter},
    scan::{scan, AmenityInput, ScanError, WalkshedInput},
};
use crate::config::WalkshedConfig;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failure listing pipeline inputs: {source}")]
    ScanError {
        #[from]
        source: ScanError,
    },
}

/// directories and files a join run reads from and writes to
pub struct PipelinePaths<'a> {
    pub walkshed_directory: &'a Path,
    pub amenity_directory: &'a Path,
    pub output_directory: &'a Path,
    pub report: &'a Path,
}

/// tally of a join run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    pub pairs_joined: usize,
    /// walkshed or amenity files left out due to their names or locations
    pub inputs_skipped: usize,
    pub pairs_failed: usize,
    pub cells_written: usize,
    /// joins whose category has no report column
    pub cells_missing: usize,
}

/// joins every walkshed against every amenity file of its location's region
/// and records each join in the report. every failure is logged and confined
/// to the pair it occurred in.
pub fn run_join_pipeline(
    config: &WalkshedConfig,
    paths: &PipelinePaths,
) -> Result<PipelineSummary, PipelineError> {
    let mut summary = PipelineSummary::default();
    let walksheds = scan(paths.walkshed_directory, GEOJSON_EXTENSION)?;
    let amenities = scan(paths.amenity_directory, GEOJSON_EXTENSION)?
        .iter()
        .filter_map(|path| match AmenityInput::try_from_path(path) {
            Ok(amenity) => Some(amenity),
            Err(e) => {
                log::warn!("skipping amenity file {}: {e}", path.display());
                summary.inputs_skipped += 1;
                None
            }
        })
        .collect::<Vec<_>>();
    let writer = ReportWriter::from_config(paths.report, config);

    let total = walksheds.len();
    for path in tqdm!(walksheds.iter(), total = total, desc = "join walksheds") {
        let walkshed = match WalkshedInput::try_from_path(path) {
            Ok(walkshed) => walkshed,
            Err(e) => {
                log::warn!("skipping walkshed file {}: {e}", path.display());
                summary.inputs_skipped += 1;
                continue;
            }
        };
        let region = match config
            .location(&walkshed.location)
            .and_then(|l| l.region.as_deref())
        {
            Some(region) => region,
            None => {
                log::warn!(
                    "skipping walkshed {}: location '{}' has no configured region",
                    path.display(),
                    walkshed.location
                );
                summary.inputs_skipped += 1;
                continue;
            }
        };

        for amenity in amenities.iter().filter(|a| a.region == region) {
            join_pair(&walkshed, amenity, paths.output_directory, &writer, &mut summary);
        }
    }
    eprintln!();
    log::info!(
        "joined {} pairs ({} failed), wrote {} report cells, {} categories without a column, skipped {} inputs",
        summary.pairs_joined,
        summary.pairs_failed,
        summary.cells_written,
        summary.cells_missing,
        summary.inputs_skipped
    );
    Ok(summary)
}

fn join_pair(
    walkshed: &WalkshedInput,
    amenity: &AmenityInput,
    output_directory: &Path,
    writer: &ReportWriter,
    summary: &mut PipelineSummary,
) {
    let outcome = match join_files(walkshed, amenity, output_directory) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!(
                "join of {} with {} failed: {e}",
                walkshed.path.display(),
                amenity.path.display()
            );
            summary.pairs_failed += 1;
            return;
        }
    };
    summary.pairs_joined += 1;
    log::debug!(
        "{}: {} of {} amenities reachable",
        outcome.name,
        outcome.reachable_count,
        outcome.amenity_count()
    );

    let artifact = match outcome.primary_artifact() {
        Some(artifact) => artifact,
        None => {
            log::info!("{} has no amenities, no report cell written", outcome.name);
            return;
        }
    };
    match writer.record(&walkshed.location, &walkshed.profile, &amenity.category, artifact) {
        Ok(_) => summary.cells_written += 1,
        Err(e @ ReportError::CategoryColumnMissing { .. }) => {
            log::warn!("{}: {e}", outcome.name);
            summary.cells_missing += 1;
        }
        Err(e) => {
            log::error!("recording {} in {} failed: {e}", outcome.name, writer.path().display());
            summary.pairs_failed += 1;
        }
    }
}
