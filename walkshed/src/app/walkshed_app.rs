use std::path::PathBuf;

use clap::{Parser, Subcommand};
use walkshed_core::{buffer::BufferConfig, collection::Crs};

use super::WalkshedCliError;
use crate::{
    config::WalkshedConfig,
    model::{
        batch_ops::{buffer_directory, reproject_directory},
        pipeline::{run_join_pipeline, PipelinePaths},
        reachable_tree::{fetch_walksheds, AccessMapClient},
        report::init_report,
    },
};

/// Command line tool for batch walkshed generation and amenity reachability reporting
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct WalkshedApp {
    /// TOML or JSON file layered over the default configuration
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,
    #[command(subcommand)]
    pub op: WalkshedOperation,
}

#[derive(Debug, Clone, Subcommand)]
pub enum WalkshedOperation {
    /// download reachable trees for every configured location with an origin
    Fetch {
        #[arg(long, help = "directory the RT, Cost and Origin files are written to")]
        output_directory: PathBuf,
        #[arg(long, help = "only fetch these locations")]
        location: Vec<String>,
    },
    /// reproject every GeoJSON file of a directory, writing `RP <name>` files
    Reproject {
        #[arg(long)]
        input_directory: PathBuf,
        #[arg(long)]
        output_directory: PathBuf,
        #[arg(long, help = "target CRS such as EPSG:32610, overrides the configuration")]
        target_crs: Option<String>,
    },
    /// buffer every GeoJSON file of a directory, writing `Buffer <name>` files
    Buffer {
        #[arg(long)]
        input_directory: PathBuf,
        #[arg(long)]
        output_directory: PathBuf,
        #[arg(long, help = "buffer distance in CRS units, overrides the configuration")]
        distance: Option<f64>,
        #[arg(long, help = "segments per quarter circle, overrides the configuration")]
        segments: Option<u32>,
        #[arg(
            long,
            help = "true unions all buffers of a file into one feature, overrides the configuration"
        )]
        dissolve: Option<bool>,
    },
    /// create an empty report with the given category columns
    InitReport {
        #[arg(long)]
        report: PathBuf,
        #[arg(long, required = true, num_args = 1.., help = "category labels of the header row")]
        category: Vec<String>,
        #[arg(long, help = "replace an existing report")]
        overwrite: bool,
    },
    /// join walksheds against amenities and record reachable counts in the report
    Join {
        #[arg(long)]
        walkshed_directory: PathBuf,
        #[arg(long)]
        amenity_directory: PathBuf,
        #[arg(long, help = "directory Reachable and Unreachable files are written to")]
        output_directory: PathBuf,
        #[arg(long)]
        report: PathBuf,
    },
}

impl WalkshedApp {
    pub fn run(self) -> Result<(), WalkshedCliError> {
        let config = WalkshedConfig::load(self.config_file.as_deref())?;
        self.op.run(&config)
    }
}

impl WalkshedOperation {
    pub fn run(&self, config: &WalkshedConfig) -> Result<(), WalkshedCliError> {
        match self {
            WalkshedOperation::Fetch {
                output_directory,
                location,
            } => {
                let client = AccessMapClient::new(&config.reachable_tree.url)?;
                let summary = fetch_walksheds(&client, config, output_directory, location)?;
                eprintln!(
                    "finished. {} walksheds fetched, {} failed",
                    summary.fetched, summary.failed
                );
            }
            WalkshedOperation::Reproject {
                input_directory,
                output_directory,
                target_crs,
            } => {
                let target = match target_crs {
                    Some(crs) => Crs::try_from(crs.as_str())
                        .map_err(|e| WalkshedCliError::InvalidArgument(e.to_string()))?,
                    None => config.reproject.target_crs,
                };
                let summary = reproject_directory(input_directory, output_directory, target)?;
                eprintln!(
                    "finished. {} files reprojected to {target}, {} failed",
                    summary.written, summary.failed
                );
            }
            WalkshedOperation::Buffer {
                input_directory,
                output_directory,
                distance,
                segments,
                dissolve,
            } => {
                let buffer_config =
                    override_buffer_config(&config.buffer, *distance, *segments, *dissolve);
                let summary = buffer_directory(input_directory, output_directory, &buffer_config)?;
                eprintln!(
                    "finished. {} files buffered, {} failed",
                    summary.written, summary.failed
                );
            }
            WalkshedOperation::InitReport {
                report,
                category,
                overwrite,
            } => {
                init_report(report, &config.report, category, *overwrite)?;
            }
            WalkshedOperation::Join {
                walkshed_directory,
                amenity_directory,
                output_directory,
                report,
            } => {
                let paths = PipelinePaths {
                    walkshed_directory,
                    amenity_directory,
                    output_directory,
                    report,
                };
                let summary = run_join_pipeline(config, &paths)?;
                eprintln!(
                    "finished. {} pairs joined, {} report cells written",
                    summary.pairs_joined, summary.cells_written
                );
            }
        }
        Ok(())
    }
}

/// command line values take precedence over the configured buffer settings
fn override_buffer_config(
    configured: &BufferConfig,
    distance: Option<f64>,
    segments: Option<u32>,
    dissolve: Option<bool>,
) -> BufferConfig {
    BufferConfig {
        distance: distance.unwrap_or(configured.distance),
        segments: segments.unwrap_or(configured.segments),
        dissolve: dissolve.unwrap_or(configured.dissolve),
    }
}
