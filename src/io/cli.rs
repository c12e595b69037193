//! Command-line interface for batch neighbor measurement over label masks

use crate::io::batch::{MeasuredMask, collect_mask_files, output_path, try_measure_from_disk};
use crate::io::configuration::{DEFAULT_DEST_DIR, GRAPH_EXTENSION, TABLE_EXTENSION};
use crate::io::error::{NeighborError, Result};
use crate::io::progress::ProgressManager;
use crate::math::metric::Metric;
use crate::neighbors::strategy::{NeighborhoodConfig, NeighborhoodType};
use crate::spatial::mask::LabelMask;
use clap::Parser;
use log::LevelFilter;
use ndarray::Array2;
use simple_logger::SimpleLogger;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cellnbr")]
#[command(
    author,
    version,
    about = "Measure object neighborhoods in segmented tissue masks"
)]
/// Command-line arguments for neighbor measurement
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Mask file or directory of masks (TIFF or PNG)
    #[arg(value_name = "MASKS")]
    pub target: PathBuf,

    /// Neighborhood definition
    #[arg(short = 't', long = "type", value_enum)]
    pub neighborhood: NeighborhoodType,

    /// Distance metric for centroid neighborhoods (e.g. euclidean, cityblock, minkowski:3)
    #[arg(short, long, value_parser = parse_metric)]
    pub metric: Option<Metric>,

    /// Maximum neighbor distance in pixels
    #[arg(short, long)]
    pub dmax: Option<f64>,

    /// Maximum number of neighbors per object
    #[arg(short, long)]
    pub kmax: Option<usize>,

    /// Output directory [default: a `neighbors` directory next to each mask]
    #[arg(short = 'o', long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Also export each neighbor graph as Graphviz DOT
    #[arg(short, long)]
    pub graph: bool,

    /// Directory of per-object `<mask stem>.csv` attribute tables attached to graph nodes
    #[arg(short, long, value_name = "DIR")]
    pub attributes: Option<PathBuf>,

    /// Process masks even if their table exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Only report warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report per-mask details
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_metric(s: &str) -> std::result::Result<Metric, String> {
    s.parse().map_err(|e: NeighborError| e.to_string())
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Strategy parameters from the command line
    pub fn config(&self) -> NeighborhoodConfig {
        NeighborhoodConfig {
            metric: self.metric,
            dmax: self.dmax,
            kmax: self.kmax,
            ..NeighborhoodConfig::default()
        }
    }

    /// Directory receiving the outputs of `mask_path`
    pub fn destination_for(&self, mask_path: &Path) -> PathBuf {
        self.dest.clone().unwrap_or_else(|| {
            mask_path
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(DEFAULT_DEST_DIR)
        })
    }

    /// Log level selected by `--quiet` / `--verbose`
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Warn
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// Install the console logger at the selected level
    ///
    /// A logger that is already installed is kept.
    pub fn init_logging(&self) {
        if let Err(error) = SimpleLogger::new().with_level(self.log_level()).init() {
            log::debug!("Keeping existing logger: {error}");
        }
    }
}

/// Orchestrates batch measurement of mask files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Measure every mask named by the CLI target
    ///
    /// Masks that fail to load, measure or export are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be resolved or the parameters are
    /// invalid for the requested neighborhood
    pub fn process(&mut self) -> Result<()> {
        let start_time = Instant::now();
        let config = self.cli.config();
        self.check_config(&config)?;

        let files: Vec<PathBuf> = collect_mask_files(&self.cli.target)?
            .into_iter()
            .filter(|path| self.should_process_file(path))
            .collect();

        if files.is_empty() {
            log::info!("No masks to process in {}", self.cli.target.display());
            return Ok(());
        }

        let total = files.len();
        log::info!(
            "Measuring {} neighborhoods for {total} mask(s)",
            self.cli.neighborhood
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(total);
        }

        let progress = self.progress_manager.as_ref();
        let dispatched = files.into_iter().inspect(|path| {
            if let Some(pm) = progress {
                pm.start_file(path);
            }
        });

        let mut written = 0;
        for (path, measured) in try_measure_from_disk(dispatched, self.cli.neighborhood, &config) {
            match self.export(&path, &measured) {
                Ok(()) => written += 1,
                Err(error) => log::error!("Failed to export {}: {error}", path.display()),
            }
        }

        if let Some(pm) = progress {
            pm.finish();
        }

        let failed = total - written;
        if failed > 0 {
            log::warn!("{written} of {total} mask(s) measured, {failed} failed");
        } else {
            log::info!("{written} mask(s) measured in {:.2?}", start_time.elapsed());
        }

        Ok(())
    }

    // Parameter errors are the same for every mask; report them once up front
    fn check_config(&self, config: &NeighborhoodConfig) -> Result<()> {
        let empty = LabelMask::<u8>::new(Array2::zeros((0, 0)));
        self.cli.neighborhood.measure(&empty, config).map(|_| ())
    }

    fn should_process_file(&self, mask_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let table_path = output_path(
            mask_path,
            &self.cli.destination_for(mask_path),
            TABLE_EXTENSION,
        );
        if table_path.exists() {
            log::info!("Skipping: {} (output exists)", mask_path.display());
            false
        } else {
            true
        }
    }

    fn export(&self, mask_path: &Path, measured: &MeasuredMask) -> Result<()> {
        let dest = self.cli.destination_for(mask_path);
        measured.write_table(&output_path(mask_path, &dest, TABLE_EXTENSION))?;

        if self.cli.graph {
            let attributes = self.attributes_for(mask_path);
            measured.write_graph(
                &output_path(mask_path, &dest, GRAPH_EXTENSION),
                attributes.as_deref(),
            )?;
        }

        Ok(())
    }

    fn attributes_for(&self, mask_path: &Path) -> Option<PathBuf> {
        let dir = self.cli.attributes.as_ref()?;
        let path = output_path(mask_path, dir, TABLE_EXTENSION);
        if path.is_file() {
            Some(path)
        } else {
            log::warn!(
                "No attribute table at {} (graph exported without attributes)",
                path.display()
            );
            None
        }
    }
}
