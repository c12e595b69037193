//! Measurement constants and runtime configuration defaults

use crate::math::metric::Metric;

// Strategy defaults
/// Metric used for centroid distances when none is requested
pub const DEFAULT_METRIC: Metric = Metric::Euclidean;

/// Border distance at which expanded objects count as touching
pub const EXPANSION_ADJACENCY_DMAX: f64 = 1.0;

// Input discovery
/// File extensions recognized as label masks
pub const MASK_EXTENSIONS: [&str; 3] = ["tif", "tiff", "png"];

// Output settings
/// Directory created next to the masks when no destination is given
pub const DEFAULT_DEST_DIR: &str = "neighbors";
/// Extension of neighbor table files
pub const TABLE_EXTENSION: &str = "csv";
/// Extension of exported graph files
pub const GRAPH_EXTENSION: &str = "dot";
/// Column header of every neighbor table
pub const TABLE_HEADER: [&str; 3] = ["Object", "Neighbor", "Distance"];
/// First column of per-object attribute tables
pub const OBJECT_COLUMN: &str = "Object";

// Progress bar display settings
/// Interval between progress bar redraws in milliseconds
pub const PROGRESS_TICK_MS: u64 = 120;
