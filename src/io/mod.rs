/// Batch measurement over mask files
pub mod batch;
/// Command-line interface and batch orchestration
pub mod cli;
/// Measurement constants and output settings
pub mod configuration;
/// Error types and result aliases
pub mod error;
/// Label mask decoding from TIFF and PNG
pub mod mask;
/// Progress display for batch runs
pub mod progress;
/// Neighbor and attribute table serialization
pub mod table;
