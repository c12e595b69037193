//! Spatial neighbor measurement for segmented multiplexed tissue images
//!
//! Takes integer label masks (one object identifier per pixel, 0 for background)
//! and computes object neighborhoods by centroid distance, Euclidean border
//! distance, or Euclidean pixel expansion, producing flat `Object, Neighbor, Distance`
//! tables ready for serialization or graph construction.

#![forbid(unsafe_code)]

/// Neighbor graph construction from measured tables
pub mod analysis;
/// Input/output operations, batch processing and error handling
pub mod io;
/// Distance metrics, distance transforms and neighbor selection
pub mod math;
/// Neighborhood strategies and the neighbor table
pub mod neighbors;
/// Label masks, object extraction and local windows
pub mod spatial;

pub use io::error::{NeighborError, Result};
pub use neighbors::strategy::{NeighborhoodConfig, NeighborhoodType, measure_neighbors};
pub use neighbors::table::{NeighborEdge, NeighborTable};
pub use spatial::mask::{Label, LabelMask};
