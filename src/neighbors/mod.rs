//! Neighborhood strategies over label masks
//!
//! Three interchangeable strategies share one entry point,
//! [`strategy::NeighborhoodType::measure`], and all of them produce a
//! [`table::NeighborTable`].

/// Euclidean border distance between object footprints
pub mod borders;
/// Pairwise centroid distances with k-nearest and maximum-distance selection
pub mod centroids;
/// Adjacency after Euclidean pixel expansion of every object
pub mod expansion;
/// Strategy tag, runtime configuration and dispatch
pub mod strategy;
/// The flat `Object, Neighbor, Distance` table
pub mod table;
