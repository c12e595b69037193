//! Numerical building blocks for the neighborhood strategies

/// Pairwise distance metrics between object centroids
pub mod metric;
/// k-nearest and maximum-distance neighbor selection
pub mod selection;
/// Exact Euclidean distance and feature transforms
pub mod transform;
