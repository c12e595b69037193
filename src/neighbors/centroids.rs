//! Centroid distance neighborhoods
//!
//! All pairwise centroid distances are computed under the configured metric.
//! With `kmax`, each object keeps its `k` nearest others (nearest first),
//! optionally limited to `dmax`. With only `dmax`, every pair within range
//! is emitted in both directions, objects and neighbors ascending.

use crate::io::error::{NeighborError, Result};
use crate::math::metric::pairwise_distances;
use crate::math::selection::select_neighbors;
use crate::neighbors::strategy::{NeighborhoodConfig, NeighborhoodType};
use crate::neighbors::table::{NeighborEdge, NeighborTable};
use crate::spatial::mask::{Label, LabelMask};

/// Neighbors by distance between object centroids
///
/// # Errors
///
/// Returns `InvalidParameterCombination` if neither `dmax` nor `kmax` is given,
/// or `InvalidParameter` if either value is out of range
pub fn measure_centroid_neighbors<L: Label>(
    mask: &LabelMask<L>,
    config: &NeighborhoodConfig,
) -> Result<NeighborTable<L>> {
    config.validate()?;
    if config.dmax.is_none() && config.kmax.is_none() {
        return Err(NeighborError::InvalidParameterCombination {
            neighborhood: NeighborhoodType::Centroids.name(),
            reason: "at least one of dmax and kmax is required".to_string(),
        });
    }

    let objects = mask.extract_objects();
    let labels = objects.labels();
    let mut table = NeighborTable::new();
    if labels.len() < 2 {
        return Ok(table);
    }

    let distances = pairwise_distances(&objects.centroids(), config.effective_metric());

    for (i, (&object, row)) in labels.iter().zip(distances.outer_iter()).enumerate() {
        let candidates: Vec<(usize, f64)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .collect();

        for (j, distance) in select_neighbors(candidates, config.dmax, config.kmax) {
            if let Some(&neighbor) = labels.get(j) {
                table.push(NeighborEdge::new(object, neighbor, Some(distance)));
            }
        }
    }

    Ok(table)
}
