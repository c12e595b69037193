//! Adjacency after Euclidean pixel expansion
//!
//! Every background pixel within `dmax` of an object takes the label of its
//! nearest object pixel; objects whose expanded footprints touch (border
//! distance of at most one pixel) are neighbors. Distances are not reported
//! because the expansion already encodes them.

use crate::io::configuration::EXPANSION_ADJACENCY_DMAX;
use crate::io::error::{NeighborError, Result};
use crate::math::transform::euclidean_feature_transform;
use crate::neighbors::borders::{BorderWindow, border_distance_table};
use crate::neighbors::strategy::{NeighborhoodConfig, NeighborhoodType};
use crate::neighbors::table::NeighborTable;
use crate::spatial::mask::{Label, LabelMask};
use ndarray::Zip;

/// Neighbors by touching after expanding each object by `dmax` pixels
///
/// # Errors
///
/// Returns an error if:
/// - A non-Euclidean metric is requested (`UnsupportedMetric`)
/// - `kmax` is given (`UnsupportedParameterCombination`)
/// - `dmax` is missing (`MissingRequiredParameter`) or out of range (`InvalidParameter`)
pub fn measure_expansion_neighbors<L: Label>(
    mask: &LabelMask<L>,
    config: &NeighborhoodConfig,
) -> Result<NeighborTable<L>> {
    let neighborhood = NeighborhoodType::Expansion;
    config.ensure_euclidean(neighborhood)?;
    if config.kmax.is_some() {
        return Err(NeighborError::UnsupportedParameterCombination {
            neighborhood: neighborhood.name(),
            parameter: "kmax",
        });
    }
    let Some(dmax) = config.dmax else {
        return Err(NeighborError::MissingRequiredParameter {
            neighborhood: neighborhood.name(),
            parameter: "dmax",
        });
    };
    config.validate()?;

    let expanded = expand_mask(mask, dmax);
    Ok(border_distance_table(
        &expanded,
        Some(EXPANSION_ADJACENCY_DMAX),
        None,
        BorderWindow::Auto,
    )
    .without_distances())
}

/// Grow every object into the background pixels within `dmax` of it
///
/// Each such pixel takes the label of its nearest object pixel. The input mask
/// is left untouched.
pub fn expand_mask<L: Label>(mask: &LabelMask<L>, dmax: f64) -> LabelMask<L> {
    let view = mask.view();
    let objects = view.map(|v| v.is_object());
    let transform = euclidean_feature_transform(objects.view());

    let mut expanded = view.to_owned();
    Zip::from(&mut expanded)
        .and(&transform.distances)
        .and(&transform.nearest)
        .for_each(|label, &d, &nearest| {
            if label.is_object() || d > dmax {
                return;
            }
            if let Some(source) = nearest.and_then(|pos| view.get(pos)) {
                *label = *source;
            }
        });

    LabelMask::new(expanded)
}
