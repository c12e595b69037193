//! Euclidean border distance neighborhoods
//!
//! For each object (ascending), a distance transform of its own pixels gives
//! every pixel's distance to the object; the border distance to another
//! object is the minimum of that transform over the other object's pixels.
//! Edges are emitted per processed object and are not symmetrized: a reverse
//! edge exists only if it is found when the neighbor is processed in turn.
//!
//! When `dmax` is known the transform is restricted to the object's extent
//! padded by `ceil(dmax)`. Every pixel within `dmax` of the object lies inside
//! that window, so the surviving edges equal those of the full-image transform.

use crate::io::error::Result;
use crate::math::selection::select_neighbors;
use crate::math::transform::euclidean_distance_transform;
use crate::neighbors::strategy::{NeighborhoodConfig, NeighborhoodType};
use crate::neighbors::table::{NeighborEdge, NeighborTable};
use crate::spatial::mask::{Label, LabelMask};
use crate::spatial::window::PixelWindow;
use ndarray::Zip;
use std::collections::BTreeMap;

/// Region over which each object's distance transform is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderWindow {
    /// Padded extent when `dmax` is given, full image otherwise
    #[default]
    Auto,
    /// Always the full image
    Full,
}

/// Neighbors by minimum Euclidean distance between object borders
///
/// # Errors
///
/// Returns `UnsupportedMetric` for any metric other than Euclidean, or
/// `InvalidParameter` if `dmax` / `kmax` are out of range
pub fn measure_border_neighbors<L: Label>(
    mask: &LabelMask<L>,
    config: &NeighborhoodConfig,
) -> Result<NeighborTable<L>> {
    config.validate()?;
    config.ensure_euclidean(NeighborhoodType::Borders)?;
    Ok(border_distance_table(mask, config.dmax, config.kmax, BorderWindow::Auto))
}

/// Border distance table without parameter validation
///
/// `dmax` must be finite and non-negative when given.
pub fn border_distance_table<L: Label>(
    mask: &LabelMask<L>,
    dmax: Option<f64>,
    kmax: Option<usize>,
    window: BorderWindow,
) -> NeighborTable<L> {
    let view = mask.view();
    let dim = mask.dim();
    let mut table = NeighborTable::new();

    for object in &mask.extract_objects() {
        let region = match (window, dmax) {
            (BorderWindow::Auto, Some(d)) => {
                PixelWindow::around(&object.extent, d.ceil() as usize, dim)
            }
            _ => PixelWindow::full(dim),
        };
        let local = region.slice(view);
        let features = local.map(|&v| v == object.label);
        let distances = euclidean_distance_transform(features.view());

        let mut nearest: BTreeMap<L, f64> = BTreeMap::new();
        Zip::from(&local).and(&distances).for_each(|&label, &d| {
            if label.is_object() && label != object.label {
                nearest
                    .entry(label)
                    .and_modify(|best| *best = best.min(d))
                    .or_insert(d);
            }
        });

        let candidates: Vec<(L, f64)> = nearest.into_iter().collect();
        for (neighbor, distance) in select_neighbors(candidates, dmax, kmax) {
            table.push(NeighborEdge::new(object.label, neighbor, Some(distance)));
        }
    }

    table
}
