//! k-nearest and maximum-distance selection of neighbor candidates

use std::cmp::Ordering;

/// Pick the neighbors of one object from its candidates
///
/// `candidates` are `(key, distance)` pairs in ascending key order. With
/// `kmax`, the `k` nearest are found by partial selection under the total
/// order (distance, key), so ties at the boundary go to the smaller key,
/// and are returned nearest first. Without `kmax`, candidates keep their
/// ascending key order. In both cases `dmax` then keeps only distances
/// `<= dmax`. Non-finite distances are never selected.
pub fn select_neighbors<K: Ord + Copy>(
    mut candidates: Vec<(K, f64)>,
    dmax: Option<f64>,
    kmax: Option<usize>,
) -> Vec<(K, f64)> {
    candidates.retain(|&(_, d)| d.is_finite());

    if let Some(k) = kmax {
        if k == 0 {
            return Vec::new();
        }
        if k < candidates.len() {
            candidates.select_nth_unstable_by(k - 1, by_distance);
            candidates.truncate(k);
        }
        candidates.sort_unstable_by(by_distance);
    }

    if let Some(dmax) = dmax {
        candidates.retain(|&(_, d)| d <= dmax);
    }

    candidates
}

fn by_distance<K: Ord>(a: &(K, f64), b: &(K, f64)) -> Ordering {
    a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0))
}
