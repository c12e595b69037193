//! Exact Euclidean distance and feature transforms of binary rasters
//!
//! Separable lower-envelope algorithm (Felzenszwalb & Huttenlocher): a
//! column pass finds the nearest feature row in every column, then a row
//! pass takes the lower envelope of the parabolas `(c - q)^2 + g(q)` rooted at
//! each column `q`. Both passes are linear, so the transform is
//! `O(rows * cols)`. Alongside each distance the pass records which feature
//! pixel attained it, which turns the distance transform into a feature
//! (nearest-label) transform.
//!
//! Ties are resolved towards the smaller row in the column pass and towards
//! the smaller column in the row pass.

use ndarray::{Array2, ArrayView2};

/// Distances to the nearest feature pixel with the coordinates of that pixel
#[derive(Debug, Clone)]
pub struct FeatureTransform {
    /// Euclidean distance to the nearest feature (`+inf` when there is none)
    pub distances: Array2<f64>,
    /// (row, col) of the nearest feature pixel
    pub nearest: Array2<Option<[usize; 2]>>,
}

/// Euclidean distance from every pixel to the nearest `true` pixel
///
/// Feature pixels get distance 0; a raster with no features is `+inf` everywhere.
pub fn euclidean_distance_transform(features: ArrayView2<'_, bool>) -> Array2<f64> {
    euclidean_feature_transform(features).distances
}

/// Euclidean distance and nearest feature pixel for every pixel
pub fn euclidean_feature_transform(features: ArrayView2<'_, bool>) -> FeatureTransform {
    let (rows, cols) = features.dim();
    let column_nearest = nearest_feature_rows(features);

    let mut distances = Array2::from_elem((rows, cols), f64::INFINITY);
    let mut nearest = Array2::from_elem((rows, cols), None);

    let mut sites: Vec<(usize, f64)> = Vec::with_capacity(cols);
    let mut envelope = LowerEnvelope::with_capacity(cols);

    for row in 0..rows {
        sites.clear();
        for col in 0..cols {
            if let Some(&Some(feature_row)) = column_nearest.get([row, col]) {
                let dr = row.abs_diff(feature_row) as f64;
                sites.push((col, dr * dr));
            }
        }
        if sites.is_empty() {
            continue;
        }

        envelope.build(&sites);
        for (col, site) in envelope.query(cols).enumerate() {
            let Some(&(q, g)) = sites.get(site) else {
                continue;
            };
            let dc = col.abs_diff(q) as f64;
            if let Some(d) = distances.get_mut([row, col]) {
                *d = dc.mul_add(dc, g).sqrt();
            }
            let feature_row = column_nearest.get([row, q]).copied().flatten();
            if let (Some(n), Some(r)) = (nearest.get_mut([row, col]), feature_row) {
                *n = Some([r, q]);
            }
        }
    }

    FeatureTransform { distances, nearest }
}

// Per column, the row of the closest feature pixel (smaller row on ties)
fn nearest_feature_rows(features: ArrayView2<'_, bool>) -> Array2<Option<usize>> {
    let (rows, cols) = features.dim();
    let mut nearest = Array2::from_elem((rows, cols), None);

    for col in 0..cols {
        let mut last: Option<usize> = None;
        for row in 0..rows {
            if features.get([row, col]).copied().unwrap_or(false) {
                last = Some(row);
            }
            if let Some(n) = nearest.get_mut([row, col]) {
                *n = last;
            }
        }

        let mut next: Option<usize> = None;
        for row in (0..rows).rev() {
            if features.get([row, col]).copied().unwrap_or(false) {
                next = Some(row);
            }
            if let Some(n) = nearest.get_mut([row, col]) {
                *n = match (*n, next) {
                    (Some(above), Some(below)) if below - row < row - above => Some(below),
                    (None, below) => below,
                    (above, _) => above,
                };
            }
        }
    }

    nearest
}

/// Lower envelope of parabolas `(x - q)^2 + g(q)` over integer sites
struct LowerEnvelope {
    /// Indices into the site list of parabolas on the envelope
    vertices: Vec<usize>,
    /// Left boundary of each envelope parabola
    boundaries: Vec<f64>,
}

impl LowerEnvelope {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            boundaries: Vec::with_capacity(capacity + 1),
        }
    }

    fn build(&mut self, sites: &[(usize, f64)]) {
        self.vertices.clear();
        self.boundaries.clear();

        for (index, &(q, g)) in sites.iter().enumerate() {
            loop {
                let top = self
                    .vertices
                    .last()
                    .and_then(|&v| sites.get(v))
                    .copied()
                    .zip(self.boundaries.last().copied());
                let Some(((p, gp), left)) = top else {
                    self.vertices.push(index);
                    self.boundaries.push(f64::NEG_INFINITY);
                    break;
                };

                let (qf, pf) = (q as f64, p as f64);
                let crossing = (qf.mul_add(qf, g) - pf.mul_add(pf, gp)) / (2.0 * (qf - pf));
                if crossing <= left {
                    self.vertices.pop();
                    self.boundaries.pop();
                } else {
                    self.vertices.push(index);
                    self.boundaries.push(crossing);
                    break;
                }
            }
        }
    }

    // Site index owning each position 0..len; earlier parabola wins at a boundary
    fn query(&self, len: usize) -> impl Iterator<Item = usize> + '_ {
        let mut k = 0;
        (0..len).filter_map(move |x| {
            let x = x as f64;
            while self.boundaries.get(k + 1).is_some_and(|&b| b < x) {
                k += 1;
            }
            self.vertices.get(k).copied()
        })
    }
}
