//! Pairwise distance metrics between object centroids
//!
//! Names follow the scipy convention used by most imaging pipelines so that
//! tables produced here can be compared directly against existing results.

use crate::io::error::{NeighborError, invalid_parameter};
use ndarray::Array2;
use std::fmt;
use std::str::FromStr;

/// Distance metric over 2D coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Metric {
    /// Straight-line distance
    #[default]
    Euclidean,
    /// Squared straight-line distance
    SqEuclidean,
    /// Sum of absolute coordinate differences (Manhattan)
    Cityblock,
    /// Largest absolute coordinate difference
    Chebyshev,
    /// Minkowski distance with exponent `p >= 1`
    Minkowski(f64),
}

impl Metric {
    /// Distance between two (row, col) points
    pub fn distance(self, a: [f64; 2], b: [f64; 2]) -> f64 {
        let dr = (a[0] - b[0]).abs();
        let dc = (a[1] - b[1]).abs();
        match self {
            Self::Euclidean => dr.hypot(dc),
            Self::SqEuclidean => dr.mul_add(dr, dc * dc),
            Self::Cityblock => dr + dc,
            Self::Chebyshev => dr.max(dc),
            Self::Minkowski(p) => (dr.powf(p) + dc.powf(p)).powf(p.recip()),
        }
    }

    /// Whether this metric is plain Euclidean distance
    pub const fn is_euclidean(self) -> bool {
        matches!(self, Self::Euclidean)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Euclidean => write!(f, "euclidean"),
            Self::SqEuclidean => write!(f, "sqeuclidean"),
            Self::Cityblock => write!(f, "cityblock"),
            Self::Chebyshev => write!(f, "chebyshev"),
            Self::Minkowski(p) => write!(f, "minkowski:{p}"),
        }
    }
}

impl FromStr for Metric {
    type Err = NeighborError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "euclidean" => Ok(Self::Euclidean),
            "sqeuclidean" => Ok(Self::SqEuclidean),
            "cityblock" | "manhattan" => Ok(Self::Cityblock),
            "chebyshev" => Ok(Self::Chebyshev),
            "minkowski" => Ok(Self::Minkowski(2.0)),
            _ => {
                let Some(exponent) = name.strip_prefix("minkowski:") else {
                    return Err(invalid_parameter(
                        "metric",
                        &s,
                        &"expected euclidean, sqeuclidean, cityblock, chebyshev or minkowski[:p]",
                    ));
                };
                match exponent.parse::<f64>() {
                    Ok(p) if p.is_finite() && p >= 1.0 => Ok(Self::Minkowski(p)),
                    _ => Err(invalid_parameter(
                        "metric",
                        &s,
                        &"minkowski exponent must be a finite number >= 1",
                    )),
                }
            }
        }
    }
}

/// Full symmetric distance matrix between points, zero on the diagonal
pub fn pairwise_distances(points: &[[f64; 2]], metric: Metric) -> Array2<f64> {
    let n = points.len();
    let mut distances = Array2::zeros((n, n));

    for (i, &a) in points.iter().enumerate() {
        for (j, &b) in points.iter().enumerate().skip(i + 1) {
            let d = metric.distance(a, b);
            if let Some(v) = distances.get_mut([i, j]) {
                *v = d;
            }
            if let Some(v) = distances.get_mut([j, i]) {
                *v = d;
            }
        }
    }

    distances
}
