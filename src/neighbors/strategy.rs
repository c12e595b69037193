//! Strategy tag, runtime configuration and dispatch
//!
//! Every strategy is reached through [`NeighborhoodType::measure`] with the
//! same mask and [`NeighborhoodConfig`]; the configuration carries the
//! default metric explicitly instead of reading it from global state.

use crate::io::configuration::DEFAULT_METRIC;
use crate::io::error::{NeighborError, Result, invalid_parameter};
use crate::math::metric::Metric;
use crate::neighbors::borders::measure_border_neighbors;
use crate::neighbors::centroids::measure_centroid_neighbors;
use crate::neighbors::expansion::measure_expansion_neighbors;
use crate::neighbors::table::NeighborTable;
use crate::spatial::mask::{Label, LabelMask};
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// Neighborhood definition used to relate objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum NeighborhoodType {
    /// Distance between object centroids under a chosen metric
    Centroids,
    /// Minimum Euclidean distance between object borders
    Borders,
    /// Touching after growing every object by `dmax` pixels
    Expansion,
}

impl NeighborhoodType {
    /// Canonical lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Centroids => "centroids",
            Self::Borders => "borders",
            Self::Expansion => "expansion",
        }
    }

    /// Compute the neighbor table of `mask` with this strategy
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid for this strategy:
    /// - `InvalidParameter` for a negative or non-finite `dmax`, or `kmax = 0`
    /// - `InvalidParameterCombination` for centroids without `dmax` or `kmax`
    /// - `UnsupportedMetric` for a non-Euclidean metric with borders or expansion
    /// - `UnsupportedParameterCombination` / `MissingRequiredParameter` for expansion
    pub fn measure<L: Label>(
        self,
        mask: &LabelMask<L>,
        config: &NeighborhoodConfig,
    ) -> Result<NeighborTable<L>> {
        match self {
            Self::Centroids => measure_centroid_neighbors(mask, config),
            Self::Borders => measure_border_neighbors(mask, config),
            Self::Expansion => measure_expansion_neighbors(mask, config),
        }
    }
}

impl fmt::Display for NeighborhoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NeighborhoodType {
    type Err = NeighborError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "centroids" => Ok(Self::Centroids),
            "borders" => Ok(Self::Borders),
            "expansion" => Ok(Self::Expansion),
            _ => Err(invalid_parameter(
                "type",
                &s,
                &"expected centroids, borders or expansion",
            )),
        }
    }
}

/// Parameters shared by all neighborhood strategies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborhoodConfig {
    /// Requested distance metric, `None` for the strategy default
    pub metric: Option<Metric>,
    /// Maximum neighbor distance in pixels
    pub dmax: Option<f64>,
    /// Maximum number of neighbors per object
    pub kmax: Option<usize>,
    /// Metric used when `metric` is `None`
    pub default_metric: Metric,
}

impl Default for NeighborhoodConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl NeighborhoodConfig {
    /// Configuration with no metric, `dmax` or `kmax` set
    pub const fn new() -> Self {
        Self {
            metric: None,
            dmax: None,
            kmax: None,
            default_metric: DEFAULT_METRIC,
        }
    }

    /// Set the distance metric
    #[must_use]
    pub const fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = Some(metric);
        self
    }

    /// Set the maximum neighbor distance
    #[must_use]
    pub const fn with_dmax(mut self, dmax: f64) -> Self {
        self.dmax = Some(dmax);
        self
    }

    /// Set the maximum number of neighbors per object
    #[must_use]
    pub const fn with_kmax(mut self, kmax: usize) -> Self {
        self.kmax = Some(kmax);
        self
    }

    /// Metric to use, falling back to the configured default
    pub fn effective_metric(&self) -> Metric {
        self.metric.unwrap_or(self.default_metric)
    }

    /// Check `dmax` and `kmax` values independently of any strategy
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `dmax` is negative or not finite, or `kmax` is zero
    pub fn validate(&self) -> Result<()> {
        if let Some(dmax) = self.dmax.filter(|d| !d.is_finite() || *d < 0.0) {
            return Err(invalid_parameter(
                "dmax",
                &dmax,
                &"must be a finite, non-negative distance",
            ));
        }
        if self.kmax == Some(0) {
            return Err(invalid_parameter("kmax", &0, &"must be at least 1"));
        }
        Ok(())
    }

    // Border-based strategies only measure Euclidean distance
    pub(crate) fn ensure_euclidean(&self, neighborhood: NeighborhoodType) -> Result<()> {
        match self.metric {
            Some(metric) if !metric.is_euclidean() => Err(NeighborError::UnsupportedMetric {
                neighborhood: neighborhood.name(),
                metric: metric.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// Compute the neighbor table of `mask` with the given strategy
///
/// # Errors
///
/// See [`NeighborhoodType::measure`]
pub fn measure_neighbors<L: Label>(
    mask: &LabelMask<L>,
    neighborhood: NeighborhoodType,
    config: &NeighborhoodConfig,
) -> Result<NeighborTable<L>> {
    neighborhood.measure(mask, config)
}
