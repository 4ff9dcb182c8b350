//! Numeric-stats collaborators.
//!
//! Engines in this module consume and return bare [`ndarray`] arrays; the
//! stage wrappers in [`crate::preprocessing`] own all label and row-index
//! bookkeeping. Keeping the math behind this seam means a wrapper is
//! composition over an engine value, never an extension of it.

pub mod pca;

pub use pca::PrincipalComponents;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Per-column mean/std statistics for z-score scaling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardStats {
    /// Column means (zeros when centering is disabled).
    pub mean: Vec<f64>,
    /// Column standard deviations, population form, with zero mapped to one
    /// so constant columns pass through unscaled.
    pub std: Vec<f64>,
}

impl StandardStats {
    /// Learn mean and std per column.
    pub fn fit(data: &Array2<f64>, with_mean: bool, with_std: bool) -> Self {
        let cols = data.ncols();
        let rows = data.nrows().max(1) as f64;

        let mean: Vec<f64> = if with_mean {
            (0..cols)
                .map(|j| data.column(j).sum() / rows)
                .collect()
        } else {
            vec![0.0; cols]
        };

        let std: Vec<f64> = if with_std {
            (0..cols)
                .map(|j| {
                    let m = data.column(j).sum() / rows;
                    let var = data.column(j).iter().map(|v| (v - m).powi(2)).sum::<f64>() / rows;
                    let s = var.sqrt();
                    if s == 0.0 {
                        1.0
                    } else {
                        s
                    }
                })
                .collect()
        } else {
            vec![1.0; cols]
        };

        Self { mean, std }
    }

    /// `(x - mean) / std`, column-wise.
    pub fn apply(&self, data: &Array2<f64>) -> Array2<f64> {
        let mut out = data.clone();
        for (j, mut col) in out.columns_mut().into_iter().enumerate() {
            col.mapv_inplace(|v| (v - self.mean[j]) / self.std[j]);
        }
        out
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }
}

/// Per-column min/scale statistics for range scaling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangeStats {
    /// Observed column minimums.
    pub min: Vec<f64>,
    /// Multiplier `(target_max - target_min) / (max - min)`, with a constant
    /// column mapped to a unit scale.
    pub scale: Vec<f64>,
    /// Lower bound of the target range.
    pub target_min: f64,
}

impl RangeStats {
    /// Learn per-column minimum and scale toward the target range.
    pub fn fit(data: &Array2<f64>, target_min: f64, target_max: f64) -> Self {
        let cols = data.ncols();
        let mut min = vec![f64::INFINITY; cols];
        let mut max = vec![f64::NEG_INFINITY; cols];
        for j in 0..cols {
            for &v in data.column(j) {
                if v < min[j] {
                    min[j] = v;
                }
                if v > max[j] {
                    max[j] = v;
                }
            }
        }
        let target_range = target_max - target_min;
        let scale = min
            .iter()
            .zip(max.iter())
            .map(|(&lo, &hi)| {
                let range = hi - lo;
                if range == 0.0 {
                    1.0
                } else {
                    target_range / range
                }
            })
            .collect();
        Self {
            min,
            scale,
            target_min,
        }
    }

    /// `(x - min) * scale + target_min`, column-wise.
    pub fn apply(&self, data: &Array2<f64>) -> Array2<f64> {
        let mut out = data.clone();
        for (j, mut col) in out.columns_mut().into_iter().enumerate() {
            col.mapv_inplace(|v| (v - self.min[j]) * self.scale[j] + self.target_min);
        }
        out
    }

    pub fn n_features(&self) -> usize {
        self.min.len()
    }
}

/// Per-column empirical-quantile landmarks mapping values onto `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuantileMap {
    /// Sorted landmark values per column, one entry per requested quantile.
    pub references: Vec<Vec<f64>>,
}

impl QuantileMap {
    /// Learn `n_quantiles` evenly spaced landmarks per column.
    pub fn fit(data: &Array2<f64>, n_quantiles: usize) -> Self {
        let n_quantiles = n_quantiles.max(2);
        let references = (0..data.ncols())
            .map(|j| {
                let mut sorted: Vec<f64> = data.column(j).to_vec();
                sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                (0..n_quantiles)
                    .map(|q| {
                        let frac = q as f64 / (n_quantiles - 1) as f64;
                        interpolate(&sorted, frac * (sorted.len() - 1) as f64)
                    })
                    .collect()
            })
            .collect();
        Self { references }
    }

    /// Map each value through its column's empirical CDF. Values outside the
    /// observed range clip to 0 or 1.
    pub fn apply(&self, data: &Array2<f64>) -> Array2<f64> {
        let mut out = data.clone();
        for (j, mut col) in out.columns_mut().into_iter().enumerate() {
            let refs = &self.references[j];
            col.mapv_inplace(|v| cdf_position(refs, v));
        }
        out
    }

    pub fn n_features(&self) -> usize {
        self.references.len()
    }
}

/// Fraction of the landmark grid at or below `v`, linearly interpolated
/// between the two surrounding landmarks.
fn cdf_position(refs: &[f64], v: f64) -> f64 {
    let n = refs.len();
    if v <= refs[0] {
        return 0.0;
    }
    if v >= refs[n - 1] {
        return 1.0;
    }
    let upper = refs.partition_point(|&r| r < v).min(n - 1);
    let lower = upper - 1;
    let (lo, hi) = (refs[lower], refs[upper]);
    let frac = if hi == lo { 0.0 } else { (v - lo) / (hi - lo) };
    (lower as f64 + frac) / (n - 1) as f64
}

/// Linear interpolation into a sorted slice at a fractional index.
pub(crate) fn interpolate(sorted: &[f64], idx: f64) -> f64 {
    let lower = idx.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let frac = idx - lower as f64;
    sorted[lower] * (1.0 - frac) + sorted[upper] * frac
}
