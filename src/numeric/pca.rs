//! Principal component decomposition engine.
//!
//! Centers the data, eigendecomposes the covariance matrix with a cyclic
//! Jacobi sweep, and projects onto the leading components. The engine works
//! on bare arrays; the [`crate::preprocessing::Pca`] stage re-attaches
//! component names and the row index.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Convergence threshold on the sum of squared off-diagonal entries.
const JACOBI_TOL: f64 = 1e-12;
/// Upper bound on full Jacobi sweeps.
const JACOBI_MAX_SWEEPS: usize = 64;

/// A fitted principal-component basis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrincipalComponents {
    /// Per-feature means subtracted before projection.
    pub mean: Vec<f64>,
    /// Component loadings, one row per component, ordered by decreasing
    /// explained variance.
    pub components: Vec<Vec<f64>>,
    /// Eigenvalue of the covariance matrix per retained component.
    pub explained_variance: Vec<f64>,
}

impl PrincipalComponents {
    /// Fit a basis of at most `n_components` components.
    ///
    /// The retained count is capped at the feature count and at the sample
    /// count, matching the rank bound of the covariance estimate.
    pub fn fit(data: &Array2<f64>, n_components: usize) -> Self {
        let (rows, cols) = data.dim();
        let k = n_components.min(cols).min(rows);

        let mean: Vec<f64> = (0..cols)
            .map(|j| data.column(j).sum() / rows.max(1) as f64)
            .collect();

        let mut centered = data.clone();
        for (j, mut col) in centered.columns_mut().into_iter().enumerate() {
            col.mapv_inplace(|v| v - mean[j]);
        }

        let cov = covariance(&centered);
        let (eigenvalues, eigenvectors) = jacobi_eigen(cov);

        // Order eigenpairs by decreasing eigenvalue.
        let mut order: Vec<usize> = (0..cols).collect();
        order.sort_by(|&a, &b| {
            eigenvalues[b]
                .partial_cmp(&eigenvalues[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let components: Vec<Vec<f64>> = order
            .iter()
            .take(k)
            .map(|&idx| eigenvectors.column(idx).to_vec())
            .collect();
        let explained_variance: Vec<f64> =
            order.iter().take(k).map(|&idx| eigenvalues[idx]).collect();

        Self {
            mean,
            components,
            explained_variance,
        }
    }

    /// Project rows onto the component basis: `(X - mean) · Vᵀ`.
    pub fn project(&self, data: &Array2<f64>) -> Array2<f64> {
        let (rows, cols) = data.dim();
        let k = self.components.len();
        let mut out = Array2::<f64>::zeros((rows, k));
        for i in 0..rows {
            for (c, component) in self.components.iter().enumerate() {
                let mut acc = 0.0;
                for j in 0..cols {
                    acc += (data[[i, j]] - self.mean[j]) * component[j];
                }
                out[[i, c]] = acc;
            }
        }
        out
    }

    /// Number of retained components.
    pub fn n_components(&self) -> usize {
        self.components.len()
    }

    /// Number of input features the basis was fit on.
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }
}

/// Sample covariance of already-centered data, `ddof = 1` with a floor of
/// one observation.
fn covariance(centered: &Array2<f64>) -> Array2<f64> {
    let (rows, cols) = centered.dim();
    let denom = (rows.saturating_sub(1)).max(1) as f64;
    let mut cov = Array2::<f64>::zeros((cols, cols));
    for a in 0..cols {
        for b in a..cols {
            let mut acc = 0.0;
            for i in 0..rows {
                acc += centered[[i, a]] * centered[[i, b]];
            }
            let v = acc / denom;
            cov[[a, b]] = v;
            cov[[b, a]] = v;
        }
    }
    cov
}

/// Cyclic Jacobi eigendecomposition of a symmetric matrix.
///
/// Returns eigenvalues and the matrix whose columns are the matching
/// eigenvectors. Unsorted; callers order the pairs as needed.
fn jacobi_eigen(mut a: Array2<f64>) -> (Array1<f64>, Array2<f64>) {
    let n = a.nrows();
    let mut v = Array2::<f64>::eye(n);

    for _ in 0..JACOBI_MAX_SWEEPS {
        let off: f64 = (0..n)
            .flat_map(|p| ((p + 1)..n).map(move |q| (p, q)))
            .map(|(p, q)| a[[p, q]] * a[[p, q]])
            .sum();
        if off < JACOBI_TOL {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                if a[[p, q]].abs() < f64::EPSILON {
                    continue;
                }
                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * a[[p, q]]);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let akp = a[[k, p]];
                    let akq = a[[k, q]];
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[[p, k]];
                    let aqk = a[[q, k]];
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let vkp = v[[k, p]];
                    let vkq = v[[k, q]];
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    let eigenvalues = Array1::from_iter((0..n).map(|i| a[[i, i]]));
    (eigenvalues, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_jacobi_diagonal_matrix() {
        let m = array![[3.0, 0.0], [0.0, 1.0]];
        let (vals, vecs) = jacobi_eigen(m);
        assert!((vals[0] - 3.0).abs() < 1e-9);
        assert!((vals[1] - 1.0).abs() < 1e-9);
        assert!((vecs[[0, 0]].abs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_jacobi_symmetric_2x2() {
        // eigenvalues of [[2,1],[1,2]] are 3 and 1
        let m = array![[2.0, 1.0], [1.0, 2.0]];
        let (vals, _) = jacobi_eigen(m);
        let mut sorted: Vec<f64> = vals.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((sorted[0] - 1.0).abs() < 1e-9);
        assert!((sorted[1] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_finds_dominant_direction() {
        // points along y = x, so the first component is ±(1,1)/√2
        let data = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0]];
        let pc = PrincipalComponents::fit(&data, 1);
        assert_eq!(pc.n_components(), 1);
        let c = &pc.components[0];
        assert!((c[0].abs() - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-6);
        assert!((c[0] - c[1]).abs() < 1e-6);
    }

    #[test]
    fn test_fit_caps_components() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        let pc = PrincipalComponents::fit(&data, 10);
        assert_eq!(pc.n_components(), 2);
    }

    #[test]
    fn test_project_centers_data() {
        let data = array![[1.0, 1.0], [3.0, 3.0]];
        let pc = PrincipalComponents::fit(&data, 2);
        let projected = pc.project(&data);
        // projections of two symmetric points sum to zero per component
        for c in 0..projected.ncols() {
            assert!((projected[[0, c]] + projected[[1, c]]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_explained_variance_descending() {
        let data = array![
            [10.0, 0.1],
            [-10.0, -0.1],
            [9.0, 0.2],
            [-9.0, -0.2],
        ];
        let pc = PrincipalComponents::fit(&data, 2);
        assert!(pc.explained_variance[0] >= pc.explained_variance[1]);
    }
}
