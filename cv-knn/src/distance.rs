//! Distance functions over fixed-length vectors.
//!
//! Every function expects both slices to have the same length. The index and
//! the classifier validate dimensions before calling into these, so here a
//! mismatch is only caught by `debug_assert!`.

use crate::{Error, Result};
use nalgebra::{DMatrix, DVector};
use num_traits::PrimInt;

/// A distance between two vectors of equal length.
///
/// Implemented by the metric types in this module and by any closure
/// `Fn(&[f64], &[f64]) -> f64`, so a custom distance can be plugged in
/// wherever a metric is expected.
pub trait Metric {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;

    /// The vector length this metric is bound to, if any.
    ///
    /// Indexes and classifiers refuse points of any other length up front.
    fn dimensions(&self) -> Option<usize> {
        None
    }
}

impl<F> Metric for F
where
    F: Fn(&[f64], &[f64]) -> f64,
{
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        self(a, b)
    }
}

/// A metric whose value is bounded from below by a function of the difference
/// along any single coordinate.
///
/// For every pair of vectors `a` and `b` and every axis `i`,
/// `axis_distance(a[i] - b[i]) <= distance(a, b)` must hold. The kd-tree
/// relies on this to skip subtrees on the far side of a splitting plane.
pub trait AxisBounded: Metric {
    fn axis_distance(&self, delta: f64) -> f64;
}

/// Straight-line distance.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Euclidean;

/// Euclidean distance without the square root.
///
/// Ranks neighbors identically to [`Euclidean`] while being cheaper.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct SquaredEuclidean;

/// Sum of absolute coordinate differences (L1).
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Manhattan;

/// Largest absolute coordinate difference (L∞).
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Chebyshev;

/// Number of coordinates which differ.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Hamming;

/// Bhattacharyya distance between two histograms. See [`bhattacharyya`].
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Bhattacharyya;

impl Metric for Euclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        euclidean(a, b)
    }
}

impl AxisBounded for Euclidean {
    fn axis_distance(&self, delta: f64) -> f64 {
        delta.abs()
    }
}

impl Metric for SquaredEuclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        squared_euclidean(a, b)
    }
}

impl AxisBounded for SquaredEuclidean {
    fn axis_distance(&self, delta: f64) -> f64 {
        delta * delta
    }
}

impl Metric for Manhattan {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        manhattan(a, b)
    }
}

impl AxisBounded for Manhattan {
    fn axis_distance(&self, delta: f64) -> f64 {
        delta.abs()
    }
}

impl Metric for Chebyshev {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        chebyshev(a, b)
    }
}

impl AxisBounded for Chebyshev {
    fn axis_distance(&self, delta: f64) -> f64 {
        delta.abs()
    }
}

impl Metric for Hamming {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        hamming(a, b) as f64
    }
}

impl AxisBounded for Hamming {
    fn axis_distance(&self, delta: f64) -> f64 {
        if delta == 0.0 {
            0.0
        } else {
            1.0
        }
    }
}

impl Metric for Bhattacharyya {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        bhattacharyya(a, b)
    }
}

pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    squared_euclidean(a, b).sqrt()
}

pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

pub fn manhattan(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(&x, &y)| (x - y).abs()).sum()
}

pub fn chebyshev(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Counts the coordinates at which `a` and `b` differ.
pub fn hamming(a: &[f64], b: &[f64]) -> usize {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

/// Counts the differing bits between two packed binary descriptors.
pub fn hamming_bits<T: PrimInt>(a: &[T], b: &[T]) -> u32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(&x, &y)| (x ^ y).count_ones()).sum()
}

/// Bhattacharyya distance `-ln(Σ sqrt(p_i q_i))` between two histograms.
///
/// The histograms are expected to be normalized. Disjoint histograms have an
/// infinite distance.
pub fn bhattacharyya(p: &[f64], q: &[f64]) -> f64 {
    debug_assert_eq!(p.len(), q.len());
    let coefficient: f64 = p.iter().zip(q).map(|(&x, &y)| (x * y).sqrt()).sum();
    -coefficient.ln()
}

/// Bhattacharyya distance between two normal distributions.
///
/// ```text
/// Σ = (Σ1 + Σ2) / 2
/// D = (μ1 - μ2)ᵀ Σ⁻¹ (μ1 - μ2) / 8 + ln(det Σ / sqrt(det Σ1 · det Σ2)) / 2
/// ```
pub fn bhattacharyya_gaussian(
    mean_a: &DVector<f64>,
    covariance_a: &DMatrix<f64>,
    mean_b: &DVector<f64>,
    covariance_b: &DMatrix<f64>,
) -> Result<f64> {
    let dim = mean_a.len();
    for found in [mean_b.len(), covariance_a.nrows(), covariance_b.nrows()] {
        if found != dim {
            return Err(Error::DimensionMismatch {
                expected: dim,
                found,
            });
        }
    }
    let covariance = (covariance_a + covariance_b) * 0.5;
    let cholesky = covariance.clone().cholesky().ok_or(Error::SingularCovariance)?;
    let delta = mean_a - mean_b;
    let mahalanobis = delta.dot(&cholesky.solve(&delta));
    let det_a = covariance_a.determinant();
    let det_b = covariance_b.determinant();
    if det_a <= 0.0 || det_b <= 0.0 {
        return Err(Error::SingularCovariance);
    }
    let ln_ratio = covariance.determinant().ln() - 0.5 * (det_a.ln() + det_b.ln());
    Ok(mahalanobis / 8.0 + ln_ratio / 2.0)
}

/// Mahalanobis distance `sqrt((a - b)ᵀ P (a - b))` with precision matrix `P`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mahalanobis {
    precision: DMatrix<f64>,
}

impl Mahalanobis {
    /// Creates the metric from a symmetric positive definite covariance matrix.
    pub fn new(covariance: DMatrix<f64>) -> Result<Self> {
        if !covariance.is_square() {
            return Err(Error::DimensionMismatch {
                expected: covariance.nrows(),
                found: covariance.ncols(),
            });
        }
        let precision = covariance
            .cholesky()
            .ok_or(Error::SingularCovariance)?
            .inverse();
        Ok(Self { precision })
    }

    /// Creates the metric directly from an inverse covariance matrix.
    ///
    /// The matrix must be square.
    pub fn from_precision(precision: DMatrix<f64>) -> Result<Self> {
        if !precision.is_square() {
            return Err(Error::DimensionMismatch {
                expected: precision.nrows(),
                found: precision.ncols(),
            });
        }
        Ok(Self { precision })
    }

    pub fn precision(&self) -> &DMatrix<f64> {
        &self.precision
    }
}

impl Metric for Mahalanobis {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), self.precision.nrows());
        let delta = DVector::from_iterator(a.len(), a.iter().zip(b).map(|(&x, &y)| x - y));
        delta.dot(&(&self.precision * &delta)).max(0.0).sqrt()
    }

    fn dimensions(&self) -> Option<usize> {
        Some(self.precision.nrows())
    }
}
