//! The normalized direct linear transform.
//!
//! Each correspondence `X ↔ x` contributes the three rows of `x × (H X) = 0`
//! to a `3n × 9` system `A h = 0`, whose least squares solution with
//! `|h| = 1` is the right singular vector of the smallest singular value of
//! `A`. Both point sets are normalized first, which keeps the system well
//! conditioned for pixel coordinates.

use crate::{normalize_points, Error, Homography, Result};
use log::*;
use nalgebra::{DMatrix, Matrix3, Point2};

const SVD_EPSILON: f64 = 1e-12;
const SVD_ITERATIONS: usize = 1000;

/// Fits the homography mapping `a[i]` to `b[i]` in the least squares sense.
pub fn fit(a: &[Point2<f64>], b: &[Point2<f64>]) -> Result<Homography> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch(a.len(), b.len()));
    }
    if a.len() < 4 {
        return Err(Error::InsufficientPoints(a.len()));
    }
    let (a_normalized, t1) = normalize_points(a)?;
    let (b_normalized, t2) = normalize_points(b)?;
    let h = solve(&a_normalized, &b_normalized)?;
    denormalize(h, &t1, &t2)
}

/// Turns a homography between normalized sets into one between the original
/// sets: `T2⁻¹ · H · T1`.
pub(crate) fn denormalize(h: Matrix3<f64>, t1: &Homography, t2: &Homography) -> Result<Homography> {
    let t2_inverse = t2.inverse()?;
    Homography::from_matrix(t2_inverse.matrix() * h * t1.matrix()).ok_or(Error::Singular)
}

/// Solves the DLT system for already normalized points.
fn solve(a: &[Point2<f64>], b: &[Point2<f64>]) -> Result<Matrix3<f64>> {
    let mut system = DMatrix::<f64>::zeros(3 * a.len(), 9);
    for (i, (p, q)) in a.iter().zip(b).enumerate() {
        let (px, py) = (p.x, p.y);
        let (x, y) = (q.x, q.y);
        let rows = [
            [0.0, 0.0, 0.0, -px, -py, -1.0, y * px, y * py, y],
            [px, py, 1.0, 0.0, 0.0, 0.0, -x * px, -x * py, -x],
            [-y * px, -y * py, -y, x * px, x * py, x, 0.0, 0.0, 0.0],
        ];
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                system[(3 * i + r, c)] = value;
            }
        }
    }

    let svd = system
        .try_svd(false, true, SVD_EPSILON, SVD_ITERATIONS)
        .ok_or_else(|| {
            warn!("DLT decomposition of {} correspondences did not converge", a.len());
            Error::Decomposition
        })?;
    let v_t = svd.v_t.ok_or(Error::Decomposition)?;
    let smallest = svd
        .singular_values
        .iter()
        .enumerate()
        .min_by_key(|&(_, &n)| float_ord::FloatOrd(n))
        .map(|(ix, _)| ix)
        .ok_or(Error::Decomposition)?;
    let h: Vec<f64> = v_t.row(smallest).iter().copied().collect();
    Ok(Matrix3::from_row_slice(&h))
}
