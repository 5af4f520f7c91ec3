use crate::{Error, Result};
use cv_core::{sample_consensus::Model, FeatureMatch};
use derive_more::{AsRef, Into};
use nalgebra::{Matrix3, Point2};
use std::ops::Mul;

/// Below this magnitude `h33` and the determinant are treated as zero.
const EPSILON: f64 = 1e-12;

/// A projective transform between two planes.
///
/// The matrix is scaled so that `h33 == 1`, leaving the 8 free parameters
/// returned by [`Homography::elements`]. A point `(x, y)` maps to
///
/// ```text
/// ((h11 x + h12 y + h13) / w, (h21 x + h22 y + h23) / w)
/// w = h31 x + h32 y + 1
/// ```
#[derive(Debug, Clone, Copy, PartialEq, AsRef, Into)]
pub struct Homography(Matrix3<f64>);

impl Homography {
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// Creates a homography from `[h11, h12, h13, h21, h22, h23, h31, h32]`.
    pub fn from_elements(elements: [f64; 8]) -> Self {
        let [h11, h12, h13, h21, h22, h23, h31, h32] = elements;
        Self(Matrix3::new(h11, h12, h13, h21, h22, h23, h31, h32, 1.0))
    }

    /// Scales `matrix` so that `h33 == 1`.
    ///
    /// Returns `None` when `h33` is zero or any entry is not finite, since
    /// such a matrix has no representation with 8 parameters.
    pub fn from_matrix(matrix: Matrix3<f64>) -> Option<Self> {
        let scale = matrix[(2, 2)];
        if !scale.is_finite() || scale.abs() <= EPSILON {
            return None;
        }
        let scaled = matrix / scale;
        scaled.iter().all(|v| v.is_finite()).then(|| Self(scaled))
    }

    /// The 8 free parameters `[h11, h12, h13, h21, h22, h23, h31, h32]`.
    pub fn elements(&self) -> [f64; 8] {
        let m = &self.0;
        [
            m[(0, 0)],
            m[(0, 1)],
            m[(0, 2)],
            m[(1, 0)],
            m[(1, 1)],
            m[(1, 2)],
            m[(2, 0)],
            m[(2, 1)],
        ]
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.0
    }

    pub fn determinant(&self) -> f64 {
        self.0.determinant()
    }

    pub fn is_invertible(&self) -> bool {
        self.determinant().abs() > EPSILON
    }

    /// Whether the transform keeps parallel lines parallel (`h31 == h32 == 0`).
    pub fn is_affine(&self) -> bool {
        self.0[(2, 0)] == 0.0 && self.0[(2, 1)] == 0.0
    }

    pub fn inverse(&self) -> Result<Self> {
        if !self.is_invertible() {
            return Err(Error::Singular);
        }
        self.0
            .try_inverse()
            .and_then(Self::from_matrix)
            .ok_or(Error::Singular)
    }

    /// Maps a point. Points sent to the line at infinity get infinite or NaN
    /// coordinates.
    pub fn transform_point(&self, point: &Point2<f64>) -> Point2<f64> {
        let p = self.0 * point.to_homogeneous();
        Point2::new(p.x / p.z, p.y / p.z)
    }

    pub fn transform_points(&self, points: &[Point2<f64>]) -> Vec<Point2<f64>> {
        points.iter().map(|p| self.transform_point(p)).collect()
    }

    /// The symmetric transfer error `|a - H⁻¹ b|² + |b - H a|²` given the
    /// already computed inverse.
    pub(crate) fn transfer_error(
        &self,
        inverse: &Homography,
        a: &Point2<f64>,
        b: &Point2<f64>,
    ) -> f64 {
        (a - inverse.transform_point(b)).norm_squared() + (b - self.transform_point(a)).norm_squared()
    }
}

impl Default for Homography {
    fn default() -> Self {
        Self::identity()
    }
}

/// Composition: `(f * g)` applies `g` first.
///
/// The product is rescaled so that `h33 == 1` unless its `h33` vanishes, in
/// which case it is kept as computed.
impl Mul for Homography {
    type Output = Homography;

    fn mul(self, rhs: Homography) -> Homography {
        let product = self.0 * rhs.0;
        Self::from_matrix(product).unwrap_or(Self(product))
    }
}

impl Mul<Point2<f64>> for Homography {
    type Output = Point2<f64>;

    fn mul(self, rhs: Point2<f64>) -> Point2<f64> {
        self.transform_point(&rhs)
    }
}

/// The residual is the symmetric transfer error of the match, or infinity if
/// the homography can not be inverted.
impl Model<FeatureMatch<Point2<f64>>> for Homography {
    fn residual(&self, data: &FeatureMatch<Point2<f64>>) -> f64 {
        let FeatureMatch(a, b) = data;
        match self.inverse() {
            Ok(inverse) => self.transfer_error(&inverse, a, b),
            Err(_) => f64::INFINITY,
        }
    }
}
