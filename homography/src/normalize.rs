use crate::{Error, Homography, Result};
use nalgebra::{Point2, Vector2};
use std::f64::consts::SQRT_2;

/// Moves the centroid of `points` to the origin and scales them to a mean
/// distance of `√2` from it.
///
/// Returns the normalized points and the similarity transform which produced
/// them.
pub fn normalize_points(points: &[Point2<f64>]) -> Result<(Vec<Point2<f64>>, Homography)> {
    if points.is_empty() {
        return Err(Error::InsufficientPoints(0));
    }
    let n = points.len() as f64;
    let centroid = points
        .iter()
        .fold(Vector2::zeros(), |sum, p| sum + p.coords)
        / n;
    let mean_distance = points
        .iter()
        .map(|p| (p.coords - centroid).norm())
        .sum::<f64>()
        / n;
    if !mean_distance.is_finite() || mean_distance <= f64::EPSILON {
        return Err(Error::DegeneratePoints);
    }

    let scale = SQRT_2 / mean_distance;
    let transform = Homography::from_elements([
        scale,
        0.0,
        -scale * centroid.x,
        0.0,
        scale,
        -scale * centroid.y,
        0.0,
        0.0,
    ]);
    let normalized = points
        .iter()
        .map(|p| Point2::from((p.coords - centroid) * scale))
        .collect();
    Ok((normalized, transform))
}
