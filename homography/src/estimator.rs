use crate::{dlt, has_collinear_triple, normalize_points, Error, Homography, Result};
use cv_core::FeatureMatch;
use cv_ransac::{Ransac, RansacProblem, RansacSettings};
use log::*;
use nalgebra::Point2;
use rand::Rng;

/// The outcome of a robust homography estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct HomographyEstimate {
    /// The homography mapping the first points onto the second.
    pub homography: Homography,
    /// The indices of the correspondences consistent with it.
    pub inliers: Vec<usize>,
}

/// Robust homography estimation with RANSAC over normalized correspondences.
///
/// Both point sets are normalized to a mean distance of `√2` before sampling,
/// so the threshold applies to the symmetric transfer error
/// `|a - H⁻¹ b|² + |b - H a|²` in normalized units rather than pixels. The
/// final homography is refit on all inliers.
#[derive(Debug, Clone)]
pub struct RansacHomography<R> {
    ransac: Ransac<R>,
}

impl<R: Rng> RansacHomography<R> {
    /// Creates the estimator with the given inlier `threshold` and desired
    /// `probability` of drawing an outlier free sample.
    pub fn new(threshold: f64, probability: f64, rng: R) -> Result<Self> {
        let settings = RansacSettings {
            probability,
            ..Default::default()
        };
        Self::with_settings(threshold, settings, rng)
    }

    pub fn with_settings(threshold: f64, settings: RansacSettings, rng: R) -> Result<Self> {
        Ok(Self {
            ransac: Ransac::with_settings(threshold, settings, rng)?,
        })
    }

    pub fn ransac(&self) -> &Ransac<R> {
        &self.ransac
    }

    /// Estimates the homography mapping `match.0` onto `match.1`.
    ///
    /// Returns `Ok(None)` when there are fewer than 4 correspondences or fewer
    /// than 4 inliers.
    pub fn estimate(
        &mut self,
        matches: &[FeatureMatch<Point2<f64>>],
    ) -> Result<Option<HomographyEstimate>> {
        let (a, b): (Vec<_>, Vec<_>) = matches.iter().map(|&FeatureMatch(a, b)| (a, b)).unzip();
        self.estimate_points(&a, &b)
    }

    /// Estimates the homography mapping `a[i]` onto `b[i]`.
    pub fn estimate_points(
        &mut self,
        a: &[Point2<f64>],
        b: &[Point2<f64>],
    ) -> Result<Option<HomographyEstimate>> {
        if a.len() != b.len() {
            return Err(Error::LengthMismatch(a.len(), b.len()));
        }
        if a.len() < 4 {
            debug!("{} correspondences can not determine a homography", a.len());
            return Ok(None);
        }

        let (a, t1) = normalize_points(a)?;
        let (b, t2) = normalize_points(b)?;
        let problem = Correspondences { a: &a, b: &b };

        let inliers = match self.ransac.compute(&problem) {
            Some((_, inliers)) if inliers.len() >= 4 => inliers,
            Some((_, inliers)) => {
                debug!("Only {} inliers found", inliers.len());
                return Ok(None);
            }
            None => {
                debug!("No homography had any inliers");
                return Ok(None);
            }
        };

        let inlier_a: Vec<_> = inliers.iter().map(|&ix| a[ix]).collect();
        let inlier_b: Vec<_> = inliers.iter().map(|&ix| b[ix]).collect();
        let refit = dlt::fit(&inlier_a, &inlier_b).map_err(|e| {
            warn!("Refitting on {} inliers failed: {}", inliers.len(), e);
            e
        })?;
        let homography = dlt::denormalize(*refit.matrix(), &t1, &t2).map_err(|e| {
            warn!("Denormalizing the homography failed: {}", e);
            e
        })?;
        info!("Estimated homography with {} of {} inliers", inliers.len(), a.len());
        Ok(Some(HomographyEstimate {
            homography,
            inliers,
        }))
    }
}

/// Estimates the homography mapping `match.0` onto `match.1` with a seeded or
/// otherwise injected random number generator.
pub fn estimate_homography<R: Rng>(
    matches: &[FeatureMatch<Point2<f64>>],
    threshold: f64,
    probability: f64,
    rng: R,
) -> Result<Option<HomographyEstimate>> {
    RansacHomography::new(threshold, probability, rng)?.estimate(matches)
}

/// Normalized correspondences `a[i] ↔ b[i]`.
struct Correspondences<'a> {
    a: &'a [Point2<f64>],
    b: &'a [Point2<f64>],
}

impl<'a> Correspondences<'a> {
    fn sample(&self, sample: &[usize]) -> (Vec<Point2<f64>>, Vec<Point2<f64>>) {
        sample.iter().map(|&ix| (self.a[ix], self.b[ix])).unzip()
    }
}

impl<'a> RansacProblem for Correspondences<'a> {
    type Model = Homography;

    fn len(&self) -> usize {
        self.a.len()
    }

    fn sample_size(&self) -> usize {
        4
    }

    fn fit(&self, sample: &[usize]) -> Option<Homography> {
        let (a, b) = self.sample(sample);
        dlt::fit(&a, &b)
            .map_err(|e| trace!("Sample fit failed: {}", e))
            .ok()
    }

    fn is_degenerate(&self, sample: &[usize]) -> bool {
        let (a, b) = self.sample(sample);
        has_collinear_triple(&a) || has_collinear_triple(&b)
    }

    fn inliers(&self, model: &Homography, threshold: f64) -> Vec<usize> {
        let inverse = match model.inverse() {
            Ok(inverse) => inverse,
            Err(_) => return vec![],
        };
        (0..self.a.len())
            .filter(|&ix| model.transfer_error(&inverse, &self.a[ix], &self.b[ix]) < threshold)
            .collect()
    }
}
