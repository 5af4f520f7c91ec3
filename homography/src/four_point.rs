use crate::{dlt, has_collinear_triple, Homography};
use arrayvec::ArrayVec;
use cv_core::{sample_consensus::Estimator, FeatureMatch};
use log::*;
use nalgebra::Point2;

/// Estimates a [`Homography`] from four correspondences.
///
/// Samples with three collinear points in either image produce no model.
/// Combined with the [`Model`](cv_core::sample_consensus::Model) impl of
/// [`Homography`] this works with any consensus algorithm.
#[derive(Copy, Clone, Debug, Default)]
pub struct FourPoint;

impl FourPoint {
    pub fn new() -> Self {
        Self
    }
}

impl Estimator<FeatureMatch<Point2<f64>>> for FourPoint {
    type Model = Homography;
    type ModelIter = ArrayVec<Homography, 1>;
    const MIN_SAMPLES: usize = 4;

    fn estimate<I>(&self, data: I) -> Self::ModelIter
    where
        I: Iterator<Item = FeatureMatch<Point2<f64>>> + Clone,
    {
        let (a, b): (Vec<_>, Vec<_>) = data.map(|FeatureMatch(a, b)| (a, b)).unzip();
        let mut models = ArrayVec::new();
        if has_collinear_triple(&a) || has_collinear_triple(&b) {
            return models;
        }
        match dlt::fit(&a, &b) {
            Ok(h) => models.push(h),
            Err(e) => trace!("Four point fit failed: {}", e),
        }
        models
    }
}
