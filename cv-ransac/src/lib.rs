//! A generic RANSAC engine.
//!
//! Describe a fitting problem with [`RansacProblem`] (or [`FnProblem`] for a
//! closure based one) and run it with [`Ransac::compute`]. The engine also
//! implements [`sample_consensus::Consensus`], so any
//! [`sample_consensus::Estimator`] can be used with it directly.
//!
//! ```
//! use cv_ransac::{FnProblem, Ransac};
//! use rand::SeedableRng;
//! use rand_pcg::Pcg64;
//!
//! // Fit a constant to values with one outlier.
//! let values = [2.0, 2.1, 1.9, 2.05, 40.0];
//! let problem = FnProblem::new(
//!     values.len(),
//!     1,
//!     |sample: &[usize]| Some(values[sample[0]]),
//!     |model: &f64, threshold: f64| {
//!         (0..values.len())
//!             .filter(|&ix| (values[ix] - model).abs() <= threshold)
//!             .collect()
//!     },
//! );
//! let mut ransac = Ransac::new(0.25, Pcg64::seed_from_u64(0));
//! let (_, inliers) = ransac.compute(&problem).unwrap();
//! assert_eq!(inliers, vec![0, 1, 2, 3]);
//! ```

mod consensus;
mod error;
mod problem;
mod settings;

pub use error::*;
pub use problem::*;
pub use settings::*;

use log::*;
use rand::{seq::index, Rng};

pub use cv_core::sample_consensus;

/// The RANSAC robust estimator.
///
/// Owns the random number generator used for sampling, so results are
/// reproducible with a seeded generator.
#[derive(Debug, Clone)]
pub struct Ransac<R> {
    threshold: f64,
    settings: RansacSettings,
    rng: R,
}

impl<R: Rng> Ransac<R> {
    /// Creates the engine with [`RansacSettings::default`].
    pub fn new(threshold: f64, rng: R) -> Self {
        Self {
            threshold,
            settings: RansacSettings::default(),
            rng,
        }
    }

    pub fn with_settings(threshold: f64, settings: RansacSettings, rng: R) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            threshold,
            settings,
            rng,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn settings(&self) -> &RansacSettings {
        &self.settings
    }

    /// Finds the model with the largest consensus set and its inliers.
    ///
    /// Returns `None` if the problem has fewer points than a sample needs or
    /// no hypothesis had any inlier.
    pub fn compute<P: RansacProblem>(&mut self, problem: &P) -> Option<(P::Model, Vec<usize>)> {
        let len = problem.len();
        let size = problem.sample_size();
        if size == 0 || len < size {
            debug!("{} points can not fill a sample of {}", len, size);
            return None;
        }

        let mut best: Option<(P::Model, Vec<usize>)> = None;
        let mut required = self.settings.max_evaluations;
        let mut count = 0;
        while count < required && count < self.settings.max_evaluations {
            let sample = self.draw(problem, len, size);
            count += 1;
            let model = match problem.fit(&sample) {
                Some(model) => model,
                None => continue,
            };
            let inliers = problem.inliers(&model, self.threshold);
            if inliers.len() > best.as_ref().map_or(0, |(_, b)| b.len()) {
                let ratio = inliers.len() as f64 / len as f64;
                required = self.required_evaluations(ratio, size);
                debug!(
                    "Trial {} found {} inliers, {} trials required",
                    count,
                    inliers.len(),
                    required
                );
                best = Some((model, inliers));
            }
        }
        trace!("Stopped after {} of at most {} trials", count, required);
        best
    }

    /// Draws samples until one is not degenerate, keeping the last one if
    /// they all are.
    fn draw<P: RansacProblem>(&mut self, problem: &P, len: usize, size: usize) -> Vec<usize> {
        let mut samplings = 0;
        loop {
            let sample = index::sample(&mut self.rng, len, size).into_vec();
            samplings += 1;
            if !problem.is_degenerate(&sample) || samplings >= self.settings.max_samplings {
                return sample;
            }
        }
    }

    /// The number of trials `ln(1 - p) / ln(1 - w^s)` after which an
    /// outlier free sample has been drawn with probability `p`.
    fn required_evaluations(&self, inlier_ratio: f64, sample_size: usize) -> usize {
        let outlier_free = inlier_ratio.powi(sample_size as i32);
        let required = (1.0 - self.settings.probability).ln() / (1.0 - outlier_free).ln();
        if !required.is_finite() || required >= self.settings.max_evaluations as f64 {
            self.settings.max_evaluations
        } else {
            required.max(0.0).ceil() as usize
        }
    }
}
