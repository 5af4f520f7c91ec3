//! Planar homography estimation.
//!
//! [`dlt::fit`] solves for the homography between two sets of at least four
//! points with the normalized direct linear transform. [`RansacHomography`]
//! wraps it in RANSAC to separate consistent correspondences from outliers,
//! and [`FourPoint`] exposes the minimal solver as a
//! [`sample_consensus::Estimator`](cv_core::sample_consensus::Estimator) for
//! other consensus algorithms.
//!
//! ```
//! use cv_core::{nalgebra::Point2, FeatureMatch};
//! use homography::{estimate_homography, Homography};
//! use rand::SeedableRng;
//! use rand_pcg::Pcg64;
//!
//! let truth = Homography::from_elements([1.1, 0.05, 4.0, -0.02, 0.95, -2.0, 1e-4, 2e-4]);
//! let matches: Vec<_> = (0..20)
//!     .map(|i| Point2::new((i % 5) as f64 * 25.0, (i / 5) as f64 * 30.0 + (i % 2) as f64))
//!     .map(|p| FeatureMatch(p, truth.transform_point(&p)))
//!     .collect();
//! let estimate = estimate_homography(&matches, 1e-6, 0.99, Pcg64::seed_from_u64(0))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(estimate.inliers.len(), 20);
//! ```

pub mod dlt;
mod degenerate;
mod error;
mod estimator;
mod four_point;
mod normalize;
mod transform;

pub use degenerate::*;
pub use error::*;
pub use estimator::*;
pub use four_point::*;
pub use normalize::*;
pub use transform::*;
