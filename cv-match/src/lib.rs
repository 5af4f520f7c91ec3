//! Descriptor classification and symmetric matching between two frames.
//!
//! [`KNearestNeighbors`] is a distance-weighted k-nearest neighbor classifier
//! over any [`NeighborSearch`], either a linear scan or a [`cv_knn::KdTree`].
//! [`KnnMatcher`] builds on it to correlate two sets of feature points: the
//! larger set becomes the training data, with every point its own class, and
//! each point of the smaller set is classified against it.
//!
//! ```
//! use cv_match::{Feature, KnnMatcher};
//!
//! let a = vec![Feature::new(1.0, 1.0, vec![0.0, 0.0]), Feature::new(9.0, 9.0, vec![5.0, 5.0])];
//! let b = vec![Feature::new(2.0, 1.0, vec![0.1, 0.0])];
//! let matches = KnnMatcher::new(1, 0.5).match_features(&a, &b).unwrap();
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].1.x, 2.0);
//! ```

mod classifier;
mod error;
mod feature;
mod matcher;
mod settings;

pub use classifier::*;
pub use error::*;
pub use feature::*;
pub use matcher::*;
pub use settings::*;
