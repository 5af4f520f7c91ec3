//! Nearest neighbor search for feature correlation.
//!
//! This crate provides the building blocks used to find which points of one
//! set lie closest to a query:
//!
//! * [`distance`] - distance functions and the [`Metric`]/[`AxisBounded`] traits
//! * [`NeighborCollection`] - a bounded collection keeping the closest candidates
//! * [`KdTree`] - a balanced k-dimensional tree with exact, k-nearest, radius
//!   and leaf-budgeted approximate searches
//!
//! ```
//! use cv_knn::{Euclidean, KdTree};
//!
//! let points = vec![vec![2.0, 3.0], vec![5.0, 4.0], vec![9.0, 6.0], vec![8.0, 1.0]];
//! let tree = KdTree::from_points(points, Euclidean).unwrap();
//! let nearest = tree.nearest(&[9.0, 2.0]).unwrap().unwrap();
//! assert_eq!(*nearest.value(), 3);
//! ```

pub mod distance;
mod error;
mod kdtree;
mod neighbors;
mod search;

pub use distance::{
    AxisBounded, Bhattacharyya, Chebyshev, Euclidean, Hamming, Mahalanobis, Manhattan, Metric,
    SquaredEuclidean,
};
pub use error::*;
pub use kdtree::*;
pub use neighbors::*;
