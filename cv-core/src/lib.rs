//! # Feature correlation core
//!
//! This library provides the small set of types shared by the crates that
//! correlate feature points between two frames: the index and distance crate
//! (`cv-knn`), the matcher (`cv-match`), the sample consensus engine
//! (`cv-ransac`) and the homography estimator (`homography`). Each of those
//! crates depends on this one so that points and matches flow between them
//! without conversions.
//!
//! The crate is designed to work with `#![no_std]`, even without an allocator.
//! Anything that needs an allocation (descriptors owned by a feature, index
//! storage) lives in the crates that need it.
//!
//! ## Matching two frames
//!
//! A feature detector (not part of this workspace) produces points on each
//! frame, each with a descriptor vector. The matcher pairs points whose
//! descriptors agree, producing [`FeatureMatch`]es of image positions:
//!
//! ```text
//!      frame A                frame B
//!   +-----------+          +-----------+
//!   |   a1      |          |     b2    |
//!   |       a2 -+----------+-> b1      |
//!   |  a3 ------+----------+------> b3 |
//!   +-----------+          +-----------+
//! ```
//!
//! A robust estimator then fits a projective transform to those matches and
//! separates consistent matches (inliers) from the rest.

#![no_std]

mod feature;
mod keypoint;
mod matches;

pub use feature::*;
pub use keypoint::*;
pub use matches::*;
pub use nalgebra;
pub use sample_consensus;
