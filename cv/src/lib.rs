//! # `cv`
//!
//! Batteries-included feature correlation between two frames
//!
//! This crate gathers the workspace in one place for discoverability and for
//! quickly writing a sample or a one-off script. If you are making a production
//! application, depend on the individual crates instead so that you only pull
//! in what you use. You can also disable default features on this crate and
//! enable only the ones you want.
//!
//! All of the basic types are included in the root of the crate. The modules
//! hold the algorithms, all of which come from optional dependencies.
//!
//! ## Modules
//! * [`knn`] - nearest neighbor search and distance metrics
//! * [`matching`] - k-nearest neighbor classification and symmetric matching
//! * [`consensus`] - finding the best estimated model from noisy data
//! * [`estimate`] - estimation of models from data

#![no_std]

pub use cv_core::{sample_consensus::*, *};

/// Algorithms for performing k-NN searches
pub mod knn {
    #[cfg(feature = "cv-knn")]
    pub use cv_knn::*;
}

/// Descriptor classification and matching between frames
pub mod matching {
    #[cfg(feature = "cv-match")]
    pub use cv_match::*;
}

/// Consensus algorithms (RANSAC)
pub mod consensus {
    #[cfg(feature = "arrsac")]
    pub use arrsac::Arrsac;
    #[cfg(feature = "cv-ransac")]
    pub use cv_ransac::{FnProblem, Ransac, RansacProblem, RansacSettings};
}

/// Estimation algorithms
pub mod estimate {
    /// Planar homographies
    #[cfg(feature = "homography")]
    pub mod homography {
        pub use homography::*;
    }
}
