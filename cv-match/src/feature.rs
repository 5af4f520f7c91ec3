use cv_core::{nalgebra::Point2, FeaturePoint, ImagePoint, KeyPoint};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A feature point which owns its descriptor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Feature {
    pub keypoint: KeyPoint,
    pub descriptor: Vec<f64>,
}

impl Feature {
    pub fn new(x: f64, y: f64, descriptor: Vec<f64>) -> Self {
        Self {
            keypoint: KeyPoint::new(x, y),
            descriptor,
        }
    }
}

impl ImagePoint for Feature {
    fn image_point(&self) -> Point2<f64> {
        self.keypoint.0
    }
}

impl FeaturePoint for Feature {
    fn descriptor(&self) -> &[f64] {
        &self.descriptor
    }
}
