use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::Point2;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Allows the retrieval of the point on the image the feature came from.
pub trait ImagePoint {
    /// Retrieves the point on the image
    fn image_point(&self) -> Point2<f64>;
}

/// A point on an image frame in pixel coordinates.
///
/// This is the position half of a detected feature. Use it directly when only
/// the location matters, or pair it with a descriptor through a type
/// implementing [`FeaturePoint`](crate::FeaturePoint).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct KeyPoint(pub Point2<f64>);

impl KeyPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self(Point2::new(x, y))
    }
}

impl ImagePoint for KeyPoint {
    fn image_point(&self) -> Point2<f64> {
        self.0
    }
}

impl ImagePoint for Point2<f64> {
    fn image_point(&self) -> Point2<f64> {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keypoint_wraps_point() {
        let mut keypoint = KeyPoint::from(Point2::new(1.0, 2.0));
        keypoint.x += 1.0;
        AsMut::<Point2<f64>>::as_mut(&mut keypoint).y = 5.0;
        assert_eq!(*AsRef::<Point2<f64>>::as_ref(&keypoint), Point2::new(2.0, 5.0));
        let point: Point2<f64> = keypoint.into();
        assert_eq!(point, keypoint.image_point());
    }
}
