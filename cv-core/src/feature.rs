use crate::ImagePoint;

/// A detected feature: a point on the image and a fixed-length descriptor.
///
/// Descriptors from the same detector must all have the same length. The
/// matcher compares descriptors with a distance metric, so any numeric
/// encoding works as long as small distances mean similar features.
pub trait FeaturePoint: ImagePoint {
    /// Retrieves the descriptor vector of the feature.
    fn descriptor(&self) -> &[f64];
}

impl<T: FeaturePoint + ?Sized> FeaturePoint for &T {
    fn descriptor(&self) -> &[f64] {
        (**self).descriptor()
    }
}

impl<T: ImagePoint + ?Sized> ImagePoint for &T {
    fn image_point(&self) -> nalgebra::Point2<f64> {
        (**self).image_point()
    }
}
