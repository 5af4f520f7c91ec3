/// A correspondence between a point in the first frame and a point in the second frame.
///
/// `FeatureMatch(a, b)` means `a` in frame A was matched to `b` in frame B.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FeatureMatch<P>(pub P, pub P);

impl<P> FeatureMatch<P> {
    /// Swaps the two sides of the match.
    pub fn reversed(self) -> Self {
        let Self(a, b) = self;
        Self(b, a)
    }
}
