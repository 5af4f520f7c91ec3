/// A robust fitting problem over `len()` data points addressed by index.
pub trait RansacProblem {
    type Model;

    /// The number of data points.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of points needed to fit a model.
    fn sample_size(&self) -> usize;

    /// Fits a model to the points at `sample`.
    ///
    /// Returning `None` is treated as a hypothesis without inliers.
    fn fit(&self, sample: &[usize]) -> Option<Self::Model>;

    /// Whether the points at `sample` can not produce a meaningful model.
    fn is_degenerate(&self, _sample: &[usize]) -> bool {
        false
    }

    /// The indices of the points whose error under `model` is within `threshold`.
    fn inliers(&self, model: &Self::Model, threshold: f64) -> Vec<usize>;
}

/// A [`RansacProblem`] made of closures.
///
/// `fitting` builds a model from sample indices, and `distances` returns the
/// indices of the inliers of a model for a threshold. Any state the closures
/// need is captured by them.
///
/// ```
/// use cv_ransac::{FnProblem, RansacProblem};
///
/// let values = [1.0, 1.1, 0.9, 7.0];
/// let problem = FnProblem::new(
///     values.len(),
///     1,
///     |sample: &[usize]| Some(values[sample[0]]),
///     |model: &f64, threshold: f64| {
///         (0..values.len())
///             .filter(|&ix| (values[ix] - model).abs() <= threshold)
///             .collect()
///     },
/// );
/// assert_eq!(problem.inliers(&1.0, 0.2), vec![0, 1, 2]);
/// ```
pub struct FnProblem<F, D, G = fn(&[usize]) -> bool> {
    len: usize,
    sample_size: usize,
    fitting: F,
    distances: D,
    degenerate: Option<G>,
}

impl<F, D> FnProblem<F, D> {
    pub fn new(len: usize, sample_size: usize, fitting: F, distances: D) -> Self {
        Self {
            len,
            sample_size,
            fitting,
            distances,
            degenerate: None,
        }
    }
}

impl<F, D, G> FnProblem<F, D, G> {
    /// Adds a degeneracy test for samples.
    pub fn with_degenerate<H>(self, degenerate: H) -> FnProblem<F, D, H>
    where
        H: Fn(&[usize]) -> bool,
    {
        FnProblem {
            len: self.len,
            sample_size: self.sample_size,
            fitting: self.fitting,
            distances: self.distances,
            degenerate: Some(degenerate),
        }
    }
}

impl<Model, F, D, G> RansacProblem for FnProblem<F, D, G>
where
    F: Fn(&[usize]) -> Option<Model>,
    D: Fn(&Model, f64) -> Vec<usize>,
    G: Fn(&[usize]) -> bool,
{
    type Model = Model;

    fn len(&self) -> usize {
        self.len
    }

    fn sample_size(&self) -> usize {
        self.sample_size
    }

    fn fit(&self, sample: &[usize]) -> Option<Model> {
        (self.fitting)(sample)
    }

    fn is_degenerate(&self, sample: &[usize]) -> bool {
        self.degenerate
            .as_ref()
            .map_or(false, |degenerate| degenerate(sample))
    }

    fn inliers(&self, model: &Model, threshold: f64) -> Vec<usize> {
        (self.distances)(model, threshold)
    }
}
