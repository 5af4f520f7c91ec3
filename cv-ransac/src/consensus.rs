use crate::{Ransac, RansacProblem};
use cv_core::sample_consensus::{Consensus, Estimator, Model};
use rand::Rng;

/// Runs a [`sample_consensus::Estimator`](Estimator) through the engine.
///
/// A datum is an inlier when the residual of the model is within the
/// threshold. When the estimator yields several models for one sample, the
/// one with the most inliers is kept.
struct EstimatorProblem<'a, E, Data> {
    estimator: &'a E,
    data: Vec<Data>,
    threshold: f64,
}

impl<'a, E, Data> EstimatorProblem<'a, E, Data>
where
    E: Estimator<Data>,
{
    fn inliers_of(&self, model: &E::Model, threshold: f64) -> Vec<usize> {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, datum)| model.residual(datum) <= threshold)
            .map(|(ix, _)| ix)
            .collect()
    }
}

impl<'a, E, Data> RansacProblem for EstimatorProblem<'a, E, Data>
where
    E: Estimator<Data>,
    Data: Clone,
{
    type Model = E::Model;

    fn len(&self) -> usize {
        self.data.len()
    }

    fn sample_size(&self) -> usize {
        E::MIN_SAMPLES
    }

    fn fit(&self, sample: &[usize]) -> Option<E::Model> {
        let data = sample.iter().map(|&ix| self.data[ix].clone());
        let mut best: Option<(E::Model, usize)> = None;
        for model in self.estimator.estimate(data) {
            let count = self.inliers_of(&model, self.threshold).len();
            if best.as_ref().map_or(true, |&(_, best_count)| count > best_count) {
                best = Some((model, count));
            }
        }
        best.map(|(model, _)| model)
    }

    fn inliers(&self, model: &E::Model, threshold: f64) -> Vec<usize> {
        self.inliers_of(model, threshold)
    }
}

impl<E, Data, R> Consensus<E, Data> for Ransac<R>
where
    E: Estimator<Data>,
    Data: Clone,
    R: Rng,
{
    type Inliers = Vec<usize>;

    fn model<I>(&mut self, estimator: &E, data: I) -> Option<E::Model>
    where
        I: Iterator<Item = Data> + Clone,
    {
        self.model_inliers(estimator, data).map(|(model, _)| model)
    }

    fn model_inliers<I>(&mut self, estimator: &E, data: I) -> Option<(E::Model, Self::Inliers)>
    where
        I: Iterator<Item = Data> + Clone,
    {
        let problem = EstimatorProblem {
            estimator,
            data: data.collect(),
            threshold: self.threshold(),
        };
        self.compute(&problem)
    }
}
