use crate::{Error, KNearestNeighbors, MatchSettings, NeighborSearch, Result};
use cv_core::{nalgebra::Point2, FeatureMatch, FeaturePoint};
use cv_knn::{AxisBounded, Euclidean, Metric};
use log::*;

/// Matches two sets of feature descriptors with a k-nearest neighbor vote.
///
/// The larger set is used as training data, with every point being its own
/// class. Each point of the smaller set is classified against it, and a
/// training point keeps only the best scoring query that beats the threshold.
/// Because the roles only depend on the set sizes, matching `(a, b)` gives the
/// same pairs as matching `(b, a)` with every pair reversed, unless both sets
/// have the same size, in which case `a` is always used for training.
#[derive(Debug, Clone)]
pub struct KnnMatcher<M = Euclidean> {
    k: usize,
    threshold: f64,
    metric: M,
}

impl KnnMatcher {
    pub fn new(k: usize, threshold: f64) -> Self {
        Self {
            k,
            threshold,
            metric: Euclidean,
        }
    }

    pub fn from_settings(settings: &MatchSettings) -> Self {
        Self::new(settings.k, settings.threshold)
    }
}

impl Default for KnnMatcher {
    fn default() -> Self {
        Self::from_settings(&MatchSettings::default())
    }
}

impl<M> KnnMatcher<M> {
    /// Replaces the descriptor metric.
    pub fn with_metric<N>(self, metric: N) -> KnnMatcher<N> {
        KnnMatcher {
            k: self.k,
            threshold: self.threshold,
            metric,
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }
}

impl<M: AxisBounded + Clone> KnnMatcher<M> {
    /// Matches descriptors using a kd-tree over the training set.
    ///
    /// Returns pairs `(index in a, index in b)`.
    pub fn match_indices(&self, a: &[Vec<f64>], b: &[Vec<f64>]) -> Result<Vec<(usize, usize)>> {
        self.correlate(a, b, |inputs, outputs| {
            KNearestNeighbors::indexed(
                self.k,
                outputs.len(),
                inputs,
                outputs,
                self.metric.clone(),
            )
        })
    }

    /// Matches features by descriptor and returns the matched image points.
    pub fn match_features<F: FeaturePoint>(
        &self,
        a: &[F],
        b: &[F],
    ) -> Result<Vec<FeatureMatch<Point2<f64>>>> {
        let pairs = self.match_indices(&descriptors(a), &descriptors(b))?;
        Ok(pairs
            .into_iter()
            .map(|(i, j)| FeatureMatch(a[i].image_point(), b[j].image_point()))
            .collect())
    }
}

impl<M: Metric + Clone> KnnMatcher<M> {
    /// Matches descriptors by comparing every pair, for metrics which can not
    /// drive a kd-tree.
    pub fn match_indices_linear(
        &self,
        a: &[Vec<f64>],
        b: &[Vec<f64>],
    ) -> Result<Vec<(usize, usize)>> {
        self.correlate(a, b, |inputs, outputs| {
            KNearestNeighbors::linear(
                self.k,
                outputs.len(),
                inputs,
                outputs,
                self.metric.clone(),
            )
        })
    }

    fn correlate<S, B>(&self, a: &[Vec<f64>], b: &[Vec<f64>], build: B) -> Result<Vec<(usize, usize)>>
    where
        S: NeighborSearch,
        B: FnOnce(Vec<Vec<f64>>, Vec<usize>) -> Result<KNearestNeighbors<S>>,
    {
        if a.is_empty() || b.is_empty() {
            return Err(Error::InsufficientPoints);
        }
        let swapped = b.len() > a.len();
        let (training, queries) = if swapped { (b, a) } else { (a, b) };

        let knn = build(training.to_vec(), (0..training.len()).collect())?;

        // For every training point, the query that claimed it with the highest score.
        let mut best: Vec<Option<(usize, f64)>> = vec![None; training.len()];
        for (j, query) in queries.iter().enumerate() {
            let decision = knn.decide(query)?;
            if decision.score <= self.threshold {
                continue;
            }
            let slot = &mut best[decision.label];
            if slot.map_or(true, |(_, score)| decision.score > score) {
                *slot = Some((j, decision.score));
            }
        }

        let matches: Vec<(usize, usize)> = best
            .into_iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|(j, _)| if swapped { (j, i) } else { (i, j) }))
            .collect();
        info!(
            "Matched {} of {} and {} points",
            matches.len(),
            a.len(),
            b.len()
        );
        debug!("Training on set {}", if swapped { "b" } else { "a" });
        Ok(matches)
    }
}

fn descriptors<F: FeaturePoint>(features: &[F]) -> Vec<Vec<f64>> {
    features.iter().map(|f| f.descriptor().to_vec()).collect()
}
