use crate::{Error, Result};
use cv_knn::{AxisBounded, KdTree, Metric, NeighborCollection};
use log::*;

/// A source of nearest training samples for a query.
pub trait NeighborSearch {
    /// The number of coordinates in every training sample.
    fn dimensions(&self) -> usize;

    /// The number of training samples.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds up to `k` training samples closest to `query` as `(index, distance)`
    /// pairs ranked by ascending distance.
    fn search(&self, query: &[f64], k: usize) -> cv_knn::Result<Vec<(usize, f64)>>;
}

/// Brute force search which measures the distance to every training sample.
///
/// Works with any [`Metric`]. Samples at equal distance are ranked in the
/// order they were given.
#[derive(Debug, Clone)]
pub struct LinearSearch<M> {
    inputs: Vec<Vec<f64>>,
    dimensions: usize,
    metric: M,
}

impl<M: Metric> LinearSearch<M> {
    pub fn new(inputs: Vec<Vec<f64>>, metric: M) -> cv_knn::Result<Self> {
        let dimensions = inputs.first().ok_or(cv_knn::Error::Empty)?.len();
        if dimensions == 0 {
            return Err(cv_knn::Error::ZeroDimensions);
        }
        if let Some(found) = inputs
            .iter()
            .map(Vec::len)
            .chain(metric.dimensions())
            .find(|&n| n != dimensions)
        {
            return Err(cv_knn::Error::DimensionMismatch {
                expected: dimensions,
                found,
            });
        }
        Ok(Self {
            inputs,
            dimensions,
            metric,
        })
    }
}

impl<M: Metric> NeighborSearch for LinearSearch<M> {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn len(&self) -> usize {
        self.inputs.len()
    }

    fn search(&self, query: &[f64], k: usize) -> cv_knn::Result<Vec<(usize, f64)>> {
        if query.len() != self.dimensions {
            return Err(cv_knn::Error::DimensionMismatch {
                expected: self.dimensions,
                found: query.len(),
            });
        }
        if k == 0 {
            return Ok(vec![]);
        }
        let mut neighbors = NeighborCollection::new(k);
        for (ix, input) in self.inputs.iter().enumerate() {
            neighbors.add(ix, self.metric.distance(query, input));
        }
        Ok(neighbors.into_sorted_vec())
    }
}

/// Samples at equal distance are ranked by index, matching [`LinearSearch`].
impl<M: AxisBounded> NeighborSearch for KdTree<usize, M> {
    fn dimensions(&self) -> usize {
        KdTree::dimensions(self)
    }

    fn len(&self) -> usize {
        KdTree::len(self)
    }

    fn search(&self, query: &[f64], k: usize) -> cv_knn::Result<Vec<(usize, f64)>> {
        Ok(self
            .nearest_k_by_value(query, k)?
            .into_iter()
            .map(|neighbor| (*neighbor.value(), neighbor.distance))
            .collect())
    }
}

/// The outcome of classifying one query.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Decision {
    /// The winning label.
    pub label: usize,
    /// The accumulated score `Σ 1 / (1 + distance)` of the winning label.
    pub score: f64,
    /// The accumulated score of all labels among the neighbors.
    pub total: f64,
}

impl Decision {
    /// The share of the total score held by the winning label.
    pub fn confidence(&self) -> f64 {
        if self.total > 0.0 {
            self.score / self.total
        } else {
            0.0
        }
    }
}

/// A k-nearest neighbor classifier with distance-weighted voting.
///
/// Each of the `k` training samples closest to a query adds `1 / (1 + d)` to
/// the score of its label, and the label with the highest score wins. When
/// two labels score the same, the one whose first neighbor was closer wins.
#[derive(Debug, Clone)]
pub struct KNearestNeighbors<S> {
    k: usize,
    classes: usize,
    outputs: Vec<usize>,
    search: S,
}

impl<M: Metric> KNearestNeighbors<LinearSearch<M>> {
    /// Creates a classifier which compares every query against every input.
    pub fn linear(
        k: usize,
        classes: usize,
        inputs: Vec<Vec<f64>>,
        outputs: Vec<usize>,
        metric: M,
    ) -> Result<Self> {
        validate(k, classes, inputs.len(), &outputs)?;
        Self::new(k, classes, outputs, LinearSearch::new(inputs, metric)?)
    }
}

impl<M: AxisBounded> KNearestNeighbors<KdTree<usize, M>> {
    /// Creates a classifier backed by a kd-tree over the inputs.
    pub fn indexed(
        k: usize,
        classes: usize,
        inputs: Vec<Vec<f64>>,
        outputs: Vec<usize>,
        metric: M,
    ) -> Result<Self> {
        validate(k, classes, inputs.len(), &outputs)?;
        Self::new(k, classes, outputs, KdTree::from_points(inputs, metric)?)
    }
}

impl<S: NeighborSearch> KNearestNeighbors<S> {
    /// Creates a classifier over any search whose sample `i` has label `outputs[i]`.
    pub fn new(k: usize, classes: usize, outputs: Vec<usize>, search: S) -> Result<Self> {
        validate(k, classes, search.len(), &outputs)?;
        debug!(
            "Created {}-nearest neighbor classifier over {} samples and {} classes",
            k,
            search.len(),
            classes
        );
        Ok(Self {
            k,
            classes,
            outputs,
            search,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn classes(&self) -> usize {
        self.classes
    }

    pub fn search(&self) -> &S {
        &self.search
    }

    /// Classifies `query`.
    pub fn decide(&self, query: &[f64]) -> Result<Decision> {
        let votes = self.votes(query)?;
        let total = votes.iter().map(|&(_, score)| score).sum();
        let (label, score) = votes
            .into_iter()
            .fold(None, |best: Option<(usize, f64)>, (label, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((label, score)),
            })
            .ok_or(Error::InsufficientPoints)?;
        Ok(Decision {
            label,
            score,
            total,
        })
    }

    /// The accumulated score of every class for `query`.
    pub fn scores(&self, query: &[f64]) -> Result<Vec<f64>> {
        let mut scores = vec![0.0; self.classes];
        for (label, score) in self.votes(query)? {
            scores[label] += score;
        }
        Ok(scores)
    }

    /// Scores per label, ordered by each label's closest neighbor.
    fn votes(&self, query: &[f64]) -> Result<Vec<(usize, f64)>> {
        let mut votes: Vec<(usize, f64)> = Vec::with_capacity(self.k);
        for (ix, distance) in self.search.search(query, self.k)? {
            let label = self.outputs[ix];
            let weight = 1.0 / (1.0 + distance);
            match votes.iter_mut().find(|(l, _)| *l == label) {
                Some((_, score)) => *score += weight,
                None => votes.push((label, weight)),
            }
        }
        Ok(votes)
    }
}

fn validate(k: usize, classes: usize, samples: usize, outputs: &[usize]) -> Result<()> {
    if samples != outputs.len() {
        return Err(Error::LengthMismatch {
            inputs: samples,
            outputs: outputs.len(),
        });
    }
    if k == 0 || k > samples {
        return Err(Error::InvalidNeighborCount { k, samples });
    }
    if classes == 0 {
        return Err(Error::NoClasses);
    }
    if let Some(&label) = outputs.iter().find(|&&label| label >= classes) {
        return Err(Error::LabelOutOfRange { label, classes });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cv_knn::{Euclidean, Mahalanobis, Manhattan};
    use cv_core::nalgebra::DMatrix;

    fn training() -> (Vec<Vec<f64>>, Vec<usize>) {
        let inputs = vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![10.0, 10.0],
            vec![10.0, 11.0],
            vec![11.0, 10.0],
        ];
        (inputs, vec![0, 0, 0, 1, 1, 1])
    }

    #[test]
    fn classifies_clusters() {
        let (inputs, outputs) = training();
        let knn = KNearestNeighbors::indexed(3, 2, inputs, outputs, Euclidean).unwrap();
        assert_eq!(knn.decide(&[0.5, 0.5]).unwrap().label, 0);
        let decision = knn.decide(&[10.2, 10.2]).unwrap();
        assert_eq!(decision.label, 1);
        assert_relative_eq!(decision.confidence(), 1.0);
    }

    #[test]
    fn weighted_vote_score() {
        let (inputs, outputs) = training();
        let knn = KNearestNeighbors::linear(2, 2, inputs, outputs, Manhattan).unwrap();
        // Neighbors of (0, 0): itself at 0 and a tie at 1, the earlier (0, 1) wins.
        let scores = knn.scores(&[0.0, 0.0]).unwrap();
        assert_relative_eq!(scores[0], 1.0 + 0.5);
        assert_relative_eq!(scores[1], 0.0);
    }

    #[test]
    fn mixed_neighborhood_confidence() {
        let inputs = vec![vec![0.0], vec![1.0], vec![3.0]];
        let knn = KNearestNeighbors::linear(3, 2, inputs, vec![0, 1, 1], Euclidean).unwrap();
        let decision = knn.decide(&[0.0]).unwrap();
        // Label 0 scores 1, label 1 scores 1/2 + 1/4.
        assert_eq!(decision.label, 0);
        assert_relative_eq!(decision.score, 1.0);
        assert_relative_eq!(decision.total, 1.75);
        assert_relative_eq!(decision.confidence(), 1.0 / 1.75);
    }

    #[test]
    fn ties_go_to_the_closest_label() {
        let inputs = vec![vec![0.0], vec![2.0], vec![-1.0], vec![3.0]];
        // Both labels score 1/2 + 1/3, label 0 owns the first neighbor found.
        let knn = KNearestNeighbors::linear(4, 2, inputs, vec![0, 1, 1, 0], Euclidean).unwrap();
        let decision = knn.decide(&[1.0]).unwrap();
        assert_eq!(decision.label, 0);
    }

    #[test]
    fn linear_and_indexed_agree() {
        let (inputs, outputs) = training();
        let linear =
            KNearestNeighbors::linear(3, 2, inputs.clone(), outputs.clone(), Euclidean).unwrap();
        let indexed = KNearestNeighbors::indexed(3, 2, inputs, outputs, Euclidean).unwrap();
        for query in [[0.2, 0.1], [5.0, 5.0], [9.0, 12.0], [-3.0, 4.0]] {
            assert_eq!(
                linear.decide(&query).unwrap().label,
                indexed.decide(&query).unwrap().label
            );
        }
    }

    #[test]
    fn rejects_invalid_configuration() {
        let (inputs, outputs) = training();
        let err = |k, classes, outputs: Vec<usize>| {
            KNearestNeighbors::indexed(k, classes, inputs.clone(), outputs, Euclidean).unwrap_err()
        };
        assert_eq!(
            err(0, 2, outputs.clone()),
            Error::InvalidNeighborCount { k: 0, samples: 6 }
        );
        assert_eq!(
            err(7, 2, outputs.clone()),
            Error::InvalidNeighborCount { k: 7, samples: 6 }
        );
        assert_eq!(err(1, 0, outputs.clone()), Error::NoClasses);
        assert_eq!(
            err(1, 2, vec![0, 1]),
            Error::LengthMismatch {
                inputs: 6,
                outputs: 2
            }
        );
        assert_eq!(
            err(1, 1, outputs),
            Error::LabelOutOfRange {
                label: 1,
                classes: 1
            }
        );
    }

    #[test]
    fn metric_dimension_is_checked() {
        let (inputs, outputs) = training();
        let wide = Mahalanobis::new(DMatrix::identity(3, 3)).unwrap();
        assert_eq!(
            KNearestNeighbors::linear(1, 2, inputs.clone(), outputs.clone(), wide).unwrap_err(),
            Error::Index(cv_knn::Error::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
        let fitting = Mahalanobis::new(DMatrix::identity(2, 2)).unwrap();
        let knn = KNearestNeighbors::linear(1, 2, inputs, outputs, fitting).unwrap();
        assert_eq!(knn.decide(&[10.0, 10.5]).unwrap().label, 1);
    }

    #[test]
    fn query_dimension_is_checked() {
        let (inputs, outputs) = training();
        let knn = KNearestNeighbors::linear(1, 2, inputs, outputs, Euclidean).unwrap();
        assert!(matches!(
            knn.decide(&[1.0, 2.0, 3.0]),
            Err(Error::Index(cv_knn::Error::DimensionMismatch { .. }))
        ));
    }
}
