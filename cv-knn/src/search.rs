//! Nearest neighbor queries on a [`KdTree`].
//!
//! All searches descend into the child on the query's side of the splitting
//! plane first. The other child is only visited when the plane itself is
//! closer than the worst distance that could still be accepted, measured with
//! [`AxisBounded::axis_distance`]. For exact searches this pruning never skips
//! a closer point, so the results are the same as a linear scan.

use crate::{AxisBounded, KdNode, KdTree, Neighbor, NeighborCollection, Result};

impl<T, M: AxisBounded> KdTree<T, M> {
    /// Finds the node closest to `query`.
    ///
    /// Returns `None` only when the tree is empty.
    pub fn nearest(&self, query: &[f64]) -> Result<Option<Neighbor<'_, T>>> {
        self.check_dimensions(query)?;
        let mut best = None;
        if let Some(root) = self.root() {
            self.nearest_in(root, query, &mut best);
        }
        Ok(best)
    }

    /// Finds the `k` nodes closest to `query`, ranked by ascending distance.
    ///
    /// Among nodes at equal distance the first one visited wins, which
    /// depends on the shape of the tree. Use [`KdTree::nearest_k_by_value`]
    /// when ties must be broken deterministically.
    pub fn nearest_k(&self, query: &[f64], k: usize) -> Result<Vec<Neighbor<'_, T>>> {
        self.collect_k(query, k, |neighbors, node, distance| {
            neighbors.add(node, distance);
        })
    }

    fn collect_k<'a, F>(&'a self, query: &[f64], k: usize, offer: F) -> Result<Vec<Neighbor<'a, T>>>
    where
        F: Fn(&mut NeighborCollection<&'a KdNode<T>>, &'a KdNode<T>, f64),
    {
        self.check_dimensions(query)?;
        if k == 0 {
            return Ok(vec![]);
        }
        let mut neighbors = NeighborCollection::new(k);
        if let Some(root) = self.root() {
            self.nearest_k_in(root, query, &mut neighbors, &offer);
        }
        Ok(ranked(neighbors))
    }

    /// Finds every node within `radius` of `query`, ranked by ascending distance.
    pub fn nearest_within(&self, query: &[f64], radius: f64) -> Result<Vec<Neighbor<'_, T>>> {
        self.check_dimensions(query)?;
        let mut found = vec![];
        if let Some(root) = self.root() {
            self.within_in(root, query, radius, &mut found);
        }
        found.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        Ok(found)
    }

    /// Finds a node close to `query`, visiting at most `max_leaves` leaves.
    ///
    /// The result is exact when the budget is not exhausted, otherwise it is
    /// only the closest node seen so far.
    pub fn approximate_nearest(
        &self,
        query: &[f64],
        max_leaves: usize,
    ) -> Result<Option<Neighbor<'_, T>>> {
        Ok(self
            .approximate_nearest_k(query, 1, max_leaves)?
            .into_iter()
            .next())
    }

    /// Finds `k` nodes close to `query`, visiting at most `max_leaves` leaves.
    pub fn approximate_nearest_k(
        &self,
        query: &[f64],
        k: usize,
        max_leaves: usize,
    ) -> Result<Vec<Neighbor<'_, T>>> {
        self.check_dimensions(query)?;
        if k == 0 {
            return Ok(vec![]);
        }
        let mut neighbors = NeighborCollection::new(k);
        if let Some(root) = self.root() {
            let mut visited = 0;
            self.approximate_in(root, query, &mut neighbors, max_leaves, &mut visited);
        }
        Ok(ranked(neighbors))
    }

    /// Like [`KdTree::approximate_nearest_k`] with the leaf budget given as a
    /// fraction of the leaves in the tree. At least one leaf is visited.
    pub fn approximate_nearest_fraction(
        &self,
        query: &[f64],
        k: usize,
        percentage: f64,
    ) -> Result<Vec<Neighbor<'_, T>>> {
        let max_leaves = ((self.leaves() as f64 * percentage) as usize).max(1);
        self.approximate_nearest_k(query, k, max_leaves)
    }

    fn nearest_in<'a>(
        &'a self,
        node: &'a KdNode<T>,
        query: &[f64],
        best: &mut Option<Neighbor<'a, T>>,
    ) {
        let distance = self.metric().distance(query, node.position());
        if best.map_or(true, |b| distance < b.distance) {
            *best = Some(Neighbor { node, distance });
        }
        let (delta, near, far) = split(node, query);
        if let Some(near) = near {
            self.nearest_in(near, query, best);
        }
        if let Some(far) = far {
            if best.map_or(true, |b| self.metric().axis_distance(delta) <= b.distance) {
                self.nearest_in(far, query, best);
            }
        }
    }

    fn nearest_k_in<'a, F>(
        &'a self,
        node: &'a KdNode<T>,
        query: &[f64],
        neighbors: &mut NeighborCollection<&'a KdNode<T>>,
        offer: &F,
    ) where
        F: Fn(&mut NeighborCollection<&'a KdNode<T>>, &'a KdNode<T>, f64),
    {
        let distance = self.metric().distance(query, node.position());
        offer(neighbors, node, distance);
        let (delta, near, far) = split(node, query);
        if let Some(near) = near {
            self.nearest_k_in(near, query, neighbors, offer);
        }
        if let Some(far) = far {
            if self.may_improve(neighbors, delta) {
                self.nearest_k_in(far, query, neighbors, offer);
            }
        }
    }

    fn within_in<'a>(
        &'a self,
        node: &'a KdNode<T>,
        query: &[f64],
        radius: f64,
        found: &mut Vec<Neighbor<'a, T>>,
    ) {
        let distance = self.metric().distance(query, node.position());
        if distance <= radius {
            found.push(Neighbor { node, distance });
        }
        let (delta, near, far) = split(node, query);
        if let Some(near) = near {
            self.within_in(near, query, radius, found);
        }
        if let Some(far) = far {
            if self.metric().axis_distance(delta) <= radius {
                self.within_in(far, query, radius, found);
            }
        }
    }

    /// Returns `true` once the leaf budget is spent.
    fn approximate_in<'a>(
        &'a self,
        node: &'a KdNode<T>,
        query: &[f64],
        neighbors: &mut NeighborCollection<&'a KdNode<T>>,
        max_leaves: usize,
        visited: &mut usize,
    ) -> bool {
        let distance = self.metric().distance(query, node.position());
        neighbors.add(node, distance);
        if node.is_leaf() {
            *visited += 1;
            return *visited >= max_leaves;
        }
        let (delta, near, far) = split(node, query);
        if let Some(near) = near {
            if self.approximate_in(near, query, neighbors, max_leaves, visited) {
                return true;
            }
        }
        if let Some(far) = far {
            if self.may_improve(neighbors, delta)
                && self.approximate_in(far, query, neighbors, max_leaves, visited)
            {
                return true;
            }
        }
        false
    }

    fn may_improve<N>(&self, neighbors: &NeighborCollection<N>, delta: f64) -> bool {
        !neighbors.is_full()
            || neighbors
                .max_distance()
                .map_or(true, |max| self.metric().axis_distance(delta) <= max)
    }
}

impl<T: Ord, M: AxisBounded> KdTree<T, M> {
    /// Like [`KdTree::nearest_k`], but nodes at equal distance are ranked by
    /// ascending value, so ties resolve the same way for any tree shape.
    pub fn nearest_k_by_value(&self, query: &[f64], k: usize) -> Result<Vec<Neighbor<'_, T>>> {
        self.collect_k(query, k, |neighbors, node, distance| {
            neighbors.add_by(node, distance, |a, b| a.value() < b.value());
        })
    }
}

/// The signed distance to the splitting plane and the children on the near
/// and far side of it.
fn split<'a, T>(
    node: &'a KdNode<T>,
    query: &[f64],
) -> (f64, Option<&'a KdNode<T>>, Option<&'a KdNode<T>>) {
    let axis = node.axis();
    let delta = query[axis] - node.position()[axis];
    let (left, right) = node.children();
    if delta < 0.0 {
        (delta, left, right)
    } else {
        (delta, right, left)
    }
}

fn ranked<T>(neighbors: NeighborCollection<&KdNode<T>>) -> Vec<Neighbor<'_, T>> {
    neighbors
        .into_sorted_vec()
        .into_iter()
        .map(|(node, distance)| Neighbor { node, distance })
        .collect()
}
