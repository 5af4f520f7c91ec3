use crate::{
    distance::{Euclidean, Metric},
    Error, Result,
};
use float_ord::FloatOrd;
use log::*;

/// A node of a [`KdTree`].
///
/// The node owns its point, its payload and both of its subtrees. Points in
/// the left subtree are no greater than this node's point along `axis` and
/// points in the right subtree are no smaller.
#[derive(Debug, Clone)]
pub struct KdNode<T> {
    position: Vec<f64>,
    axis: usize,
    value: T,
    left: Option<Box<KdNode<T>>>,
    right: Option<Box<KdNode<T>>>,
}

impl<T> KdNode<T> {
    fn new(position: Vec<f64>, axis: usize, value: T) -> Self {
        Self {
            position,
            axis,
            value,
            left: None,
            right: None,
        }
    }

    pub fn position(&self) -> &[f64] {
        &self.position
    }

    /// The dimension this node splits its subtrees on.
    pub fn axis(&self) -> usize {
        self.axis
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn left(&self) -> Option<&KdNode<T>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&KdNode<T>> {
        self.right.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub(crate) fn children(&self) -> (Option<&KdNode<T>>, Option<&KdNode<T>>) {
        (self.left.as_deref(), self.right.as_deref())
    }

    fn height(&self) -> usize {
        let left = self.left.as_ref().map_or(0, |n| n.height());
        let right = self.right.as_ref().map_or(0, |n| n.height());
        1 + left.max(right)
    }
}

/// A node found by a search along with its distance to the query.
#[derive(Debug)]
pub struct Neighbor<'a, T> {
    pub node: &'a KdNode<T>,
    pub distance: f64,
}

impl<'a, T> Neighbor<'a, T> {
    pub fn value(&self) -> &'a T {
        &self.node.value
    }

    pub fn position(&self) -> &'a [f64] {
        &self.node.position
    }
}

impl<'a, T> Clone for Neighbor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Neighbor<'a, T> {}

/// A k-dimensional tree over points with payloads of type `T`.
///
/// The tree is built balanced from a snapshot of points with
/// [`KdTree::build`]. Points can be added afterwards with [`KdTree::insert`],
/// but insertion does not rebalance, so many insertions can degrade the depth
/// towards linear. Rebuild the tree when that matters.
///
/// The metric `M` decides the distance used by all searches, starting with
/// [`KdTree::nearest`].
#[derive(Debug, Clone)]
pub struct KdTree<T, M = Euclidean> {
    root: Option<Box<KdNode<T>>>,
    dimensions: usize,
    count: usize,
    leaves: usize,
    metric: M,
}

impl<T, M: Metric> KdTree<T, M> {
    /// Creates an empty tree for points of `dimensions` coordinates.
    ///
    /// Fails if `metric` only measures points of a different size.
    pub fn new(dimensions: usize, metric: M) -> Result<Self> {
        if dimensions == 0 {
            return Err(Error::ZeroDimensions);
        }
        if let Some(found) = metric.dimensions().filter(|&d| d != dimensions) {
            return Err(Error::DimensionMismatch {
                expected: dimensions,
                found,
            });
        }
        Ok(Self {
            root: None,
            dimensions,
            count: 0,
            leaves: 0,
            metric,
        })
    }

    /// Builds a balanced tree from `points` and their parallel `values`.
    ///
    /// At every depth the points are partitioned around the median of the
    /// coordinate `depth % k`. The median becomes the node, the points before
    /// it go left and the rest go right.
    pub fn build(points: Vec<Vec<f64>>, values: Vec<T>, metric: M) -> Result<Self> {
        if points.len() != values.len() {
            return Err(Error::LengthMismatch {
                points: points.len(),
                values: values.len(),
            });
        }
        let dimensions = points.first().ok_or(Error::Empty)?.len();
        let mut tree = Self::new(dimensions, metric)?;
        if let Some(found) = points.iter().map(Vec::len).find(|&n| n != dimensions) {
            return Err(Error::DimensionMismatch {
                expected: dimensions,
                found,
            });
        }

        tree.count = points.len();
        let entries = points.into_iter().zip(values).collect();
        tree.root = build_node(entries, 0, dimensions, &mut tree.leaves);
        debug!(
            "Built kd-tree with {} nodes, {} leaves and {} dimensions",
            tree.count, tree.leaves, tree.dimensions
        );
        Ok(tree)
    }
}

impl<T, M> KdTree<T, M> {
    /// Adds a point below the existing nodes without rebalancing.
    pub fn insert(&mut self, position: Vec<f64>, value: T) -> Result<()> {
        self.check_dimensions(&position)?;
        if insert_node(&mut self.root, position, value, 0, self.dimensions, false) {
            self.leaves += 1;
        }
        self.count += 1;
        Ok(())
    }

    pub fn root(&self) -> Option<&KdNode<T>> {
        self.root.as_deref()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// The number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The number of nodes without children.
    pub fn leaves(&self) -> usize {
        self.leaves
    }

    /// The number of nodes on the longest path from the root.
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.height())
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.count = 0;
        self.leaves = 0;
    }

    /// Iterates over all nodes in pre-order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            stack: self.root.as_deref().into_iter().collect(),
        }
    }

    pub(crate) fn check_dimensions(&self, point: &[f64]) -> Result<()> {
        if point.len() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                found: point.len(),
            });
        }
        Ok(())
    }
}

impl<M: Metric> KdTree<usize, M> {
    /// Builds a tree whose values are the indices of the points in `points`.
    pub fn from_points(points: Vec<Vec<f64>>, metric: M) -> Result<Self> {
        let indices = (0..points.len()).collect();
        Self::build(points, indices, metric)
    }
}

impl<'a, T, M> IntoIterator for &'a KdTree<T, M> {
    type Item = &'a KdNode<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over the nodes of a [`KdTree`].
pub struct Iter<'a, T> {
    stack: Vec<&'a KdNode<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a KdNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        Some(node)
    }
}

fn build_node<T>(
    mut entries: Vec<(Vec<f64>, T)>,
    depth: usize,
    dimensions: usize,
    leaves: &mut usize,
) -> Option<Box<KdNode<T>>> {
    if entries.is_empty() {
        return None;
    }
    let axis = depth % dimensions;
    let median = entries.len() / 2;
    entries.select_nth_unstable_by_key(median, |(position, _)| FloatOrd(position[axis]));
    let right = entries.split_off(median + 1);
    let (position, value) = entries.pop()?;

    let mut node = KdNode::new(position, axis, value);
    node.left = build_node(entries, depth + 1, dimensions, leaves);
    node.right = build_node(right, depth + 1, dimensions, leaves);
    if node.is_leaf() {
        *leaves += 1;
    }
    Some(Box::new(node))
}

/// Returns `true` if the number of leaves grew, which happens unless the new
/// node hangs off a node that was already a leaf.
fn insert_node<T>(
    slot: &mut Option<Box<KdNode<T>>>,
    position: Vec<f64>,
    value: T,
    depth: usize,
    dimensions: usize,
    parent_was_leaf: bool,
) -> bool {
    match slot {
        None => {
            *slot = Some(Box::new(KdNode::new(position, depth % dimensions, value)));
            !parent_was_leaf
        }
        Some(node) => {
            let was_leaf = node.is_leaf();
            let next = if position[node.axis] < node.position[node.axis] {
                &mut node.left
            } else {
                &mut node.right
            };
            insert_node(next, position, value, depth + 1, dimensions, was_leaf)
        }
    }
}
