use float_ord::FloatOrd;
use std::collections::BTreeMap;

/// A fixed-capacity collection of candidates ranked by distance.
///
/// Candidates are grouped into buckets of equal distance. Inside a bucket they
/// keep their insertion order, and eviction always removes the most recently
/// added candidate of the bucket, so when distances tie the candidate that was
/// registered first survives. [`NeighborCollection::add_by`] instead keeps
/// each bucket sorted by a caller supplied order, making the survivors of a
/// tie independent of the order candidates are offered in.
///
/// NaN distances are never stored.
///
/// Insertion is `O(log n)` in the number of distinct distances.
#[derive(Debug, Clone)]
pub struct NeighborCollection<T> {
    capacity: usize,
    len: usize,
    buckets: BTreeMap<FloatOrd<f64>, Vec<T>>,
}

impl<T> NeighborCollection<T> {
    /// Creates an empty collection which holds at most `capacity` candidates.
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self {
            capacity,
            len: 0,
            buckets: BTreeMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len >= self.capacity
    }

    /// Distance of the closest candidate.
    pub fn min_distance(&self) -> Option<f64> {
        self.buckets.keys().next().map(|d| d.0)
    }

    /// Distance of the farthest candidate.
    pub fn max_distance(&self) -> Option<f64> {
        self.buckets.keys().next_back().map(|d| d.0)
    }

    /// The first registered candidate at the smallest distance.
    pub fn nearest(&self) -> Option<(&T, f64)> {
        self.buckets
            .iter()
            .next()
            .and_then(|(d, bucket)| bucket.first().map(|item| (item, d.0)))
    }

    /// The first registered candidate at the largest distance.
    pub fn farthest(&self) -> Option<(&T, f64)> {
        self.buckets
            .iter()
            .next_back()
            .and_then(|(d, bucket)| bucket.first().map(|item| (item, d.0)))
    }

    /// Offers a candidate, keeping the `capacity` closest ones.
    ///
    /// Returns whether the candidate was kept. When the collection is full the
    /// candidate must be strictly closer than the current farthest one, which
    /// is then evicted. A NaN distance is always rejected.
    pub fn add(&mut self, item: T, distance: f64) -> bool {
        if distance.is_nan() {
            return false;
        }
        if !self.is_full() {
            self.insert(item, distance);
            return true;
        }
        match self.max_distance() {
            Some(max) if distance < max => {
                self.evict(FloatOrd(max));
                self.insert(item, distance);
                true
            }
            _ => false,
        }
    }

    /// Offers a candidate, keeping the `capacity` farthest ones.
    ///
    /// The reverse of [`NeighborCollection::add`]: when full, the candidate
    /// must be strictly farther than the current closest one, which is then
    /// evicted. A NaN distance is always rejected.
    pub fn add_farthest(&mut self, item: T, distance: f64) -> bool {
        if distance.is_nan() {
            return false;
        }
        if !self.is_full() {
            self.insert(item, distance);
            return true;
        }
        match self.min_distance() {
            Some(min) if distance > min => {
                self.evict(FloatOrd(min));
                self.insert(item, distance);
                true
            }
            _ => false,
        }
    }

    /// Offers a candidate like [`NeighborCollection::add`], ordering candidates
    /// at equal distance with `less`.
    ///
    /// When the collection is full, a candidate at the current farthest
    /// distance replaces the greatest candidate of that distance if `less`
    /// ranks it before that one.
    pub fn add_by<F>(&mut self, item: T, distance: f64, less: F) -> bool
    where
        F: Fn(&T, &T) -> bool,
    {
        if distance.is_nan() {
            return false;
        }
        if self.is_full() {
            let max = match self.buckets.iter().next_back() {
                Some((max, bucket)) => {
                    let displaces = distance == max.0
                        && bucket.last().map_or(false, |last| less(&item, last));
                    if distance > max.0 || (distance == max.0 && !displaces) {
                        return false;
                    }
                    *max
                }
                None => return false,
            };
            self.evict(max);
        }
        let bucket = self.buckets.entry(FloatOrd(distance)).or_default();
        let position = bucket.partition_point(|x| !less(&item, x));
        bucket.insert(position, item);
        self.len += 1;
        true
    }

    /// Offers a candidate, ranking candidates at equal distance by their
    /// natural order.
    pub fn add_ordered(&mut self, item: T, distance: f64) -> bool
    where
        T: Ord,
    {
        self.add_by(item, distance, |a, b| a < b)
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }

    /// Iterates candidates by ascending distance, in insertion order within a
    /// distance.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> + '_ {
        self.buckets
            .iter()
            .flat_map(|(d, bucket)| bucket.iter().map(move |item| (item, d.0)))
    }

    /// Consumes the collection, producing candidates ranked by ascending distance.
    pub fn into_sorted_vec(self) -> Vec<(T, f64)> {
        self.buckets
            .into_iter()
            .flat_map(|(d, bucket)| bucket.into_iter().map(move |item| (item, d.0)))
            .collect()
    }

    fn insert(&mut self, item: T, distance: f64) {
        self.buckets.entry(FloatOrd(distance)).or_default().push(item);
        self.len += 1;
    }

    fn evict(&mut self, distance: FloatOrd<f64>) {
        if let Some(bucket) = self.buckets.get_mut(&distance) {
            bucket.pop();
            self.len -= 1;
            if bucket.is_empty() {
                self.buckets.remove(&distance);
            }
        }
    }
}
