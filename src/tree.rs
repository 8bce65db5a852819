use std::fmt::Debug;

use tracing::{debug, trace};

use crate::{
    interval::Interval,
    iter::{IntoIter, Iter, LevelOrderIter, OverlapsIter},
    node::{remove_recurse, Node},
};

/// An [`IntervalTree`] stores closed [`Interval`] instances, enabling efficient
/// lookup of stored intervals that overlap a query interval.
///
/// # Read Optimised
///
/// This [`IntervalTree`] is backed by an augmented AVL tree keyed by the
/// interval lower bound. Each node caches the maximum upper bound of all
/// intervals in its subtree, allowing overlap searches to skip subtrees that
/// cannot contain a match.
///
/// The internal tree structure is modified during inserts and removals to
/// ensure the tree always remains balanced, bounding all operations to a
/// logarithmic worst-case time complexity.
///
/// ## Duplicate Lower Bounds
///
/// At most one interval is stored for any given lower bound. Inserting an
/// interval with the same lower bound as a stored interval is a no-op, and the
/// first interval inserted is kept.
///
/// ## `R: Clone`
///
/// Tree nodes cache an upper bound to enable pruning during lookups, which
/// requires the bound type `R` to implement [`Clone`].
#[derive(Debug, Clone)]
pub struct IntervalTree<R> {
    root: Option<Box<Node<R>>>,
    len: usize,
}

impl<R> Default for IntervalTree<R> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<R> IntervalTree<R> {
    /// Construct an empty [`IntervalTree`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of intervals stored in this tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no intervals are stored in this tree.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The height of the tree, where a tree with a single interval has a
    /// height of 0.
    ///
    /// Returns [`None`] for an empty tree.
    pub fn height(&self) -> Option<u8> {
        self.root.as_ref().map(|v| v.height())
    }

    /// The largest upper bound of all intervals in the tree, if any.
    pub fn max_high(&self) -> Option<&R> {
        self.root.as_ref().map(|v| v.max_high())
    }

    /// The interval with the smallest lower bound, if any.
    pub fn first(&self) -> Option<&Interval<R>> {
        let mut n = self.root.as_deref()?;
        while let Some(left) = n.left() {
            n = left;
        }
        Some(n.interval())
    }

    /// The interval with the largest lower bound, if any.
    pub fn last(&self) -> Option<&Interval<R>> {
        let mut n = self.root.as_deref()?;
        while let Some(right) = n.right() {
            n = right;
        }
        Some(n.interval())
    }

    /// Iterate over references of all intervals stored in this tree.
    ///
    /// # Ordering
    ///
    /// The returned [`Iterator`] yields intervals from lowest to highest
    /// ordered by the interval lower bound.
    pub fn iter(&self) -> Iter<'_, R> {
        Iter::new(self.root.as_deref())
    }

    /// Iterate over references of all intervals stored in this tree in
    /// breadth-first order, starting at the root.
    pub fn iter_level_order(&self) -> LevelOrderIter<'_, R> {
        LevelOrderIter::new(self.root.as_deref())
    }

    /// Iterate over all intervals stored in this tree in ascending lower bound
    /// order, paired with the largest upper bound of the subtree rooted at
    /// each interval.
    pub fn iter_with_max_high(&self) -> impl Iterator<Item = (&Interval<R>, &R)> {
        let mut iter = Iter::new(self.root.as_deref());
        std::iter::from_fn(move || iter.next_node())
            .map(|v| (v.interval(), v.max_high()))
    }

    /// Iterate over all intervals stored in this tree in breadth-first order,
    /// paired with the largest upper bound of the subtree rooted at each
    /// interval.
    pub fn iter_level_order_with_max_high(&self) -> impl Iterator<Item = (&Interval<R>, &R)> {
        let mut iter = LevelOrderIter::new(self.root.as_deref());
        std::iter::from_fn(move || iter.next_node())
            .map(|v| (v.interval(), v.max_high()))
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<&Node<R>> {
        self.root.as_deref()
    }
}

impl<R> IntervalTree<R>
where
    R: Ord,
{
    /// Insert `interval` into the tree.
    ///
    /// Returns false and leaves the tree unchanged if an interval with the same
    /// lower bound is already stored, otherwise returns true.
    pub fn insert(&mut self, interval: Interval<R>) -> bool
    where
        R: Clone + Debug,
    {
        let inserted = match self.root {
            Some(ref mut v) => v.insert(interval),
            None => {
                self.root = Some(Box::new(Node::new(interval)));
                true
            }
        };

        if inserted {
            self.len += 1;
        }

        inserted
    }

    /// Returns true if an interval equal to `interval` is stored in the tree.
    ///
    /// Both bounds must match for an interval to be considered equal.
    pub fn contains(&self, interval: &Interval<R>) -> bool {
        self.root
            .as_ref()
            .map(|v| v.contains(interval))
            .unwrap_or_default()
    }

    /// Return a stored interval that overlaps with `query`, if any.
    ///
    /// When more than one stored interval overlaps `query`, which one is
    /// returned is unspecified. Use [`IntervalTree::iter_overlaps()`] to visit
    /// all of them.
    pub fn find_overlap(&self, query: &Interval<R>) -> Option<&Interval<R>> {
        self.root.as_ref()?.find_overlap(query)
    }

    /// Return all stored intervals that overlap with the specified `query`
    /// interval (an "interval stabbing" query).
    ///
    /// The diagram below shows two intervals where `X` overlaps the query
    /// interval `Y`, and `Y` overlaps `X`:
    ///
    /// ```text
    ///                           X
    ///                   ■■■■■■■■■■■■■■■■■
    ///
    ///                               ■■■■■■■■■■■■■■■■■
    ///                                       Y
    /// ```
    ///
    /// Intervals are yielded in ascending lower bound order.
    pub fn iter_overlaps<'a>(&'a self, query: &'a Interval<R>) -> OverlapsIter<'a, R> {
        OverlapsIter::new(self.root.as_deref(), query)
    }

    /// Collect all stored intervals that overlap with `query`, in ascending
    /// lower bound order.
    ///
    /// Returns an empty [`Vec`] if no stored interval overlaps.
    pub fn collect_overlaps<'a>(&'a self, query: &'a Interval<R>) -> Vec<&'a Interval<R>> {
        self.iter_overlaps(query).collect()
    }

    /// Remove the stored interval equal to `interval` from the tree.
    ///
    /// Returns [`None`] if `interval` was not present in the tree.
    pub fn remove(&mut self, interval: &Interval<R>) -> Option<Interval<R>>
    where
        R: Clone + Debug,
    {
        let Some(removed) = remove_recurse(&mut self.root, interval) else {
            trace!(?interval, "interval not found for removal");
            return None;
        };

        self.len -= 1;
        Some(removed)
    }
}

impl<R> Drop for IntervalTree<R> {
    fn drop(&mut self) {
        // Release the nodes iteratively rather than through the recursive
        // drop glue of the owned child pointers.
        let mut stack = Vec::from_iter(self.root.take());
        while let Some(mut n) = stack.pop() {
            stack.extend(n.take_left());
            stack.extend(n.take_right());
        }
    }
}

impl<R> FromIterator<Interval<R>> for IntervalTree<R>
where
    R: Ord + Clone + Debug,
{
    fn from_iter<T: IntoIterator<Item = Interval<R>>>(iter: T) -> Self {
        let mut t = Self::default();
        t.extend(iter);
        t
    }
}

impl<R> Extend<Interval<R>> for IntervalTree<R>
where
    R: Ord + Clone + Debug,
{
    fn extend<T: IntoIterator<Item = Interval<R>>>(&mut self, iter: T) {
        let mut n_ignored = 0_usize;
        for v in iter {
            if !self.insert(v) {
                n_ignored += 1;
            }
        }

        if n_ignored > 0 {
            debug!(n_ignored, "ignored intervals with duplicate lower bounds");
        }
    }
}

impl<R> IntoIterator for IntervalTree<R> {
    type Item = Interval<R>;
    type IntoIter = IntoIter<R>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.root.take(), std::mem::take(&mut self.len))
    }
}

impl<'a, R> IntoIterator for &'a IntervalTree<R> {
    type Item = &'a Interval<R>;
    type IntoIter = Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
