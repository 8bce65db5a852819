use std::{cmp::Ordering, fmt::Debug};

use tracing::trace;

use crate::interval::Interval;

#[derive(Debug, Clone)]
pub(crate) struct Node<R> {
    /// Child nodes pointers.
    left: Option<Box<Node<R>>>,
    right: Option<Box<Node<R>>>,

    /// The node's AVL height.
    ///
    /// A leaf has a height of 0, and an absent child is treated as having a
    /// height of -1.
    ///
    /// A u8 holds a maximum value of 255, meaning it can represent the height
    /// of a balanced tree of up to 5.78*10⁷⁶ entries.
    height: u8,

    /// The maximum upper bound of all intervals for the subtree rooted at this
    /// [`Node`].
    max_high: R,

    interval: Interval<R>,
}

impl<R> Node<R> {
    pub(crate) fn new(interval: Interval<R>) -> Self
    where
        R: Clone,
    {
        Self {
            max_high: interval.high().clone(),
            interval,
            left: None,
            right: None,
            height: 0,
        }
    }

    /// Insert `interval` into the subtree rooted at `self`.
    ///
    /// Nodes are keyed by their lower bound only. If a node with the same
    /// lower bound already exists the tree is left unchanged and false is
    /// returned.
    pub(crate) fn insert(self: &mut Box<Self>, interval: Interval<R>) -> bool
    where
        R: Ord + Clone + Debug,
    {
        let child = match interval.low().cmp(self.interval.low()) {
            Ordering::Less => &mut self.left,
            Ordering::Equal => {
                trace!(
                    existing = ?self.interval,
                    rejected = ?interval,
                    "ignoring insert of duplicate lower bound"
                );
                return false;
            }
            Ordering::Greater => &mut self.right,
        };

        match child {
            Some(v) => {
                if !v.insert(interval) {
                    // The tree structure has not been modified, so it does not
                    // require rebalancing.
                    return false;
                }
            }
            None => {
                // Insert the value as a new immediate descendent of self.
                *child = Some(Box::new(Self::new(interval)));

                // Inserting this new child node cannot skew the tree in the
                // direction of the new addition such that it requires the tree
                // be rebalanced as, at most, it creates an absolute difference
                // of 1 in this direction (from balanced, or slightly skewed in
                // the opposite direction).
                //
                // Update this node and skip the rebalancing checks.
                update_height(self);
                update_max_high(self);
                return true;
            }
        };

        rebalance(self);
        true
    }

    /// Returns true if an interval equal to `interval` (both bounds) is stored
    /// in the subtree rooted at `self`.
    ///
    /// This is an exact-match lookup guided by the lower bound only.
    pub(crate) fn contains(&self, interval: &Interval<R>) -> bool
    where
        R: Ord,
    {
        let node = match interval.low().cmp(self.interval.low()) {
            Ordering::Less => self.left(),
            Ordering::Equal => return self.interval == *interval,
            Ordering::Greater => self.right(),
        };

        node.map(|v| v.contains(interval)).unwrap_or_default()
    }

    /// Return any interval in the subtree rooted at `self` that overlaps
    /// `query`.
    pub(crate) fn find_overlap(&self, query: &Interval<R>) -> Option<&Interval<R>>
    where
        R: Ord,
    {
        if self.interval.overlaps(query) {
            return Some(&self.interval);
        }

        match self.left() {
            // If the left subtree contains an interval ending at or after the
            // query start, and none of them overlap, then every interval in the
            // right subtree starts after the query end.
            Some(left) if left.max_high() >= query.low() => left.find_overlap(query),
            _ => self.right()?.find_overlap(query),
        }
    }

    pub(crate) fn interval(&self) -> &Interval<R> {
        &self.interval
    }

    pub(crate) fn max_high(&self) -> &R {
        &self.max_high
    }

    pub(crate) fn height(&self) -> u8 {
        self.height
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn left_mut(&mut self) -> Option<&mut Box<Self>> {
        self.left.as_mut()
    }

    /// Remove the left child, if any.
    pub(crate) fn take_left(&mut self) -> Option<Box<Self>> {
        self.left.take()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    pub(crate) fn right_mut(&mut self) -> Option<&mut Box<Self>> {
        self.right.as_mut()
    }

    /// Remove the right child, if any.
    pub(crate) fn take_right(&mut self) -> Option<Box<Self>> {
        self.right.take()
    }

    /// Consume this [`Node`], returning the [`Interval`] it contains.
    pub(crate) fn into_interval(self) -> Interval<R> {
        self.interval
    }

    /// Link `intervals` into a degenerate right-leaning chain, without
    /// rebalancing or maintaining node heights, returning the head.
    #[cfg(test)]
    pub(crate) fn right_chain<I>(intervals: I) -> Option<Box<Self>>
    where
        R: Clone,
        I: DoubleEndedIterator<Item = Interval<R>>,
    {
        let mut chain = None;
        for v in intervals.rev() {
            let mut n = Self::new(v);
            n.right = chain;
            chain = Some(Box::new(n));
        }
        chain
    }
}

/// The height of `n`, or -1 when there is no node.
fn height<R>(n: Option<&Node<R>>) -> i16 {
    n.map(|v| v.height() as i16).unwrap_or(-1)
}

fn update_height<R>(n: &mut Node<R>) {
    // Correctness: the maximum child height is at least -1, so the result is
    // never negative.
    n.height = (height(n.left()).max(height(n.right())) + 1) as u8;
}

fn update_max_high<R>(n: &mut Node<R>)
where
    R: Ord + Clone,
{
    let new_max = n
        .left()
        .map(|v| v.max_high())
        .max(n.right().map(|v| v.max_high()))
        .max(Some(n.interval().high()));

    if let Some(new_max) = new_max {
        n.max_high = new_max.clone();
    }
}

/// Compute the "balance factor" of the subtree rooted at `n`.
///
/// Returns the subtree height skew / magnitude, which is a positive number when
/// left heavy, and a negative number when right heavy.
fn balance<R>(n: &Node<R>) -> i8 {
    // Correctness: the height is a u8, the maximal value of which fits in an
    // i16 without truncation or sign inversion.
    (height(n.left()) - height(n.right())) as i8
}

/// Recompute the height of `n` and restore the AVL balance of the subtree
/// rooted at it, refreshing the cached `max_high` of every node touched.
fn rebalance<R>(n: &mut Box<Node<R>>)
where
    R: Ord + Clone + Debug,
{
    update_height(n);

    match balance(n) {
        // Left-left
        2 if n.left().map(balance).unwrap_or_default() >= 0 => {
            trace!(pivot = ?n.interval(), "rotate right");
            rotate_right(n);
        }
        // Left-right
        2 => {
            trace!(pivot = ?n.interval(), "rotate left-right");
            if let Some(left) = n.left_mut() {
                rotate_left(left);
            }
            rotate_right(n);
        }
        // Right-right
        -2 if n.right().map(balance).unwrap_or_default() <= 0 => {
            trace!(pivot = ?n.interval(), "rotate left");
            rotate_left(n);
        }
        // Right-left
        -2 => {
            trace!(pivot = ?n.interval(), "rotate right-left");
            if let Some(right) = n.right_mut() {
                rotate_right(right);
            }
            rotate_left(n);
        }
        -1..=1 => {
            // The tree is well balanced, but the children may have changed.
            update_max_high(n);
        }
        v => unreachable!("balance factor {v} after a single node change"),
    }

    // Invariant: the absolute difference between tree heights ("balance
    // factor") cannot exceed 1.
    debug_assert!(balance(n).abs() <= 1);
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// # Panics
///
/// Panics if `x` has no right pointer (cannot be rotated).
fn rotate_left<R>(x: &mut Box<Node<R>>)
where
    R: Ord + Clone,
{
    let mut p = x.right.take().unwrap();
    std::mem::swap(x, &mut p);

    // "p" is now the demoted node, and must be updated before the promoted
    // node that is its new parent.
    p.right = x.left.take();
    update_height(&mut p);
    update_max_high(&mut p);

    x.left = Some(p);
    update_height(x);
    update_max_high(x);
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// # Panics
///
/// Panics if `y` has no left pointer (cannot be rotated).
fn rotate_right<R>(y: &mut Box<Node<R>>)
where
    R: Ord + Clone,
{
    let mut p = y.left.take().unwrap();
    std::mem::swap(y, &mut p);

    p.left = y.right.take();
    update_height(&mut p);
    update_max_high(&mut p);

    y.right = Some(p);
    update_height(y);
    update_max_high(y);
}

/// Unlink the node holding the minimum interval in the subtree at `slot`,
/// returning its interval and linking its right subtree (if any) in its place.
///
/// Every node on the path to the minimum is rebalanced.
fn extract_subtree_min<R>(slot: &mut Option<Box<Node<R>>>) -> Option<Interval<R>>
where
    R: Ord + Clone + Debug,
{
    let n = slot.as_mut()?;

    // Descend left to the end of the left edge.
    if n.left.is_some() {
        let min = extract_subtree_min(&mut n.left);
        rebalance(n);
        return min;
    }

    // "n" is the minimum. It has no left child, so its right child (if any)
    // replaces it.
    let right = n.take_right();
    let min = std::mem::replace(slot, right)?;

    debug_assert!(min.left.is_none());
    debug_assert!(min.right.is_none());

    Some(min.into_interval())
}

/// Remove the node holding an interval equal to `interval` from the subtree
/// at `slot`, returning the removed interval.
///
/// Returns [`None`] if the interval is not found, leaving the subtree
/// unchanged.
pub(crate) fn remove_recurse<R>(
    slot: &mut Option<Box<Node<R>>>,
    interval: &Interval<R>,
) -> Option<Interval<R>>
where
    R: Ord + Clone + Debug,
{
    let n = slot.as_mut()?;

    // Prune this subtree from the search if the maximum upper bound in the
    // subtree is less than the target upper bound. If true, this subtree
    // cannot contain the interval.
    if n.max_high() < interval.high() {
        return None;
    }

    let removed = match interval.low().cmp(n.interval.low()) {
        Ordering::Less => remove_recurse(&mut n.left, interval)?,
        Ordering::Greater => remove_recurse(&mut n.right, interval)?,
        Ordering::Equal if n.interval != *interval => return None,
        Ordering::Equal if n.left.is_some() && n.right.is_some() => {
            // This node has two children.
            //
            // The in-order successor (the minimum of the right subtree) is
            // unlinked and its interval moved into this node, preserving the
            // binary search property.
            let successor = extract_subtree_min(&mut n.right)?;
            std::mem::replace(&mut n.interval, successor)
        }
        Ordering::Equal => {
            // This node has at most one child, which replaces it. The child
            // subtree is already balanced, and the parent rebalances.
            let child = n.take_left().or_else(|| n.take_right());
            let old = std::mem::replace(slot, child)?;

            debug_assert!(old.left.is_none());
            debug_assert!(old.right.is_none());

            return Some(old.into_interval());
        }
    };

    rebalance(n);

    // Invariant: the old interval is no longer held by this node.
    debug_assert_ne!(n.interval, removed);

    Some(removed)
}
