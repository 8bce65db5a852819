use std::collections::VecDeque;

use crate::{interval::Interval, node::Node};

/// A breadth-first iterator of references to the [`Interval`] instances in an
/// [`IntervalTree`], visiting the root first and then each level from left to
/// right.
///
/// [`IntervalTree`]: crate::IntervalTree
#[derive(Debug, Clone)]
pub struct LevelOrderIter<'a, R> {
    queue: VecDeque<&'a Node<R>>,
}

impl<'a, R> LevelOrderIter<'a, R> {
    pub(crate) fn new(root: Option<&'a Node<R>>) -> Self {
        Self {
            queue: root.into_iter().collect(),
        }
    }

    pub(crate) fn next_node(&mut self) -> Option<&'a Node<R>> {
        let v = self.queue.pop_front()?;

        self.queue.extend(v.left());
        self.queue.extend(v.right());

        Some(v)
    }
}

impl<'a, R> Iterator for LevelOrderIter<'a, R> {
    type Item = &'a Interval<R>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node().map(|v| v.interval())
    }
}
