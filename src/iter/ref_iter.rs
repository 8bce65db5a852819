use crate::{interval::Interval, node::Node};

/// An in-order iterator of references to the [`Interval`] instances in an
/// [`IntervalTree`], ordered by ascending lower bound.
///
/// [`IntervalTree`]: crate::IntervalTree
#[derive(Debug, Clone)]
pub struct Iter<'a, R> {
    stack: Vec<&'a Node<R>>,
}

impl<'a, R> Iter<'a, R> {
    pub(crate) fn new(root: Option<&'a Node<R>>) -> Self {
        let mut this = Self { stack: vec![] };

        // Descend down the left side of the tree.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: &'a Node<R>) {
        let mut ptr = Some(subtree_root);

        while let Some(v) = ptr {
            self.stack.push(v);
            ptr = v.left();
        }
    }

    pub(crate) fn next_node(&mut self) -> Option<&'a Node<R>> {
        let v = self.stack.pop()?;

        // Descend down the left side of the right hand child of this node, if
        // any.
        if let Some(right) = v.right() {
            self.push_subtree(right);
        }

        Some(v)
    }
}

impl<'a, R> Iterator for Iter<'a, R> {
    type Item = &'a Interval<R>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node().map(|v| v.interval())
    }
}
