use crate::{interval::Interval, node::Node};

/// An in-order iterator yielding the stored [`Interval`] instances that overlap
/// a query interval.
///
/// Subtrees that cannot contain an overlapping interval are pruned using the
/// per-node `max_high` bound and the lower bound ordering.
#[derive(Debug, Clone)]
pub struct OverlapsIter<'a, R> {
    query: &'a Interval<R>,
    stack: Vec<&'a Node<R>>,
}

impl<'a, R> OverlapsIter<'a, R>
where
    R: Ord,
{
    pub(crate) fn new(root: Option<&'a Node<R>>, query: &'a Interval<R>) -> Self {
        let mut this = Self {
            stack: vec![],
            query,
        };

        // Descend down the left side of the tree, pushing all the internal
        // nodes onto the stack until the left-most leaf is reached.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: &'a Node<R>) {
        let mut ptr = Some(subtree_root);

        while let Some(v) = ptr {
            if v.max_high() < self.query.low() {
                // Prune this subtree rooted at "v" from the search.
                //
                // All intervals in this subtree end before the query starts.
                break;
            }

            self.stack.push(v);
            ptr = v.left();
        }
    }
}

impl<'a, R> Iterator for OverlapsIter<'a, R>
where
    R: Ord,
{
    type Item = &'a Interval<R>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.stack.pop()?;

            if v.interval().low() > self.query.high() {
                // Prune this node and the right subtree from the search.
                //
                // All values in the right subtree start after the query ends.
                continue;
            }

            // Push the right subtree to be visited next.
            if let Some(right) = v.right() {
                self.push_subtree(right);
            }

            // Yield this node if it overlaps with the query range.
            if v.interval().overlaps(self.query) {
                return Some(v.interval());
            }
        }
    }
}
