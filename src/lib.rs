//! An AVL-balanced interval tree for closed intervals.
//!
//! An [`IntervalTree`] stores closed [`Interval`] instances `[low, high]` keyed
//! by their lower bound, and answers overlap queries in logarithmic time by
//! caching the maximum upper bound of each subtree.
//!
//! ```
//! use avl_interval_tree::{Interval, IntervalTree};
//!
//! let mut t = IntervalTree::new();
//! for (low, high) in [(0, 3), (6, 10), (5, 8), (19, 20), (17, 19)] {
//!     t.insert(Interval::new(low, high)?);
//! }
//!
//! let query = Interval::new(4, 9)?;
//!
//! // Find any stored interval overlapping [4, 9].
//! let got = t.find_overlap(&query).unwrap();
//! assert!(got.overlaps(&query));
//!
//! // Or all of them, ordered by lower bound.
//! let all = t.collect_overlaps(&query);
//! assert_eq!(all, [&Interval::new(5, 8)?, &Interval::new(6, 10)?]);
//!
//! // Exact-match lookups compare both bounds.
//! assert!(t.contains(&Interval::new(5, 8)?));
//! assert!(!t.contains(&query));
//!
//! // Invalid intervals are rejected at construction.
//! assert!(Interval::new(9, 4).is_err());
//! # Ok::<(), avl_interval_tree::InvalidInterval<i32>>(())
//! ```

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(missing_debug_implementations)]

mod error;
mod interval;
mod iter;
mod node;
mod tree;

#[cfg(test)]
mod test_utils;

pub use error::InvalidInterval;
pub use interval::Interval;
pub use iter::{IntoIter, Iter, LevelOrderIter, OverlapsIter};
pub use tree::IntervalTree;
