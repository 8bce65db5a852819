use std::fmt::Debug;

use thiserror::Error;

/// The error returned when constructing an [`Interval`] with a lower bound
/// greater than its upper bound.
///
/// [`Interval`]: crate::Interval
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid interval [{low:?}, {high:?}]: low bound exceeds high bound")]
pub struct InvalidInterval<R>
where
    R: Debug,
{
    low: R,
    high: R,
}

impl<R> InvalidInterval<R>
where
    R: Debug,
{
    pub(crate) fn new(low: R, high: R) -> Self {
        Self { low, high }
    }

    /// The rejected lower bound.
    pub fn low(&self) -> &R {
        &self.low
    }

    /// The rejected upper bound.
    pub fn high(&self) -> &R {
        &self.high
    }
}
