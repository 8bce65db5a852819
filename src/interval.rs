use std::{
    fmt::{Debug, Display},
    ops::RangeInclusive,
};

use crate::error::InvalidInterval;

/// A closed interval `[low, high]` over a totally-ordered bound type `R`.
///
/// An [`Interval`] always satisfies `low <= high`, which is validated when it
/// is constructed. Two intervals are equal when both bounds match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval<R> {
    low: R,
    high: R,
}

impl<R> Interval<R>
where
    R: Ord + Debug,
{
    /// Construct the closed interval `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInterval`] if `low > high`.
    pub fn new(low: R, high: R) -> Result<Self, InvalidInterval<R>> {
        if low > high {
            return Err(InvalidInterval::new(low, high));
        }
        Ok(Self { low, high })
    }
}

impl<R> Interval<R> {
    /// The lower (inclusive) bound.
    pub fn low(&self) -> &R {
        &self.low
    }

    /// The upper (inclusive) bound.
    pub fn high(&self) -> &R {
        &self.high
    }

    /// Explode this [`Interval`] into its `(low, high)` bounds.
    pub fn into_inner(self) -> (R, R) {
        (self.low, self.high)
    }

    /// Returns true if `self` and `other` share at least one point.
    ///
    /// ```text
    ///           low         high
    ///            ■■■■■■■■■■■■■
    ///                     ■■■■■■■■■■■■■
    ///                    low         high
    /// ```
    ///
    /// Both intervals are closed, so intervals touching at a single bound
    /// overlap.
    pub fn overlaps(&self, other: &Self) -> bool
    where
        R: Ord,
    {
        self.low <= other.high && other.low <= self.high
    }
}

impl<R> TryFrom<(R, R)> for Interval<R>
where
    R: Ord + Debug,
{
    type Error = InvalidInterval<R>;

    fn try_from((low, high): (R, R)) -> Result<Self, Self::Error> {
        Self::new(low, high)
    }
}

impl<R> TryFrom<RangeInclusive<R>> for Interval<R>
where
    R: Ord + Debug,
{
    type Error = InvalidInterval<R>;

    fn try_from(value: RangeInclusive<R>) -> Result<Self, Self::Error> {
        let (low, high) = value.into_inner();
        Self::new(low, high)
    }
}

impl<R> Display for Interval<R>
where
    R: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}
