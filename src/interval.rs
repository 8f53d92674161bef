use std::{fmt::Debug, ops::RangeInclusive};

use crate::InvalidInterval;

/// An immutable, closed interval `[low, high]`.
///
/// The `low <= high` invariant is checked once at construction and cannot be
/// broken afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawInterval<R>",
        bound(deserialize = "R: Ord + Debug + serde::Deserialize<'de>")
    )
)]
pub struct Interval<R> {
    low: R,
    high: R,
}

impl<R> Interval<R> {
    /// Construct a new [`Interval`], returning [`InvalidInterval`] if `low`
    /// is greater than `high`.
    pub fn new(low: R, high: R) -> Result<Self, InvalidInterval>
    where
        R: Ord + Debug,
    {
        if low > high {
            return Err(InvalidInterval::new(&low, &high));
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> &R {
        &self.low
    }

    pub fn high(&self) -> &R {
        &self.high
    }

    /// Returns true if this interval shares at least one point with the
    /// closed interval `[low, high]`.
    pub fn overlaps(&self, low: &R, high: &R) -> bool
    where
        R: Ord,
    {
        self.low <= *high && *low <= self.high
    }

    pub fn into_inner(self) -> (R, R) {
        (self.low, self.high)
    }
}

impl<R> TryFrom<RangeInclusive<R>> for Interval<R>
where
    R: Ord + Debug,
{
    type Error = InvalidInterval;

    fn try_from(value: RangeInclusive<R>) -> Result<Self, Self::Error> {
        let (low, high) = value.into_inner();
        Self::new(low, high)
    }
}

/// The unvalidated wire form of an [`Interval`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawInterval<R> {
    low: R,
    high: R,
}

#[cfg(feature = "serde")]
impl<R> TryFrom<RawInterval<R>> for Interval<R>
where
    R: Ord + Debug,
{
    type Error = InvalidInterval;

    fn try_from(value: RawInterval<R>) -> Result<Self, Self::Error> {
        Self::new(value.low, value.high)
    }
}

/// An [`Interval`] and the caller-provided payload stored against it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "R: serde::Serialize, V: serde::Serialize",
        deserialize = "R: Ord + Debug + serde::Deserialize<'de>, V: serde::Deserialize<'de>"
    ))
)]
pub struct Record<R, V> {
    interval: Interval<R>,
    data: V,
}

impl<R, V> Record<R, V> {
    pub(crate) fn new(interval: Interval<R>, data: V) -> Self {
        Self { interval, data }
    }

    pub fn interval(&self) -> &Interval<R> {
        &self.interval
    }

    pub fn data(&self) -> &V {
        &self.data
    }

    /// Explode this [`Record`] into the [`Interval`] and payload it contains.
    pub fn into_parts(self) -> (Interval<R>, V) {
        (self.interval, self.data)
    }
}
