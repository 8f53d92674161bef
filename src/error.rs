use thiserror::Error;

/// Returned when constructing an [`Interval`] whose lower bound exceeds its
/// upper bound.
///
/// [`Interval`]: crate::Interval
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid interval: low bound {low} is greater than high bound {high}")]
pub struct InvalidInterval {
    low: String,
    high: String,
}

impl InvalidInterval {
    pub(crate) fn new<R>(low: &R, high: &R) -> Self
    where
        R: std::fmt::Debug,
    {
        Self {
            low: format!("{low:?}"),
            high: format!("{high:?}"),
        }
    }

    /// The rendered lower bound that was rejected.
    pub fn low(&self) -> &str {
        &self.low
    }

    /// The rendered upper bound that was rejected.
    pub fn high(&self) -> &str {
        &self.high
    }
}
