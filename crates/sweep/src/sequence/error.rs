use thiserror::Error;

/// Error returned when discovery produced no steps at all.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no simulation steps were discovered")]
pub struct EmptyRangeError;
