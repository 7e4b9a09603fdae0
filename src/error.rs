//! Error types.

use thiserror::Error;

/// Errors raised while interpreting caller-supplied time labels.
///
/// Generation itself never fails; these surface only from the
/// time-parsing helpers used by the conflict predicate and the
/// manual-scheduling ranking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimetableError {
    /// A time label is not `HH:MM` on a 24-hour clock.
    #[error("invalid time '{0}': expected HH:MM")]
    InvalidTime(String),
    /// A time range label is not `HH:MM-HH:MM`.
    #[error("invalid time range '{0}': expected HH:MM-HH:MM")]
    InvalidTimeRange(String),
}

/// Result alias for fallible helpers in this crate.
pub type Result<T> = std::result::Result<T, TimetableError>;
