//! Error types for the cachequeue library.
//!
//! Queue operations never fail: "not found" is reported as `false` or `None`.
//! Errors exist only at the edges.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned by `check_invariants` when the linked chain
//!   or the index disagree with each other.
//! - [`ConfigError`]: Returned when builder parameters are invalid
//!   (e.g. zero index shards).
//!
//! ## Example Usage
//!
//! ```
//! use cachequeue::builder::QueueBuilder;
//! use cachequeue::error::ConfigError;
//!
//! let queue = QueueBuilder::new().shards(8).try_build::<u64>();
//! assert!(queue.is_ok());
//!
//! let bad: Result<_, ConfigError> = QueueBuilder::new().shards(0).try_build::<u64>();
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal queue invariants are violated.
///
/// Produced by
/// [`FastRemovalQueue::check_invariants`](crate::queue::FastRemovalQueue::check_invariants)
/// and [`OrderedList::check_invariants`](crate::ds::OrderedList::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when queue configuration parameters are invalid.
///
/// Produced by [`QueueBuilder::try_build`](crate::builder::QueueBuilder::try_build).
///
/// # Example
///
/// ```
/// use cachequeue::builder::QueueBuilder;
///
/// let err = QueueBuilder::new().shards(0).try_build::<u64>().unwrap_err();
/// assert!(err.to_string().contains("shards"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("forward walk does not end at tail");
        assert_eq!(err.to_string(), "forward walk does not end at tail");
        assert_eq!(err.message(), "forward walk does not end at tail");
    }

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("shards must be > 0");
        assert_eq!(err.to_string(), "shards must be > 0");
        assert!(format!("{:?}", err).contains("shards"));
    }

    #[test]
    fn errors_clone_and_eq() {
        let a = ConfigError::new("x");
        assert_eq!(a.clone(), a);
        let b = InvariantError::new("y");
        assert_eq!(b.clone(), b);
    }

    #[test]
    fn errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<InvariantError>();
        assert_error::<ConfigError>();
    }
}
