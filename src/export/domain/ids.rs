//! Tracker issue identifiers.

use super::RecordError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive issue number assigned by the external tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Creates a validated issue number.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidIssueNumber`] when the value is zero.
    pub const fn new(value: u64) -> Result<Self, RecordError> {
        if value == 0 {
            return Err(RecordError::InvalidIssueNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
