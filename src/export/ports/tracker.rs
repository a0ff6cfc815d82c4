//! Issue tracker port.

use crate::export::domain::{CreatedIssue, IssueDraft};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for issue tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// External issue tracker contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Creates one issue from a rendered draft.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when the tracker cannot be reached or rejects
    /// the request.
    async fn create_issue(&self, draft: &IssueDraft) -> TrackerResult<CreatedIssue>;

    /// Lists the titles of issues already present in the tracker.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when the listing fails.
    async fn existing_titles(&self) -> TrackerResult<Vec<String>>;
}

/// Errors returned by issue tracker implementations.
#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    /// The tracker client process could not be run.
    #[error("failed to run tracker client: {0}")]
    Client(Arc<dyn std::error::Error + Send + Sync>),

    /// The tracker client ran and reported failure.
    #[error("tracker client exited with {status}: {stderr}")]
    Rejected {
        /// Exit status as reported by the process.
        status: String,
        /// Trimmed standard error output.
        stderr: String,
    },

    /// The tracker answered with output that could not be interpreted.
    #[error("unexpected tracker response: {0}")]
    InvalidResponse(String),

    /// The tracker refused service without a client-level failure.
    #[error("tracker unavailable: {0}")]
    Unavailable(String),
}

impl TrackerError {
    /// Wraps a client-level error.
    pub fn client(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Client(Arc::new(err))
    }
}
