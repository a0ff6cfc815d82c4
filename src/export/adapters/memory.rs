//! In-memory issue tracker for tests and rehearsals.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::export::{
    domain::{CreatedIssue, IssueDraft, IssueNumber},
    ports::{IssueTracker, TrackerError, TrackerResult},
};

/// Thread-safe in-memory issue tracker.
///
/// Issues are numbered sequentially after any pre-existing titles. The
/// tracker can be told to fail a specific `create_issue` call.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIssueTracker {
    state: Arc<RwLock<InMemoryTrackerState>>,
}

#[derive(Debug, Default)]
struct InMemoryTrackerState {
    existing: Vec<String>,
    created: Vec<IssueDraft>,
    create_calls: usize,
    fail_on_call: Option<usize>,
}

impl InMemoryIssueTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds titles of issues that already exist.
    #[must_use]
    pub fn with_existing_titles(self, titles: impl IntoIterator<Item = String>) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.existing.extend(titles);
        }
        self
    }

    /// Makes the `call`-th `create_issue` call (1-based) fail.
    #[must_use]
    pub fn failing_on_call(self, call: usize) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.fail_on_call = Some(call);
        }
        self
    }

    /// Returns drafts accepted so far, in submission order.
    #[must_use]
    pub fn created(&self) -> Vec<IssueDraft> {
        self.state
            .read()
            .map(|state| state.created.clone())
            .unwrap_or_default()
    }

    /// Returns how many times `create_issue` was called, failures included.
    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.state.read().map(|state| state.create_calls).unwrap_or_default()
    }
}

#[async_trait]
impl IssueTracker for InMemoryIssueTracker {
    async fn create_issue(&self, draft: &IssueDraft) -> TrackerResult<CreatedIssue> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TrackerError::client(std::io::Error::other(err.to_string())))?;
        state.create_calls += 1;
        if state.fail_on_call == Some(state.create_calls) {
            return Err(TrackerError::Unavailable(format!(
                "injected failure on call {}",
                state.create_calls
            )));
        }

        state.created.push(draft.clone());
        let next = state.existing.len() + state.created.len();
        let number = u64::try_from(next)
            .ok()
            .and_then(|value| IssueNumber::new(value).ok())
            .ok_or_else(|| TrackerError::InvalidResponse(format!("issue number {next}")))?;
        Ok(CreatedIssue::new(number))
    }

    async fn existing_titles(&self) -> TrackerResult<Vec<String>> {
        let state = self
            .state
            .read()
            .map_err(|err| TrackerError::client(std::io::Error::other(err.to_string())))?;
        let mut titles = state.existing.clone();
        titles.extend(state.created.iter().map(|draft| draft.title().to_owned()));
        Ok(titles)
    }
}
