//! Append-only export report.

use super::{CreatedIssue, IssueNumber};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Confirmation that one issue was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    title: String,
    number: IssueNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    created_at: DateTime<Utc>,
}

impl Confirmation {
    /// Records a created issue under its rendered title.
    #[must_use]
    pub fn new(title: impl Into<String>, issue: CreatedIssue, created_at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            number: issue.number(),
            url: issue.url().map(str::to_owned),
            created_at,
        }
    }

    /// Returns the rendered issue title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the tracker issue number.
    #[must_use]
    pub const fn number(&self) -> IssueNumber {
        self.number
    }

    /// Returns the issue URL, if known.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns when the exporter observed the creation.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "✅ Created #{}: {}", self.number, self.title)
    }
}

/// Ordered outcome of an export run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    created: Vec<Confirmation>,
    skipped: Vec<String>,
}

impl ExportReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            created: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Appends a confirmation.
    pub fn push(&mut self, confirmation: Confirmation) {
        self.created.push(confirmation);
    }

    /// Appends the title of a draft that was not submitted because the
    /// tracker already holds an issue with that title.
    pub fn push_skipped(&mut self, title: impl Into<String>) {
        self.skipped.push(title.into());
    }

    /// Returns confirmations in creation order.
    #[must_use]
    pub fn confirmations(&self) -> &[Confirmation] {
        &self.created
    }

    /// Returns titles skipped by the existing-issue check.
    #[must_use]
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Returns the number of created issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.created.len()
    }

    /// Returns whether no issue was created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
    }
}
