//! Rendered issue payloads and tracker-assigned results.

use super::{IssueNumber, LabelSet, TaskCategory};
use serde::Serialize;

/// A fully rendered issue, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueDraft {
    title: String,
    body: String,
    labels: LabelSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    milestone: Option<String>,
    #[serde(skip)]
    component: String,
    #[serde(skip)]
    category: TaskCategory,
}

impl IssueDraft {
    /// Creates a draft from rendered parts.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        labels: LabelSet,
        component: impl Into<String>,
        category: TaskCategory,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            labels,
            milestone: None,
            component: component.into(),
            category,
        }
    }

    /// Attaches a milestone.
    #[must_use]
    pub fn with_milestone(mut self, milestone: impl Into<String>) -> Self {
        let value = milestone.into();
        let normalized = value.trim();
        self.milestone = (!normalized.is_empty()).then(|| normalized.to_owned());
        self
    }

    /// Returns the issue title, including the category emoji.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the markdown body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the labels.
    #[must_use]
    pub const fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Returns the milestone, if any.
    #[must_use]
    pub fn milestone(&self) -> Option<&str> {
        self.milestone.as_deref()
    }

    /// Returns the component the draft was rendered for.
    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Returns the draft category.
    #[must_use]
    pub const fn category(&self) -> TaskCategory {
        self.category
    }
}

/// Issue identity returned by the tracker after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedIssue {
    number: IssueNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl CreatedIssue {
    /// Creates a result for an issue number.
    #[must_use]
    pub const fn new(number: IssueNumber) -> Self {
        Self { number, url: None }
    }

    /// Attaches the issue URL reported by the tracker.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Returns the tracker issue number.
    #[must_use]
    pub const fn number(&self) -> IssueNumber {
        self.number
    }

    /// Returns the issue URL, if the tracker reported one.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}
