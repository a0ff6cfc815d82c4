//! Checklist task records.

use super::{ContentTags, LabelSet, RecordError, TaskCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One checklist item to be turned into a tracked issue.
///
/// Records deserialize from the JSON data file through the same validation
/// as [`TaskRecord::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTaskRecord", into = "RawTaskRecord")]
pub struct TaskRecord {
    component: String,
    section: String,
    title: String,
    category: Option<TaskCategory>,
    extra_labels: Vec<String>,
}

impl TaskRecord {
    /// Creates a task record from its required fields.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the component, section, or title is
    /// empty after trimming or contains a control character such as a line
    /// break.
    pub fn new(
        component: impl Into<String>,
        section: impl Into<String>,
        title: impl Into<String>,
    ) -> Result<Self, RecordError> {
        Ok(Self {
            component: required(component.into(), "component", RecordError::EmptyComponent)?,
            section: required(section.into(), "section", RecordError::EmptySection)?,
            title: required(title.into(), "title", RecordError::EmptyTitle)?,
            category: None,
            extra_labels: Vec::new(),
        })
    }

    /// Pins the category instead of deriving it from the title.
    #[must_use]
    pub const fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Adds labels on top of the base and content-derived labels.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = String>) -> Self {
        self.extra_labels = labels
            .into_iter()
            .map(|label| label.trim().to_owned())
            .filter(|label| !label.is_empty())
            .collect();
        self
    }

    /// Returns the component name.
    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Returns the checklist section.
    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the labels listed on the record itself.
    #[must_use]
    pub fn extra_labels(&self) -> &[String] {
        &self.extra_labels
    }

    /// Returns the content flags detected in the title.
    #[must_use]
    pub fn tags(&self) -> ContentTags {
        ContentTags::scan(&self.title)
    }

    /// Returns the pinned category, or the one implied by the title.
    #[must_use]
    pub fn category(&self) -> TaskCategory {
        self.category.unwrap_or_else(|| self.tags().category())
    }

    /// Returns the full label set: base labels, content-derived labels, then
    /// the record's extra labels.
    #[must_use]
    pub fn labels(&self) -> LabelSet {
        let mut labels = LabelSet::for_component(&self.component);
        labels.extend(self.tags().labels());
        labels.extend(self.extra_labels.iter().cloned());
        labels
    }
}

/// Checks that no two records in a batch share a title.
///
/// # Errors
///
/// Returns [`RecordError::DuplicateTitle`] naming the first repeated title.
pub fn ensure_unique_titles(records: &[TaskRecord]) -> Result<(), RecordError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.title()) {
            return Err(RecordError::DuplicateTitle(record.title().to_owned()));
        }
    }
    Ok(())
}

/// Trims a required field. Fields land in single-line template slots, so
/// interior control characters are rejected.
fn required(value: String, field: &'static str, empty: RecordError) -> Result<String, RecordError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(empty);
    }
    if normalized.chars().any(char::is_control) {
        return Err(RecordError::ControlCharacter(field));
    }
    if normalized.len() == value.len() {
        return Ok(value);
    }
    Ok(normalized.to_owned())
}

/// Serialized form of [`TaskRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTaskRecord {
    component: String,
    section: String,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    labels: Vec<String>,
}

impl TryFrom<RawTaskRecord> for TaskRecord {
    type Error = RecordError;

    fn try_from(raw: RawTaskRecord) -> Result<Self, Self::Error> {
        let mut record = Self::new(raw.component, raw.section, raw.title)?.with_labels(raw.labels);
        if let Some(category) = raw.category {
            record = record.with_category(TaskCategory::try_from(category.as_str())?);
        }
        Ok(record)
    }
}

impl From<TaskRecord> for RawTaskRecord {
    fn from(record: TaskRecord) -> Self {
        Self {
            component: record.component,
            section: record.section,
            title: record.title,
            category: record.category.map(|category| category.as_str().to_owned()),
            labels: record.extra_labels,
        }
    }
}
