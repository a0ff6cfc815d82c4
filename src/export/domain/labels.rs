//! Issue label sets.

use serde::{Deserialize, Serialize};

/// Label carried by every exported issue.
pub const IMPLEMENTATION_LABEL: &str = "implementation";

/// Builds the component label, e.g. `Agent System` becomes
/// `component-agent-system`.
#[must_use]
pub fn component_label(component: &str) -> String {
    let slug = component
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    format!("component-{slug}")
}

/// Ordered, duplicate-free set of issue labels.
///
/// Insertion order is preserved so rendered label lists stay stable across
/// runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    /// Creates the base label set for a component.
    #[must_use]
    pub fn for_component(component: &str) -> Self {
        let mut labels = Self(Vec::new());
        labels.insert(IMPLEMENTATION_LABEL);
        labels.insert(component_label(component));
        labels
    }

    /// Adds a label, ignoring blanks and labels already present.
    ///
    /// Returns `true` when the label was added.
    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        let raw = label.into();
        let normalized = raw.trim();
        if normalized.is_empty() || self.contains(normalized) {
            return false;
        }
        self.0.push(normalized.to_owned());
        true
    }

    /// Returns whether the set contains `label`.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|existing| existing == label)
    }

    /// Returns labels in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns labels joined with commas, the form `gh --label` accepts.
    #[must_use]
    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

impl<S: Into<String>> Extend<S> for LabelSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for label in iter {
            self.insert(label);
        }
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Core", "component-core")]
    #[case("Agent System", "component-agent-system")]
    #[case("  Task   Processing ", "component-task-processing")]
    fn component_label_lowercases_and_hyphenates(#[case] component: &str, #[case] expected: &str) {
        assert_eq!(component_label(component), expected);
    }

    #[rstest]
    fn insert_skips_blank_and_repeated_labels() {
        let mut labels = LabelSet::for_component("Core");

        assert!(!labels.insert("implementation"));
        assert!(!labels.insert("   "));
        assert!(labels.insert(" api "));

        assert_eq!(labels.as_slice(), ["implementation", "component-core", "api"]);
        assert_eq!(labels.joined(), "implementation,component-core,api");
    }
}
