//! Content-derived labels for task titles.
//!
//! Titles are lowercased and split into alphanumeric words; each rule looks
//! for a word (or a two-word phrase) rather than a raw substring, so `latest`
//! does not count as testing wording.

use super::TaskCategory;

/// Label added to testing tasks.
pub const TESTING_LABEL: &str = "testing";
/// Label added to unit-test tasks.
pub const UNIT_TESTING_LABEL: &str = "unit-testing";
/// Label added to integration-test tasks.
pub const INTEGRATION_TESTING_LABEL: &str = "integration-testing";
/// Label added to performance and benchmarking tasks.
pub const PERFORMANCE_LABEL: &str = "performance";
/// Label added to documentation tasks.
pub const DOCUMENTATION_LABEL: &str = "documentation";
/// Label added to security-sensitive tasks.
pub const SECURITY_LABEL: &str = "security";

const PERFORMANCE_WORDS: [&str; 4] = ["performance", "latency", "throughput", "profiling"];
const DOCUMENTATION_WORDS: [&str; 4] = ["docs", "readme", "rustdoc", "docstrings"];
const SECURITY_PREFIXES: [&str; 9] = [
    "secur", "crypt", "encrypt", "decrypt", "authent", "authori", "permission", "polic", "signatur",
];
const SECURITY_WORDS: [&str; 4] = ["auth", "authn", "authz", "tls"];

/// Content flags detected in a task title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentTags {
    testing: bool,
    unit_testing: bool,
    integration_testing: bool,
    performance: bool,
    documentation: bool,
    security: bool,
}

impl ContentTags {
    /// Scans a task title for testing, documentation, performance, and
    /// security wording.
    #[must_use]
    pub fn scan(title: &str) -> Self {
        let lowered = title.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|ch: char| !ch.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect();

        let is_test_word = |word: &str| word.starts_with("test");
        let any_word = |predicate: &dyn Fn(&str) -> bool| words.iter().copied().any(predicate);

        Self {
            testing: any_word(&is_test_word),
            unit_testing: has_phrase(&words, |first| first == "unit", is_test_word),
            integration_testing: has_phrase(&words, |first| first == "integration", is_test_word),
            performance: any_word(&|word| {
                PERFORMANCE_WORDS.contains(&word) || word.starts_with("benchmark")
            }) || has_phrase(&words, |first| first == "load", is_test_word),
            documentation: any_word(&|word| {
                word.starts_with("document") || DOCUMENTATION_WORDS.contains(&word)
            }) || has_phrase(
                &words,
                |first| first == "doc",
                |second| second.starts_with("comment"),
            ),
            security: any_word(&|word| {
                SECURITY_WORDS.contains(&word)
                    || SECURITY_PREFIXES
                        .iter()
                        .any(|prefix| word.starts_with(prefix))
            }) || has_phrase(
                &words,
                |first| first == "access",
                |second| second == "control",
            ),
        }
    }

    /// Returns whether the title describes testing work.
    #[must_use]
    pub const fn is_testing(self) -> bool {
        self.testing
    }

    /// Returns whether the title describes documentation work.
    #[must_use]
    pub const fn is_documentation(self) -> bool {
        self.documentation
    }

    /// Returns whether the title touches security concerns.
    #[must_use]
    pub const fn is_security(self) -> bool {
        self.security
    }

    /// Returns the category implied by the title.
    ///
    /// Testing wins over documentation when both are present.
    #[must_use]
    pub const fn category(self) -> TaskCategory {
        if self.testing {
            TaskCategory::Testing
        } else if self.documentation {
            TaskCategory::Documentation
        } else {
            TaskCategory::Implementation
        }
    }

    /// Returns the content-derived labels in their canonical order.
    #[must_use]
    pub fn labels(self) -> Vec<&'static str> {
        [
            (self.testing, TESTING_LABEL),
            (self.unit_testing, UNIT_TESTING_LABEL),
            (self.integration_testing, INTEGRATION_TESTING_LABEL),
            (self.performance, PERFORMANCE_LABEL),
            (self.documentation, DOCUMENTATION_LABEL),
            (self.security, SECURITY_LABEL),
        ]
        .into_iter()
        .filter_map(|(present, label)| present.then_some(label))
        .collect()
    }
}

fn has_phrase(
    words: &[&str],
    first: impl Fn(&str) -> bool,
    second: impl Fn(&str) -> bool,
) -> bool {
    words.windows(2).any(|pair| match pair {
        [head, tail] => first(*head) && second(*tail),
        _ => false,
    })
}
