//! Per-component breakdowns and the dry-run manifest.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

use crate::export::domain::{ExportReport, IssueDraft, TaskCategory};

/// Draft counts for one component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentTally {
    /// Drafts rendered for the component.
    pub total: usize,
    /// Generic implementation drafts.
    pub implementation: usize,
    /// Testing drafts.
    pub testing: usize,
    /// Documentation drafts.
    pub documentation: usize,
}

impl ComponentTally {
    fn record(&mut self, category: TaskCategory) {
        self.total += 1;
        match category {
            TaskCategory::Implementation => self.implementation += 1,
            TaskCategory::Testing => self.testing += 1,
            TaskCategory::Documentation => self.documentation += 1,
        }
    }

    /// Returns the count for one category.
    #[must_use]
    pub const fn count(&self, category: TaskCategory) -> usize {
        match category {
            TaskCategory::Implementation => self.implementation,
            TaskCategory::Testing => self.testing,
            TaskCategory::Documentation => self.documentation,
        }
    }
}

/// Breakdown of drafts by component and category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    components: BTreeMap<String, ComponentTally>,
}

impl ExportSummary {
    /// Tallies drafts by component.
    #[must_use]
    pub fn from_drafts(drafts: &[IssueDraft]) -> Self {
        Self::tally(drafts.iter())
    }

    /// Tallies only the drafts `report` confirms as created, leaving out
    /// skipped titles.
    #[must_use]
    pub fn from_report(drafts: &[IssueDraft], report: &ExportReport) -> Self {
        let created: HashSet<&str> = report
            .confirmations()
            .iter()
            .map(|confirmation| confirmation.title())
            .collect();
        Self::tally(drafts.iter().filter(|draft| created.contains(draft.title())))
    }

    fn tally<'a>(drafts: impl Iterator<Item = &'a IssueDraft>) -> Self {
        let mut components: BTreeMap<String, ComponentTally> = BTreeMap::new();
        for draft in drafts {
            components
                .entry(draft.component().to_owned())
                .or_default()
                .record(draft.category());
        }
        Self { components }
    }

    /// Returns the total number of drafts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.components.values().map(|tally| tally.total).sum()
    }

    /// Returns tallies keyed by component name.
    #[must_use]
    pub const fn components(&self) -> &BTreeMap<String, ComponentTally> {
        &self.components
    }

    /// Emits the breakdown as `info` events.
    pub fn log(&self) {
        tracing::info!(total = self.total(), "issue drafts by component");
        for (component, tally) in &self.components {
            tracing::info!(
                component = %component,
                total = tally.total,
                implementation = tally.implementation,
                testing = tally.testing,
                documentation = tally.documentation,
                "component breakdown"
            );
        }
    }

    /// Renders the breakdown as the dry-run `summary.md`.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("# GitHub Issues Summary\n\n");
        out.push_str(&format!(
            "Generated {} GitHub issues from implementation checklists.\n\n",
            self.total()
        ));
        out.push_str("## Issues by Component\n");
        for (component, tally) in &self.components {
            out.push_str(&format!("- **{component}**: {} issues\n", tally.total));
            for category in TaskCategory::ALL {
                let count = tally.count(category);
                if count > 0 {
                    out.push_str(&format!("  - {category}: {count}\n"));
                }
            }
        }
        out.push_str(
            "\n## Files Generated\n\
             - `issues.json` - Issue data in JSON format\n\
             - `create_issues.sh` - Script to create issues via GitHub CLI\n\
             - `summary.md` - This summary\n",
        );
        out
    }
}

/// Dry-run listing of every rendered draft.
#[derive(Debug, Clone, Serialize)]
pub struct IssueManifest<'a> {
    generated_at: DateTime<Utc>,
    total_issues: usize,
    issues: &'a [IssueDraft],
}

impl<'a> IssueManifest<'a> {
    /// Wraps drafts with a generation timestamp.
    #[must_use]
    pub fn new(drafts: &'a [IssueDraft], clock: &impl Clock) -> Self {
        Self {
            generated_at: clock.utc(),
            total_issues: drafts.len(),
            issues: drafts,
        }
    }

    /// Returns the generation timestamp.
    #[must_use]
    pub const fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }
}
