//! Service layer for checklist-to-issue export.

use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::render::{IssueRenderer, RenderError};
use crate::export::{
    domain::{Confirmation, ExportReport, IssueDraft, RecordError, TaskRecord, ensure_unique_titles},
    ports::{IssueTracker, TrackerError},
};

/// Service-level errors for export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A record failed validation before any submission.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// The issue template failed to render.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The tracker rejected or could not receive an issue.
    #[error("failed to create issue '{title}': {source}")]
    Submission {
        /// Rendered title of the issue that failed.
        title: String,
        /// Tracker failure.
        #[source]
        source: TrackerError,
    },

    /// Listing existing issues for the skip-existing check failed.
    #[error("failed to list existing issues: {0}")]
    ExistingTitles(#[source] TrackerError),

    /// Writing a confirmation line failed.
    #[error("failed to write confirmation: {0}")]
    Output(#[from] std::io::Error),
}

/// An export stopped at its first failure.
///
/// Issues created before the failure stay in the tracker; `completed` lists
/// them.
#[derive(Debug, Error)]
#[error("export aborted after {created} created issue(s): {cause}", created = .completed.len())]
pub struct ExportAborted {
    /// Confirmations for issues created before the failure.
    pub completed: ExportReport,
    /// The failure that stopped the export.
    #[source]
    pub cause: ExportError,
}

impl ExportAborted {
    fn before_submission(cause: impl Into<ExportError>) -> Box<Self> {
        Box::new(Self {
            completed: ExportReport::new(),
            cause: cause.into(),
        })
    }
}

/// Options that change how records are exported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Skip drafts whose title already exists in the tracker.
    pub skip_existing: bool,
}

/// Checklist export orchestration service.
pub struct ChecklistExporter<T, C>
where
    T: IssueTracker,
    C: Clock + Send + Sync,
{
    tracker: Arc<T>,
    clock: Arc<C>,
    renderer: IssueRenderer,
    options: ExportOptions,
}

impl<T, C> ChecklistExporter<T, C>
where
    T: IssueTracker,
    C: Clock + Send + Sync,
{
    /// Creates an exporter around a tracker and clock.
    #[must_use]
    pub fn new(tracker: Arc<T>, clock: Arc<C>, renderer: IssueRenderer) -> Self {
        Self {
            tracker,
            clock,
            renderer,
            options: ExportOptions::default(),
        }
    }

    /// Replaces the export options.
    #[must_use]
    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates the batch and renders every draft without contacting the
    /// tracker.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] when titles repeat or rendering fails.
    pub fn plan(&self, records: &[TaskRecord]) -> Result<Vec<IssueDraft>, ExportError> {
        ensure_unique_titles(records)?;
        records
            .iter()
            .map(|record| self.renderer.render(record).map_err(ExportError::from))
            .collect()
    }

    /// Creates one issue per record, in order, stopping at the first
    /// failure.
    ///
    /// A confirmation line is written and flushed to `out` as soon as each
    /// issue exists, so an aborted run still shows how far it got.
    ///
    /// # Errors
    ///
    /// Returns [`ExportAborted`] carrying the confirmations gathered before
    /// the failure. Validation failures abort before the first submission.
    pub async fn export<W: Write>(
        &self,
        records: &[TaskRecord],
        out: &mut W,
    ) -> Result<ExportReport, Box<ExportAborted>> {
        ensure_unique_titles(records).map_err(ExportAborted::before_submission)?;
        let existing = self
            .existing_titles()
            .await
            .map_err(ExportAborted::before_submission)?;

        let mut report = ExportReport::new();
        for record in records {
            if let Err(cause) = self.export_one(record, &existing, &mut report, out).await {
                return Err(Box::new(ExportAborted {
                    completed: report,
                    cause,
                }));
            }
        }

        info!(
            created = report.len(),
            skipped = report.skipped().len(),
            "export finished"
        );
        Ok(report)
    }

    async fn existing_titles(&self) -> Result<HashSet<String>, ExportError> {
        if !self.options.skip_existing {
            return Ok(HashSet::new());
        }
        let titles = self
            .tracker
            .existing_titles()
            .await
            .map_err(ExportError::ExistingTitles)?;
        debug!(count = titles.len(), "fetched existing issue titles");
        Ok(titles.into_iter().collect())
    }

    async fn export_one<W: Write>(
        &self,
        record: &TaskRecord,
        existing: &HashSet<String>,
        report: &mut ExportReport,
        out: &mut W,
    ) -> Result<(), ExportError> {
        let draft = self.renderer.render(record)?;
        if existing.contains(draft.title()) {
            warn!(title = draft.title(), "issue already exists, skipping");
            report.push_skipped(draft.title());
            return Ok(());
        }

        debug!(title = draft.title(), labels = %draft.labels().joined(), "submitting issue");
        let created = self
            .tracker
            .create_issue(&draft)
            .await
            .map_err(|source| ExportError::Submission {
                title: draft.title().to_owned(),
                source,
            })?;
        info!(number = %created.number(), title = draft.title(), "created issue");

        // The issue exists now, so it is reported even if the output fails.
        let confirmation = Confirmation::new(draft.title(), created, self.clock.utc());
        let line = confirmation.to_string();
        report.push(confirmation);
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }
}
