//! Markdown checklist source.
//!
//! Turns implementation checklists into task records. `##` and `###`
//! headings name the current section and every unchecked `- [ ]` item becomes
//! one record; checked items are only counted.

use std::collections::HashSet;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::files::{RecordFileError, read_checklist};
use crate::export::domain::{RecordError, TaskRecord};

/// Section used for items that appear before any heading.
pub const DEFAULT_SECTION: &str = "General";

/// Result of scanning one checklist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistScan {
    /// Records for the unchecked items, in document order.
    pub records: Vec<TaskRecord>,
    /// Number of checked items that were skipped.
    pub completed: usize,
}

impl ChecklistScan {
    /// Returns the total number of checklist items seen.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.records.len() + self.completed
    }
}

/// Infers a component name from the checklist's path.
#[must_use]
pub fn infer_component(path: &Utf8Path) -> &'static str {
    let lowered = path.as_str().to_lowercase();
    [
        ("network", "Network"),
        ("agent", "Agent"),
        ("task", "Task"),
        ("storage", "Storage"),
    ]
    .into_iter()
    .find_map(|(needle, component)| lowered.contains(needle).then_some(component))
    .unwrap_or("Core")
}

/// Parses checklist markdown into records for `component`.
///
/// # Errors
///
/// Returns [`RecordError::EmptyComponent`] when `component` is blank.
pub fn parse_checklist(component: &str, content: &str) -> Result<ChecklistScan, RecordError> {
    let mut scan = ChecklistScan::default();
    let mut section = DEFAULT_SECTION;

    for line in content.lines() {
        if let Some(heading) = heading_text(line) {
            if !heading.is_empty() {
                section = heading;
            }
            continue;
        }

        match checklist_item(line) {
            Some(ChecklistItem::Open(text)) if !text.is_empty() => {
                scan.records.push(TaskRecord::new(component, section, text)?);
            }
            Some(ChecklistItem::Done) => scan.completed += 1,
            Some(ChecklistItem::Open(_)) | None => {}
        }
    }

    Ok(scan)
}

/// Errors raised while scanning checklist files.
#[derive(Debug, Error)]
pub enum ChecklistError {
    /// A checklist could not be read.
    #[error(transparent)]
    File(#[from] RecordFileError),

    /// A checklist produced an invalid record.
    #[error("invalid checklist {path}: {source}")]
    Record {
        /// Checklist being parsed.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: RecordError,
    },
}

/// Scans checklist files in order and concatenates their records.
///
/// `component` names the component for every file; when absent it is
/// inferred from each path. Missing files are skipped with a warning. Items
/// whose title already appeared in an earlier item are dropped, so the
/// result can be exported as one batch.
///
/// # Errors
///
/// Returns [`ChecklistError`] when a file cannot be read or `component` is
/// blank.
pub fn scan_files(
    paths: &[Utf8PathBuf],
    component: Option<&str>,
) -> Result<Vec<TaskRecord>, ChecklistError> {
    let mut records = Vec::new();
    let mut titles = HashSet::new();

    for path in paths {
        let Some(content) = read_checklist(path)? else {
            continue;
        };
        let name = component.unwrap_or_else(|| infer_component(path));
        let scan = parse_checklist(name, &content).map_err(|source| ChecklistError::Record {
            path: path.clone(),
            source,
        })?;
        info!(
            path = %path,
            component = name,
            open = scan.records.len(),
            completed = scan.completed,
            "scanned checklist"
        );

        for record in scan.records {
            if titles.insert(record.title().to_owned()) {
                records.push(record);
            } else {
                warn!(path = %path, title = record.title(), "duplicate checklist item dropped");
            }
        }
    }

    Ok(records)
}

enum ChecklistItem<'a> {
    Open(&'a str),
    Done,
}

fn heading_text(line: &str) -> Option<&str> {
    line.strip_prefix("### ")
        .or_else(|| line.strip_prefix("## "))
        .map(str::trim)
}

fn checklist_item(line: &str) -> Option<ChecklistItem<'_>> {
    let item = line.trim_start().strip_prefix("- [")?;
    if let Some(text) = item.strip_prefix(" ]") {
        return Some(ChecklistItem::Open(text.trim()));
    }
    if item.starts_with("x]") || item.starts_with("X]") {
        return Some(ChecklistItem::Done);
    }
    None
}
