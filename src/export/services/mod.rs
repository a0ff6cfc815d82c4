//! Application services for checklist export.

mod exporter;
mod render;
mod summary;

pub use exporter::{ChecklistExporter, ExportAborted, ExportError, ExportOptions};
pub use render::{COMPONENT_PLACEHOLDER, ISSUE_BODY_TEMPLATE, IssueRenderer, RenderError, issue_title};
pub use summary::{ComponentTally, ExportSummary, IssueManifest};
