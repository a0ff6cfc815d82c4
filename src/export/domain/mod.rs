//! Domain model for checklist export.
//!
//! Task records, their content-derived categories and labels, rendered issue
//! drafts, and the export report. Nothing here touches the tracker or the
//! filesystem.

mod category;
mod error;
mod ids;
mod issue;
mod labels;
mod record;
mod report;
mod tagging;

pub use category::TaskCategory;
pub use error::RecordError;
pub use ids::IssueNumber;
pub use issue::{CreatedIssue, IssueDraft};
pub use labels::{IMPLEMENTATION_LABEL, LabelSet, component_label};
pub use record::{TaskRecord, ensure_unique_titles};
pub use report::{Confirmation, ExportReport};
pub use tagging::{
    ContentTags, DOCUMENTATION_LABEL, INTEGRATION_TESTING_LABEL, PERFORMANCE_LABEL,
    SECURITY_LABEL, TESTING_LABEL, UNIT_TESTING_LABEL,
};
