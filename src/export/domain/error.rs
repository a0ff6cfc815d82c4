//! Error types for task record validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or validating task records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The component name is empty after trimming.
    #[error("task record component must not be empty")]
    EmptyComponent,

    /// The section heading is empty after trimming.
    #[error("task record section must not be empty")]
    EmptySection,

    /// The task title is empty after trimming.
    #[error("task record title must not be empty")]
    EmptyTitle,

    /// A field contains a line break or other control character.
    #[error("task record {0} must be a single line without control characters")]
    ControlCharacter(&'static str),

    /// Two records in the same batch share a title.
    #[error("duplicate task title in batch: {0}")]
    DuplicateTitle(String),

    /// The category name is not one of the supported task kinds.
    #[error("unknown task category '{0}', expected implementation, testing, or documentation")]
    UnknownCategory(String),

    /// The issue number is invalid.
    #[error("invalid issue number {0}, expected a positive integer")]
    InvalidIssueNumber(u64),
}
