//! Checklist issues: turns implementation checklists into tracked issues.
//!
//! Each unchecked checklist item becomes a task record. Records are
//! classified from their titles, labelled, rendered through one markdown
//! template, and created in the tracker one at a time. The first failure
//! stops the run.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: task records, categories, labels, and rendered drafts
//! - **Ports**: the issue tracker contract
//! - **Adapters**: the GitHub CLI, an in-memory tracker, checklist parsing,
//!   and filesystem output
//!
//! # Modules
//!
//! - [`export`]: classification, rendering, and fail-fast submission
//! - [`config`]: command-line configuration

pub mod config;
pub mod export;
