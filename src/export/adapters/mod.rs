//! Infrastructure adapters for checklist export.
//!
//! # Available Adapters
//!
//! - [`gh::GhCliTracker`]: creates issues through the GitHub CLI
//! - [`memory::InMemoryIssueTracker`]: thread-safe in-memory tracker for
//!   tests and rehearsals
//! - [`checklist`]: parses markdown checklists into task records
//! - [`files`]: record files, checklist reading, and dry-run output
//! - [`script`]: the dry-run replay script

pub mod checklist;
pub mod files;
pub mod gh;
pub mod memory;
pub mod script;
