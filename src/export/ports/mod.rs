//! Port contracts for checklist export.
//!
//! Ports define tracker-agnostic interfaces used by export services.

pub mod tracker;

#[cfg(test)]
pub use tracker::MockIssueTracker;
pub use tracker::{IssueTracker, TrackerError, TrackerResult};
