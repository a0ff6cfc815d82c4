//! Checklist-to-issue export.
//!
//! Turns task records taken from implementation checklists into tracked
//! issues. Each record is classified from its title, labelled, rendered
//! through a fixed markdown template, and submitted to the tracker in order.
//! The first failure stops the run and the report lists what was already
//! created. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
