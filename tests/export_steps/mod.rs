//! Step definitions for checklist export scenarios.

mod given;
mod then;
mod when;
pub mod world;
