//! Unit tests for the export module.
//!
//! Domain tests cover classification, labelling, and rendering; service
//! tests drive the exporter against mocked and in-memory trackers.
