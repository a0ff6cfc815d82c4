//! Shared world state for checklist export scenarios.

use checklist_issues::export::{
    adapters::memory::InMemoryIssueTracker,
    domain::{ExportReport, TaskRecord},
    services::{ExportAborted, ExportOptions},
};
use rstest::fixture;

/// Scenario world for checklist export behaviour tests.
#[derive(Default)]
pub struct ExportWorld {
    pub records: Vec<TaskRecord>,
    pub tracker: InMemoryIssueTracker,
    pub options: ExportOptions,
    pub output: Vec<u8>,
    pub result: Option<Result<ExportReport, Box<ExportAborted>>>,
}

impl ExportWorld {
    /// Returns the confirmation lines written during the export.
    pub fn confirmation_lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.output)
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ExportWorld {
    ExportWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
