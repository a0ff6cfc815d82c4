//! When steps for checklist export scenarios.

use std::sync::Arc;

use super::world::{ExportWorld, run_async};
use checklist_issues::export::services::{ChecklistExporter, IssueRenderer};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::when;

#[when("the records are exported")]
fn export_records(world: &mut ExportWorld) -> Result<(), eyre::Report> {
    let exporter = ChecklistExporter::new(
        Arc::new(world.tracker.clone()),
        Arc::new(DefaultClock),
        IssueRenderer::new().wrap_err("compile issue template")?,
    )
    .with_options(world.options.clone());

    let mut output = Vec::new();
    let result = run_async(exporter.export(&world.records, &mut output));
    world.output = output;
    world.result = Some(result);
    Ok(())
}
