//! Given steps for checklist export scenarios.

use super::world::ExportWorld;
use checklist_issues::export::domain::TaskRecord;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a task record "{component}" "{section}" "{title}""#)]
fn task_record(
    world: &mut ExportWorld,
    component: String,
    section: String,
    title: String,
) -> Result<(), eyre::Report> {
    let record = TaskRecord::new(component, section, title).wrap_err("construct task record")?;
    world.records.push(record);
    Ok(())
}

#[given("the tracker fails on call {call:u64}")]
fn tracker_fails_on_call(world: &mut ExportWorld, call: u64) -> Result<(), eyre::Report> {
    let call = usize::try_from(call).wrap_err("call number fits in usize")?;
    world.tracker = std::mem::take(&mut world.tracker).failing_on_call(call);
    Ok(())
}

#[given(r#"the tracker already has an issue titled "{title}""#)]
fn tracker_has_issue(world: &mut ExportWorld, title: String) {
    world.tracker = std::mem::take(&mut world.tracker).with_existing_titles([title]);
}

#[given("existing issues are skipped")]
fn existing_issues_skipped(world: &mut ExportWorld) {
    world.options.skip_existing = true;
}
