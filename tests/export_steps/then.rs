//! Then steps for checklist export scenarios.

use super::world::ExportWorld;
use checklist_issues::export::domain::IssueDraft;
use rstest_bdd_macros::then;

fn created_issue(world: &ExportWorld, position: u64) -> Result<IssueDraft, eyre::Report> {
    let index = usize::try_from(position)?
        .checked_sub(1)
        .ok_or_else(|| eyre::eyre!("issue positions start at 1"))?;
    world
        .tracker
        .created()
        .get(index)
        .cloned()
        .ok_or_else(|| eyre::eyre!("no issue was created at position {position}"))
}

#[then("the export succeeds")]
fn export_succeeds(world: &ExportWorld) -> Result<(), eyre::Report> {
    match world.result.as_ref() {
        Some(Ok(_)) => Ok(()),
        Some(Err(aborted)) => Err(eyre::eyre!("unexpected export failure: {aborted}")),
        None => Err(eyre::eyre!("the export was not run")),
    }
}

#[then("the export is aborted with {created:u64} issue created")]
fn export_aborted(world: &ExportWorld, created: u64) -> Result<(), eyre::Report> {
    let Some(Err(aborted)) = world.result.as_ref() else {
        return Err(eyre::eyre!("expected an aborted export, got {:?}", world.result));
    };
    let completed = u64::try_from(aborted.completed.len())?;
    if completed != created {
        return Err(eyre::eyre!(
            "expected {created} created issue(s) in the report, found {completed}"
        ));
    }
    Ok(())
}

#[then("the tracker was called {count:u64} times")]
fn tracker_call_count(world: &ExportWorld, count: u64) -> Result<(), eyre::Report> {
    let calls = u64::try_from(world.tracker.create_calls())?;
    if calls != count {
        return Err(eyre::eyre!("expected {count} tracker calls, found {calls}"));
    }
    Ok(())
}

#[then("the number of confirmation lines is {count:u64}")]
fn confirmation_line_count(world: &ExportWorld, count: u64) -> Result<(), eyre::Report> {
    let lines = world.confirmation_lines();
    if u64::try_from(lines.len())? != count {
        return Err(eyre::eyre!("expected {count} confirmation lines, found {lines:?}"));
    }
    if let Some(line) = lines.iter().find(|line| !line.starts_with("✅ Created #")) {
        return Err(eyre::eyre!("unexpected output line: {line}"));
    }
    Ok(())
}

#[then(r#"issue {position:u64} has title "{title}""#)]
fn issue_has_title(world: &ExportWorld, position: u64, title: String) -> Result<(), eyre::Report> {
    let issue = created_issue(world, position)?;
    if issue.title() != title {
        return Err(eyre::eyre!("expected title {title:?}, found {:?}", issue.title()));
    }
    Ok(())
}

#[then(r#"issue {position:u64} has labels "{labels}""#)]
fn issue_has_labels(
    world: &ExportWorld,
    position: u64,
    labels: String,
) -> Result<(), eyre::Report> {
    let issue = created_issue(world, position)?;
    let actual = issue.labels().joined();
    if actual != labels {
        return Err(eyre::eyre!("expected labels {labels:?}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"issue {position:u64} has label "{label}""#)]
fn issue_has_label(world: &ExportWorld, position: u64, label: String) -> Result<(), eyre::Report> {
    let issue = created_issue(world, position)?;
    if !issue.labels().contains(&label) {
        return Err(eyre::eyre!(
            "expected label {label:?} in {:?}",
            issue.labels().as_slice()
        ));
    }
    Ok(())
}
