//! Creates GitHub issues from implementation checklists.
//!
//! Usage:
//!
//! ```text
//! checklist-issues scan docs/implementation/*/CHECKLIST.md --output records.json
//! checklist-issues export records.json --milestone "{component} Implementation"
//! checklist-issues export records.json --dry-run github-issues
//! ```
//!
//! `export` prints one confirmation line per created issue to stdout as it
//! happens and exits non-zero at the first failure. Logs go to stderr.

use std::io::{self, Write};
use std::sync::Arc;

use checklist_issues::config::{Cli, Command, ExportConfig, ScanArgs};
use checklist_issues::export::{
    adapters::{
        checklist::scan_files,
        files::{DryRunDirectory, read_records, write_records},
    },
    services::{ChecklistExporter, ExportSummary},
};
use clap::Parser;
use mockable::DefaultClock;
use tokio::runtime::Builder;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref())?;
    match cli.command {
        Command::Export(args) => export(&ExportConfig::from(args)),
        Command::Scan(args) => scan(&args),
    }
}

fn init_tracing(directives: Option<&str>) -> Result<(), BoxError> {
    let filter = directives.map_or_else(
        || Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))),
        EnvFilter::try_new,
    )?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
}

fn export(config: &ExportConfig) -> Result<(), BoxError> {
    let records = config.select(read_records(&config.records)?);
    info!(path = %config.records, records = records.len(), "loaded task records");

    let clock = Arc::new(DefaultClock);
    let exporter = ChecklistExporter::new(
        Arc::new(config.tracker()),
        Arc::clone(&clock),
        config.renderer()?,
    )
    .with_options(config.options.clone());
    let drafts = exporter.plan(&records)?;

    if let Some(path) = &config.dry_run {
        let directory = DryRunDirectory::create(path)?;
        directory.write(&drafts, clock.as_ref(), config.repository.as_deref())?;
        ExportSummary::from_drafts(&drafts).log();
        return Ok(());
    }

    let runtime = Builder::new_current_thread().enable_all().build()?;
    let mut out = io::stdout().lock();
    let report = runtime
        .block_on(exporter.export(&records, &mut out))
        .inspect_err(|aborted| error!(error = %aborted, "export aborted"))?;
    ExportSummary::from_report(&drafts, &report).log();
    info!(
        created = report.len(),
        skipped = report.skipped().len(),
        "all issues created"
    );
    Ok(())
}

fn scan(args: &ScanArgs) -> Result<(), BoxError> {
    let records = scan_files(&args.checklists, args.component.as_deref())?;
    info!(records = records.len(), "checklists scanned");

    if let Some(path) = &args.output {
        write_records(path, &records)?;
        info!(path = %path, "record file written");
        return Ok(());
    }

    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &records)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
