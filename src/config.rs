//! Command-line configuration.
//!
//! Parsed with `clap`; the export flags are folded into an [`ExportConfig`]
//! that the binary hands to the library.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

use crate::export::{
    adapters::gh::{DEFAULT_GH_PROGRAM, GhCliTracker},
    domain::TaskRecord,
    services::{ExportOptions, IssueRenderer, RenderError},
};

/// Turns implementation checklists into tracked GitHub issues.
#[derive(Debug, Parser)]
#[command(name = "checklist-issues", version, about)]
pub struct Cli {
    /// Log filter such as `debug` or `checklist_issues=trace`. Overrides
    /// `RUST_LOG`.
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level operations.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create one issue per task record.
    Export(ExportArgs),
    /// Convert markdown checklists into a task record file.
    Scan(ScanArgs),
}

/// Arguments for `export`.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// JSON file holding the task records.
    pub records: Utf8PathBuf,

    /// Target repository as `owner/repo`. Defaults to the repository of the
    /// current directory.
    #[arg(long, env = "CHECKLIST_ISSUES_REPO", value_parser = parse_repository)]
    pub repo: Option<String>,

    /// GitHub CLI executable.
    #[arg(long, env = "CHECKLIST_ISSUES_GH", default_value = DEFAULT_GH_PROGRAM)]
    pub gh: String,

    /// Milestone for every issue; `{component}` is replaced per record.
    #[arg(long)]
    pub milestone: Option<String>,

    /// Skip records whose issue title already exists in the repository.
    #[arg(long)]
    pub skip_existing: bool,

    /// Write issues.json, create_issues.sh, and summary.md here instead of
    /// creating issues.
    #[arg(long, value_name = "DIR")]
    pub dry_run: Option<Utf8PathBuf>,

    /// Only export records whose component contains this text, ignoring
    /// case.
    #[arg(long, value_name = "FILTER")]
    pub component: Option<String>,
}

/// Arguments for `scan`.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Markdown checklists to scan, in order.
    #[arg(required = true)]
    pub checklists: Vec<Utf8PathBuf>,

    /// Component for every checklist. Inferred from each path when omitted.
    #[arg(long, value_name = "NAME")]
    pub component: Option<String>,

    /// Record file to write. Printed to stdout when omitted.
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,
}

/// Accepts `owner/repo`: two non-empty segments and no whitespace.
fn parse_repository(value: &str) -> Result<String, String> {
    let repository = value.trim();
    let valid = repository.split_once('/').is_some_and(|(owner, name)| {
        !owner.is_empty() && !name.is_empty() && !name.contains('/')
    }) && !repository.contains(char::is_whitespace);
    if !valid {
        return Err(format!("expected owner/repo, got '{value}'"));
    }
    Ok(repository.to_owned())
}

/// Resolved settings for one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Record file to read.
    pub records: Utf8PathBuf,
    /// Explicit target repository.
    pub repository: Option<String>,
    /// GitHub CLI executable.
    pub gh_program: String,
    /// Milestone template.
    pub milestone: Option<String>,
    /// Exporter options.
    pub options: ExportOptions,
    /// Dry-run output directory.
    pub dry_run: Option<Utf8PathBuf>,
    /// Component filter, lowercased.
    pub component_filter: Option<String>,
}

impl From<ExportArgs> for ExportConfig {
    fn from(args: ExportArgs) -> Self {
        Self {
            records: args.records,
            repository: args.repo,
            gh_program: args.gh,
            milestone: non_blank(args.milestone),
            options: ExportOptions {
                skip_existing: args.skip_existing,
            },
            dry_run: args.dry_run,
            component_filter: non_blank(args.component).map(|filter| filter.to_lowercase()),
        }
    }
}

impl ExportConfig {
    /// Returns whether `record` passes the component filter.
    #[must_use]
    pub fn selects(&self, record: &TaskRecord) -> bool {
        self.component_filter.as_ref().is_none_or(|filter| {
            record.component().to_lowercase().contains(filter.as_str())
        })
    }

    /// Keeps the records that pass the component filter.
    #[must_use]
    pub fn select(&self, records: Vec<TaskRecord>) -> Vec<TaskRecord> {
        records
            .into_iter()
            .filter(|record| self.selects(record))
            .collect()
    }

    /// Builds the GitHub CLI tracker for this run.
    #[must_use]
    pub fn tracker(&self) -> GhCliTracker {
        let tracker = GhCliTracker::new(self.gh_program.clone());
        if let Some(repository) = &self.repository {
            return tracker.with_repository(repository.clone());
        }
        tracker
    }

    /// Builds the issue renderer, with the milestone if one was given.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the issue template fails to compile.
    pub fn renderer(&self) -> Result<IssueRenderer, RenderError> {
        let mut renderer = IssueRenderer::new()?;
        if let Some(milestone) = &self.milestone {
            renderer = renderer.with_milestone(milestone.clone());
        }
        Ok(renderer)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn export_config(args: &[&str]) -> ExportConfig {
        let cli = Cli::try_parse_from(args).expect("arguments parse");
        let Command::Export(export) = cli.command else {
            panic!("expected the export command");
        };
        ExportConfig::from(export)
    }

    #[rstest]
    fn export_flags_fold_into_config() {
        let config = export_config(&[
            "checklist-issues",
            "export",
            "records.json",
            "--repo",
            "owner/repo",
            "--gh",
            "/usr/local/bin/gh",
            "--milestone",
            "{component} Implementation",
            "--skip-existing",
            "--component",
            " Net ",
        ]);

        assert_eq!(config.records, "records.json");
        assert_eq!(config.repository.as_deref(), Some("owner/repo"));
        assert_eq!(config.gh_program, "/usr/local/bin/gh");
        assert_eq!(config.milestone.as_deref(), Some("{component} Implementation"));
        assert!(config.options.skip_existing);
        assert_eq!(config.component_filter.as_deref(), Some("net"));
        assert!(config.dry_run.is_none());
    }

    #[rstest]
    #[case("owner/repo", "owner/repo")]
    #[case(" acme/widgets ", "acme/widgets")]
    fn repository_is_trimmed(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse_repository(input).as_deref(), Ok(expected));
    }

    #[rstest]
    #[case("owner")]
    #[case("owner/")]
    #[case("/repo")]
    #[case("owner/repo/extra")]
    #[case("own er/repo")]
    fn malformed_repository_is_rejected(#[case] input: &str) {
        assert!(parse_repository(input).is_err());
        let result = Cli::try_parse_from(["checklist-issues", "export", "r.json", "--repo", input]);
        assert!(result.is_err());
    }

    #[rstest]
    fn blank_milestone_is_dropped() {
        let config = export_config(&["checklist-issues", "export", "r.json", "--milestone", "  "]);
        assert!(config.milestone.is_none());
    }

    #[rstest]
    #[case(None, "Network", true)]
    #[case(Some("net"), "Network", true)]
    #[case(Some("NET"), "Agent System", false)]
    #[case(Some("agent sys"), "Agent System", true)]
    fn component_filter_matches_case_insensitively(
        #[case] filter: Option<&str>,
        #[case] component: &str,
        #[case] expected: bool,
    ) {
        let mut args = vec!["checklist-issues", "export", "r.json"];
        if let Some(value) = filter {
            args.extend(["--component", value]);
        }
        let config = export_config(&args);
        let record = TaskRecord::new(component, "Setup", "Task").expect("valid task record");

        assert_eq!(config.selects(&record), expected);
    }

    #[rstest]
    fn scan_requires_at_least_one_checklist() {
        assert!(Cli::try_parse_from(["checklist-issues", "scan"]).is_err());
    }

    #[rstest]
    fn log_level_is_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "checklist-issues",
            "scan",
            "docs/CHECKLIST.md",
            "--log-level",
            "debug",
        ])
        .expect("arguments parse");

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Command::Scan(ScanArgs { ref checklists, .. }) if checklists.len() == 1));
    }
}
