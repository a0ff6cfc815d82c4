//! Issue tracker backed by the GitHub CLI (`gh`).
//!
//! Issue bodies are piped to `gh issue create --body-file -` over stdin, so
//! no temporary files are written.

use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tokio::process::{ChildStdin, Command};
use tracing::debug;

use crate::export::{
    domain::{CreatedIssue, IssueDraft, IssueNumber},
    ports::{IssueTracker, TrackerError, TrackerResult},
};

/// Default executable name for the GitHub CLI.
pub const DEFAULT_GH_PROGRAM: &str = "gh";

/// Upper bound on issues fetched for the skip-existing check.
pub const EXISTING_TITLES_LIMIT: u32 = 5000;

/// Tracker adapter that shells out to `gh`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GhCliTracker {
    program: String,
    repository: Option<String>,
}

impl Default for GhCliTracker {
    fn default() -> Self {
        Self::new(DEFAULT_GH_PROGRAM)
    }
}

impl GhCliTracker {
    /// Creates an adapter invoking `program`, targeting the repository of the
    /// current directory.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            repository: None,
        }
    }

    /// Targets an explicit `owner/repo` instead of the current directory.
    #[must_use]
    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    /// Builds the `gh issue create` argument list for a draft.
    #[must_use]
    pub fn create_args(&self, draft: &IssueDraft) -> Vec<String> {
        let mut args = vec![
            "issue".to_owned(),
            "create".to_owned(),
            "--title".to_owned(),
            draft.title().to_owned(),
            "--body-file".to_owned(),
            "-".to_owned(),
        ];
        if !draft.labels().is_empty() {
            args.push("--label".to_owned());
            args.push(draft.labels().joined());
        }
        if let Some(milestone) = draft.milestone() {
            args.push("--milestone".to_owned());
            args.push(milestone.to_owned());
        }
        self.push_repository(&mut args);
        args
    }

    /// Builds the `gh issue list` argument list used to fetch titles.
    #[must_use]
    pub fn list_args(&self) -> Vec<String> {
        let mut args = vec![
            "issue".to_owned(),
            "list".to_owned(),
            "--state".to_owned(),
            "all".to_owned(),
            "--limit".to_owned(),
            EXISTING_TITLES_LIMIT.to_string(),
            "--json".to_owned(),
            "title".to_owned(),
        ];
        self.push_repository(&mut args);
        args
    }

    fn push_repository(&self, args: &mut Vec<String>) {
        if let Some(repository) = &self.repository {
            args.push("--repo".to_owned());
            args.push(repository.clone());
        }
    }

    async fn run(&self, args: &[String], stdin: Option<&str>) -> TrackerResult<String> {
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(TrackerError::client)?;
        if let (Some(input), Some(pipe)) = (stdin, child.stdin.take()) {
            // A process that exits before reading stdin closes the pipe; its
            // exit status and stderr carry the actual failure.
            match feed_stdin(pipe, input).await {
                Err(err) if err.kind() != io::ErrorKind::BrokenPipe => {
                    return Err(TrackerError::client(err));
                }
                Err(_) => debug!(program = %self.program, "tracker closed stdin early"),
                Ok(()) => {}
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(TrackerError::client)?;
        if !output.status.success() {
            return Err(TrackerError::Rejected {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        String::from_utf8(output.stdout)
            .map_err(|err| TrackerError::InvalidResponse(err.to_string()))
    }
}

async fn feed_stdin(mut pipe: ChildStdin, input: &str) -> io::Result<()> {
    pipe.write_all(input.as_bytes()).await?;
    pipe.shutdown().await
}

#[async_trait]
impl IssueTracker for GhCliTracker {
    async fn create_issue(&self, draft: &IssueDraft) -> TrackerResult<CreatedIssue> {
        let stdout = self.run(&self.create_args(draft), Some(draft.body())).await?;
        parse_created_issue(&stdout)
    }

    async fn existing_titles(&self) -> TrackerResult<Vec<String>> {
        let stdout = self.run(&self.list_args(), None).await?;
        parse_issue_titles(&stdout)
    }
}

/// Extracts the issue number from the URL `gh issue create` prints, e.g.
/// `https://github.com/owner/repo/issues/42`.
///
/// # Errors
///
/// Returns [`TrackerError::InvalidResponse`] when no issue URL is present.
pub fn parse_created_issue(stdout: &str) -> TrackerResult<CreatedIssue> {
    let url = stdout
        .lines()
        .map(str::trim)
        .rfind(|line| line.starts_with("http"))
        .ok_or_else(|| {
            TrackerError::InvalidResponse(format!("no issue URL in '{}'", stdout.trim()))
        })?;

    let number = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse::<u64>().ok())
        .and_then(|value| IssueNumber::new(value).ok())
        .ok_or_else(|| TrackerError::InvalidResponse(format!("no issue number in '{url}'")))?;

    Ok(CreatedIssue::new(number).with_url(url))
}

#[derive(Debug, Deserialize)]
struct IssueTitleRow {
    title: String,
}

/// Parses the JSON printed by `gh issue list --json title`.
///
/// # Errors
///
/// Returns [`TrackerError::InvalidResponse`] when the output is not the
/// expected JSON array.
pub fn parse_issue_titles(stdout: &str) -> TrackerResult<Vec<String>> {
    let rows: Vec<IssueTitleRow> = serde_json::from_str(stdout)
        .map_err(|err| TrackerError::InvalidResponse(err.to_string()))?;
    Ok(rows.into_iter().map(|row| row.title).collect())
}
