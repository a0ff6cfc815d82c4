//! Shell script rendering for dry runs.
//!
//! The generated script replays an export with the GitHub CLI. Every
//! argument is single-quoted, so quotes, `$` and backticks in titles stay
//! inert. Each body is fed through a quoted heredoc on stdin whose delimiter
//! is chosen so that no body line can close it early.

use crate::export::domain::IssueDraft;

const BODY_DELIMITER: &str = "CHECKLIST_ISSUE_BODY";

/// Escapes a value for safe inclusion in a POSIX shell command.
///
/// Uses single-quote wrapping and the standard `'\''` sequence for embedded
/// quotes.
#[must_use]
pub fn shell_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            escaped.push_str("'\\''");
        } else {
            escaped.push(ch);
        }
    }
    escaped.push('\'');
    escaped
}

/// Renders a `set -e` script with one `gh issue create` per draft.
///
/// `repository` adds `--repo` to every invocation when present.
#[must_use]
pub fn render_script(drafts: &[IssueDraft], repository: Option<&str>) -> String {
    let mut script = String::from(
        "#!/bin/bash\n\
         # Create GitHub issues from implementation checklists\n\
         set -e\n\n\
         echo '🚀 Creating GitHub issues...'\n\n",
    );

    for (position, draft) in drafts.iter().enumerate() {
        script.push_str(&format!("# Issue {}\n", position + 1));
        script.push_str("gh issue create \\\n");
        script.push_str(&format!("  --title {} \\\n", shell_escape(draft.title())));
        if !draft.labels().is_empty() {
            script.push_str(&format!(
                "  --label {} \\\n",
                shell_escape(&draft.labels().joined())
            ));
        }
        if let Some(milestone) = draft.milestone() {
            script.push_str(&format!("  --milestone {} \\\n", shell_escape(milestone)));
        }
        if let Some(repo) = repository {
            script.push_str(&format!("  --repo {} \\\n", shell_escape(repo)));
        }
        let delimiter = body_delimiter(draft.body());
        script.push_str(&format!("  --body-file - <<'{delimiter}'\n"));
        script.push_str(draft.body());
        if !draft.body().ends_with('\n') {
            script.push('\n');
        }
        script.push_str(&delimiter);
        script.push('\n');
        script.push_str(&format!(
            "echo {}\n\n",
            shell_escape(&format!("✅ Created: {}", draft.title()))
        ));
    }

    script.push_str("echo '🎉 All issues created!'\n");
    script
}

/// Returns a heredoc delimiter that no line of `body` equals.
fn body_delimiter(body: &str) -> String {
    let mut delimiter = BODY_DELIMITER.to_owned();
    let mut attempt = 0_u32;
    while body.lines().any(|line| line.trim_end() == delimiter) {
        attempt += 1;
        delimiter = format!("{BODY_DELIMITER}_{attempt}");
    }
    delimiter
}
