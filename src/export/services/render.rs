//! Issue body and title rendering.

use minijinja::{AutoEscape, Environment, context};
use thiserror::Error;

use crate::export::domain::{IssueDraft, TaskRecord};

const BODY_TEMPLATE_NAME: &str = "issue_body.md";

/// Markdown body shared by every exported issue. Tooling downstream parses
/// these issues, so the layout must not drift.
pub const ISSUE_BODY_TEMPLATE: &str = "\
## Implementation Task

**Component**: {{ component }}
**Section**: {{ section }}
**Task**: {{ title }}

### Description
This task is part of the {{ component }} component implementation, specifically for {{ section | lower }}.

### Acceptance Criteria
- [ ] Implementation completed according to specifications
- [ ] Code follows project coding standards
- [ ] Appropriate tests written and passing
- [ ] Documentation updated if needed
- [ ] Code reviewed and approved

### Implementation Notes
<!-- Add implementation details, design decisions, or notes here -->

### Testing Strategy
<!-- Describe how this will be tested -->

---
*Auto-generated from implementation checklist*
";

/// Placeholder replaced by the record's component in milestone names.
pub const COMPONENT_PLACEHOLDER: &str = "{component}";

/// Template failure while rendering an issue.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render issue for '{title}': {reason}")]
pub struct RenderError {
    /// Task title being rendered.
    pub title: String,
    /// Template engine message.
    pub reason: String,
}

/// Renders task records into issue drafts.
#[derive(Debug)]
pub struct IssueRenderer {
    environment: Environment<'static>,
    milestone: Option<String>,
}

impl IssueRenderer {
    /// Creates a renderer with the built-in issue body template.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the template fails to compile.
    pub fn new() -> Result<Self, RenderError> {
        let mut environment = Environment::new();
        environment.set_keep_trailing_newline(true);
        environment.set_auto_escape_callback(|_| AutoEscape::None);
        environment
            .add_template(BODY_TEMPLATE_NAME, ISSUE_BODY_TEMPLATE)
            .map_err(|error| RenderError {
                title: BODY_TEMPLATE_NAME.to_owned(),
                reason: error.to_string(),
            })?;
        Ok(Self {
            environment,
            milestone: None,
        })
    }

    /// Attaches a milestone to every draft. `{component}` in the name is
    /// replaced with the record's component.
    #[must_use]
    pub fn with_milestone(mut self, milestone: impl Into<String>) -> Self {
        self.milestone = Some(milestone.into());
        self
    }

    /// Renders the markdown body for a record.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when template evaluation fails.
    pub fn render_body(&self, record: &TaskRecord) -> Result<String, RenderError> {
        let to_render_error = |error: minijinja::Error| RenderError {
            title: record.title().to_owned(),
            reason: error.to_string(),
        };
        self.environment
            .get_template(BODY_TEMPLATE_NAME)
            .map_err(to_render_error)?
            .render(context! {
                component => record.component(),
                section => record.section(),
                title => record.title(),
            })
            .map_err(to_render_error)
    }

    /// Renders the complete draft: title, body, labels, and milestone.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when template evaluation fails.
    pub fn render(&self, record: &TaskRecord) -> Result<IssueDraft, RenderError> {
        let mut draft = IssueDraft::new(
            issue_title(record),
            self.render_body(record)?,
            record.labels(),
            record.component(),
            record.category(),
        );
        if let Some(milestone) = &self.milestone {
            draft =
                draft.with_milestone(milestone.replace(COMPONENT_PLACEHOLDER, record.component()));
        }
        Ok(draft)
    }
}

/// Builds the issue title `"{emoji} [{component}] {title}"`.
#[must_use]
pub fn issue_title(record: &TaskRecord) -> String {
    format!(
        "{} [{}] {}",
        record.category().emoji(),
        record.component(),
        record.title()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn renderer() -> IssueRenderer {
        IssueRenderer::new().expect("built-in template compiles")
    }

    #[fixture]
    fn record() -> TaskRecord {
        TaskRecord::new("Network", "Peer Discovery", "Implement mDNS discovery")
            .expect("valid record")
    }

    #[rstest]
    fn body_matches_fixed_layout(renderer: IssueRenderer, record: TaskRecord) {
        let body = renderer.render_body(&record).expect("render body");

        let expected = "\
## Implementation Task

**Component**: Network
**Section**: Peer Discovery
**Task**: Implement mDNS discovery

### Description
This task is part of the Network component implementation, specifically for peer discovery.

### Acceptance Criteria
- [ ] Implementation completed according to specifications
- [ ] Code follows project coding standards
- [ ] Appropriate tests written and passing
- [ ] Documentation updated if needed
- [ ] Code reviewed and approved

### Implementation Notes
<!-- Add implementation details, design decisions, or notes here -->

### Testing Strategy
<!-- Describe how this will be tested -->

---
*Auto-generated from implementation checklist*
";
        assert_eq!(body, expected);
    }

    #[rstest]
    fn body_is_not_html_escaped(renderer: IssueRenderer) {
        let record = TaskRecord::new("Core", "Parsing", "Handle <tags> & \"quotes\"")
            .expect("valid record");
        let body = renderer.render_body(&record).expect("render body");
        assert!(body.contains("**Task**: Handle <tags> & \"quotes\"\n"));
    }

    #[rstest]
    fn rendering_is_deterministic(renderer: IssueRenderer, record: TaskRecord) {
        let first = renderer.render(&record).expect("first render");
        let second = renderer.render(&record).expect("second render");
        assert_eq!(first, second);
    }

    #[rstest]
    fn milestone_placeholder_uses_component(record: TaskRecord) {
        let renderer = IssueRenderer::new()
            .expect("built-in template compiles")
            .with_milestone("{component} Implementation");
        let draft = renderer.render(&record).expect("render draft");
        assert_eq!(draft.milestone(), Some("Network Implementation"));
    }

    #[rstest]
    fn title_uses_category_emoji(record: TaskRecord) {
        assert_eq!(issue_title(&record), "🔧 [Network] Implement mDNS discovery");
    }
}
