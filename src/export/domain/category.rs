//! Task kinds and the emoji used to prefix issue titles.

use super::RecordError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of work a checklist item describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    /// Generic build or feature work.
    Implementation,
    /// Writing or running tests.
    Testing,
    /// Writing or verifying documentation.
    Documentation,
}

impl TaskCategory {
    /// Every category, in reporting order.
    pub const ALL: [Self; 3] = [Self::Implementation, Self::Testing, Self::Documentation];

    /// Returns the glyph prefixed to issue titles of this category.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Implementation => "🔧",
            Self::Testing => "🧪",
            Self::Documentation => "📝",
        }
    }

    /// Returns the category name in canonical storage format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Implementation => "implementation",
            Self::Testing => "testing",
            Self::Documentation => "documentation",
        }
    }
}

impl TryFrom<&str> for TaskCategory {
    type Error = RecordError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "implementation" => Ok(Self::Implementation),
            "testing" => Ok(Self::Testing),
            "documentation" => Ok(Self::Documentation),
            _ => Err(RecordError::UnknownCategory(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
