//! Resume record and title rules.
//!
//! # Invariants
//! - `owner` is always set; a resume without an owner is corrupt data.
//! - `title` is non-blank and at most `RESUME_TITLE_MAX_CHARS` characters.

use crate::model::fields::{required_text, ValidationError};
use crate::model::UserId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one resume.
pub type ResumeId = Uuid;

pub const RESUME_TITLE_MAX_CHARS: usize = 127;

/// A named collection of work-history entries owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    pub id: ResumeId,
    pub owner: UserId,
    pub title: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds, bumped on rename.
    pub updated_at: i64,
}

impl Display for Resume {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}

/// List projection: a resume plus the number of items it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeSummary {
    #[serde(flatten)]
    pub resume: Resume,
    pub item_count: u32,
}

/// Normalizes a user-supplied resume title.
///
/// Leading/trailing whitespace is dropped before the length check.
pub fn normalize_resume_title(title: &str) -> Result<String, ValidationError> {
    required_text("title", title, RESUME_TITLE_MAX_CHARS)
}

#[cfg(test)]
mod tests {
    use super::{normalize_resume_title, RESUME_TITLE_MAX_CHARS};
    use crate::model::fields::ValidationError;

    #[test]
    fn title_at_limit_is_accepted() {
        let title = "x".repeat(RESUME_TITLE_MAX_CHARS);
        assert_eq!(normalize_resume_title(&title).unwrap(), title);
    }

    #[test]
    fn title_over_limit_is_rejected() {
        let err = normalize_resume_title(&"x".repeat(RESUME_TITLE_MAX_CHARS + 1)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 127, .. }));
    }
}
