//! Resume item (work-history entry) record and its write-side draft.
//!
//! # Responsibility
//! - Define the stored `ResumeItem` shape.
//! - Build validated `ResumeItemDraft` values from typed input or field bags.
//!
//! # Invariants
//! - `resume_id` is always set once an item is persisted.
//! - `end_date = None` means the position is currently held.
//! - When both dates are set, `end_date >= start_date`.

use crate::model::fields::{
    check_date_range, field, format_date, optional_date, optional_text, required_date,
    required_text, FieldBag, ValidationError,
};
use crate::model::resume::ResumeId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one resume item.
pub type ResumeItemId = Uuid;

pub const ITEM_TITLE_MAX_CHARS: usize = 127;
pub const ITEM_COMPANY_MAX_CHARS: usize = 127;
pub const ITEM_DESCRIPTION_MAX_CHARS: usize = 2047;

/// One job and title held over a period of time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeItem {
    pub id: ResumeItemId,
    pub resume_id: ResumeId,
    pub title: String,
    pub company: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds, bumped on edit.
    pub updated_at: i64,
}

impl ResumeItem {
    /// Whether the position is still held.
    pub fn is_current(&self) -> bool {
        self.end_date.is_none()
    }

    /// Human-readable label, e.g. `Engineer: Dev at Acme (2020-01-01)`.
    pub fn label(&self, resume_title: &str) -> String {
        format!(
            "{resume_title}: {} at {} ({})",
            self.title,
            self.company,
            format_date(self.start_date)
        )
    }

    /// Editable fields of this item, for edit round-trips.
    pub fn to_draft(&self) -> ResumeItemDraft {
        ResumeItemDraft {
            title: self.title.clone(),
            company: self.company.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            description: self.description.clone(),
        }
    }
}

/// Editable fields of a resume item, used for create and full-replace edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeItemDraft {
    pub title: String,
    pub company: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl ResumeItemDraft {
    /// Creates a draft for a currently-held position without description.
    pub fn new(title: impl Into<String>, company: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            start_date,
            end_date: None,
            description: None,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parses a submitted field bag.
    ///
    /// Recognized keys: `title`, `company`, `start_date`, `end_date`,
    /// `description`. Unknown keys are ignored.
    pub fn from_fields(fields: &FieldBag) -> Result<Self, ValidationError> {
        let draft = Self {
            title: required_text(
                "title",
                field(fields, "title").unwrap_or_default(),
                ITEM_TITLE_MAX_CHARS,
            )?,
            company: required_text(
                "company",
                field(fields, "company").unwrap_or_default(),
                ITEM_COMPANY_MAX_CHARS,
            )?,
            start_date: required_date(fields, "start_date")?,
            end_date: optional_date(fields, "end_date")?,
            description: optional_text(
                "description",
                field(fields, "description"),
                ITEM_DESCRIPTION_MAX_CHARS,
            )?,
        };
        draft.validated()
    }

    /// Returns the normalized draft, or the first violated constraint.
    ///
    /// Text fields are trimmed; a blank description becomes `None`.
    pub fn validated(&self) -> Result<Self, ValidationError> {
        let title = required_text("title", &self.title, ITEM_TITLE_MAX_CHARS)?;
        let company = required_text("company", &self.company, ITEM_COMPANY_MAX_CHARS)?;
        let description = optional_text(
            "description",
            self.description.as_deref(),
            ITEM_DESCRIPTION_MAX_CHARS,
        )?;
        check_date_range("start_date", self.start_date)?;

        if let Some(end) = self.end_date {
            check_date_range("end_date", end)?;
            if end < self.start_date {
                return Err(ValidationError::EndBeforeStart {
                    start: self.start_date,
                    end,
                });
            }
        }

        Ok(Self {
            title,
            company,
            start_date: self.start_date,
            end_date: self.end_date,
            description,
        })
    }
}
