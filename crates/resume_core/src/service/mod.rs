//! Core use-case services.
//!
//! # Responsibility
//! - Thread the caller's identity into every repository call.
//! - Turn field bags into validated drafts before anything is written.
//! - Collapse repository failures into the caller-facing `ResumeError`.
//!
//! # Invariants
//! - Callers only ever see `Validation`, `NotFound`, or a fatal `Store` error.
//! - Log events carry ids and counts only, never user-entered text.

pub mod resume_item_service;
pub mod resume_service;

use crate::model::fields::ValidationError;
use crate::model::resume::ResumeId;
use crate::model::resume_item::ResumeItemId;
use crate::repo::RepoError;
use log::{log, Level};
use std::fmt::{Display, Formatter};
use std::time::Instant;
use thiserror::Error;

/// What a `NotFound` error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundTarget {
    Resume(ResumeId),
    ResumeItem {
        resume_id: ResumeId,
        item_id: ResumeItemId,
    },
}

impl Display for NotFoundTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resume(id) => write!(f, "resume {id}"),
            Self::ResumeItem { resume_id, item_id } => {
                write!(f, "resume item {item_id} in resume {resume_id}")
            }
        }
    }
}

/// Caller-facing error for resume use-cases.
#[derive(Debug, Error)]
pub enum ResumeError {
    /// Input failed a field constraint; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Requested resume or scoped item does not resolve for this caller.
    #[error("{0} not found")]
    NotFound(NotFoundTarget),
    /// Storage failure, propagated unmodified.
    #[error(transparent)]
    Store(RepoError),
}

impl ResumeError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Store(_) => "store",
        }
    }
}

impl From<RepoError> for ResumeError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::ResumeNotFound(id) => Self::NotFound(NotFoundTarget::Resume(id)),
            RepoError::ItemNotFound { resume_id, item_id } => {
                Self::NotFound(NotFoundTarget::ResumeItem { resume_id, item_id })
            }
            other => Self::Store(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ResumeError>;

/// Logs the outcome of one use-case call and hands the result back.
///
/// `context` must only hold ids/counts.
fn record<T>(
    event: &'static str,
    started_at: Instant,
    context: &str,
    result: ServiceResult<T>,
) -> ServiceResult<T> {
    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => log!(
            Level::Info,
            "event={event} module=service status=ok {context} duration_ms={duration_ms}"
        ),
        Err(err) => {
            let level = match err {
                ResumeError::Store(_) => Level::Error,
                _ => Level::Warn,
            };
            log!(
                level,
                "event={event} module=service status=error {context} duration_ms={duration_ms} error_code={}",
                err.code()
            );
        }
    }
    result
}
