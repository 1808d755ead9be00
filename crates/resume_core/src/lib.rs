//! Core data-access logic for per-user resumes and their work-history items.
//! This crate is the single source of truth for ownership and scoping rules.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{open_store, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::fields::{FieldBag, ValidationError};
pub use model::resume::{Resume, ResumeId, ResumeSummary};
pub use model::resume_item::{ResumeItem, ResumeItemDraft, ResumeItemId};
pub use model::UserId;
pub use repo::resume_item_repo::{ResumeItemRepository, SqliteResumeItemRepository};
pub use repo::resume_repo::{ResumeRepository, SqliteResumeRepository};
pub use repo::{RepoError, RepoResult};
pub use service::resume_item_service::ResumeItemService;
pub use service::resume_service::ResumeService;
pub use service::{NotFoundTarget, ResumeError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
