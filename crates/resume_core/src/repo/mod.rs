//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for resumes and items.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Every call is scoped by the caller's `UserId`; rows owned by another
//!   user are reported as not found, never returned.
//! - Identifier lookups use exact equality.
//! - Write paths validate input before any SQL mutation.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod resume_item_repo;
pub mod resume_repo;

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::fields::{ValidationError, DATE_FORMAT};
use crate::model::resume::ResumeId;
use crate::model::resume_item::ResumeItemId;
use chrono::NaiveDate;
use rusqlite::Connection;
use thiserror::Error;
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for resume persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("resume not found: {0}")]
    ResumeNotFound(ResumeId),
    #[error("resume item not found: {item_id} in resume {resume_id}")]
    ItemNotFound {
        resume_id: ResumeId,
        item_id: ResumeItemId,
    },
    #[error("repository requires schema version {expected_version}, got {actual_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Rejects connections that did not go through `db::open_db*`.
fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version = current_version(conn)?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}

fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

fn parse_stored_date(value: &str, column: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| RepoError::InvalidData(format!("invalid date `{value}` in {column}")))
}
