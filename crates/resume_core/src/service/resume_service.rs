//! Resume use-case service.
//!
//! # Invariants
//! - Every call is made on behalf of an explicit `UserId`.
//! - A resume owned by someone else behaves exactly like a missing one.

use crate::model::resume::{Resume, ResumeId, ResumeSummary};
use crate::model::UserId;
use crate::repo::resume_repo::ResumeRepository;
use crate::service::{record, ResumeError, ServiceResult};
use std::time::Instant;

/// Resume service facade over repository implementations.
pub struct ResumeService<R: ResumeRepository> {
    repo: R,
}

impl<R: ResumeRepository> ResumeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists the caller's resumes by title, each annotated with its item count.
    pub fn list_resumes(&self, user: UserId) -> ServiceResult<Vec<ResumeSummary>> {
        let started_at = Instant::now();
        let result = self.repo.list_resumes(user).map_err(ResumeError::from);
        let context = match &result {
            Ok(items) => format!("user={user} count={}", items.len()),
            Err(_) => format!("user={user}"),
        };
        record("resume_list", started_at, &context, result)
    }

    /// Creates a resume owned by `user`.
    pub fn create_resume(&self, user: UserId, title: &str) -> ServiceResult<Resume> {
        let started_at = Instant::now();
        let result = self.repo.create_resume(user, title).map_err(ResumeError::from);
        let context = match &result {
            Ok(resume) => format!("user={user} resume_id={}", resume.id),
            Err(_) => format!("user={user}"),
        };
        record("resume_create", started_at, &context, result)
    }

    /// Loads one of the caller's resumes.
    pub fn get_resume(&self, user: UserId, id: ResumeId) -> ServiceResult<Resume> {
        let started_at = Instant::now();
        let result = self.repo.get_resume(user, id).map_err(ResumeError::from);
        record(
            "resume_get",
            started_at,
            &format!("user={user} resume_id={id}"),
            result,
        )
    }

    /// Renames one of the caller's resumes.
    pub fn rename_resume(
        &self,
        user: UserId,
        id: ResumeId,
        new_title: &str,
    ) -> ServiceResult<Resume> {
        let started_at = Instant::now();
        let result = self
            .repo
            .rename_resume(user, id, new_title)
            .map_err(ResumeError::from);
        record(
            "resume_rename",
            started_at,
            &format!("user={user} resume_id={id}"),
            result,
        )
    }

    /// Deletes one of the caller's resumes and every item in it.
    pub fn delete_resume(&self, user: UserId, id: ResumeId) -> ServiceResult<()> {
        let started_at = Instant::now();
        let result = self.repo.delete_resume(user, id).map_err(ResumeError::from);
        record(
            "resume_delete",
            started_at,
            &format!("user={user} resume_id={id}"),
            result,
        )
    }
}
