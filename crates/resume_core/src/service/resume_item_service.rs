//! Resume item use-case service.
//!
//! # Responsibility
//! - Parse submitted field bags into validated drafts.
//! - Provide scoped list/create/get/edit/delete for items of one resume.
//!
//! # Invariants
//! - Field bags are validated before any storage access; invalid input
//!   never reaches the database.
//! - Edits replace every editable field (full-form semantics).

use crate::model::fields::FieldBag;
use crate::model::resume::ResumeId;
use crate::model::resume_item::{ResumeItem, ResumeItemDraft, ResumeItemId};
use crate::model::UserId;
use crate::repo::resume_item_repo::ResumeItemRepository;
use crate::service::{record, ResumeError, ServiceResult};
use std::time::Instant;

/// Resume item service facade over repository implementations.
pub struct ResumeItemService<R: ResumeItemRepository> {
    repo: R,
}

impl<R: ResumeItemRepository> ResumeItemService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists items of one of the caller's resumes, most recent first.
    pub fn list_items(&self, user: UserId, resume_id: ResumeId) -> ServiceResult<Vec<ResumeItem>> {
        let started_at = Instant::now();
        let result = self
            .repo
            .list_items(user, resume_id)
            .map_err(ResumeError::from);
        let context = match &result {
            Ok(items) => format!("user={user} resume_id={resume_id} count={}", items.len()),
            Err(_) => format!("user={user} resume_id={resume_id}"),
        };
        record("resume_item_list", started_at, &context, result)
    }

    /// Creates an item from a submitted field bag.
    pub fn create_item(
        &self,
        user: UserId,
        resume_id: ResumeId,
        fields: &FieldBag,
    ) -> ServiceResult<ResumeItem> {
        match ResumeItemDraft::from_fields(fields) {
            Ok(draft) => self.create_item_draft(user, resume_id, &draft),
            Err(err) => record(
                "resume_item_create",
                Instant::now(),
                &format!("user={user} resume_id={resume_id}"),
                Err(err.into()),
            ),
        }
    }

    /// Creates an item from typed input.
    pub fn create_item_draft(
        &self,
        user: UserId,
        resume_id: ResumeId,
        draft: &ResumeItemDraft,
    ) -> ServiceResult<ResumeItem> {
        let started_at = Instant::now();
        let result = self
            .repo
            .create_item(user, resume_id, draft)
            .map_err(ResumeError::from);
        let context = match &result {
            Ok(item) => format!("user={user} resume_id={resume_id} item_id={}", item.id),
            Err(_) => format!("user={user} resume_id={resume_id}"),
        };
        record("resume_item_create", started_at, &context, result)
    }

    /// Loads one item, requiring it to belong to `resume_id`.
    pub fn get_item(
        &self,
        user: UserId,
        resume_id: ResumeId,
        item_id: ResumeItemId,
    ) -> ServiceResult<ResumeItem> {
        let started_at = Instant::now();
        let result = self
            .repo
            .get_item(user, resume_id, item_id)
            .map_err(ResumeError::from);
        record(
            "resume_item_get",
            started_at,
            &format!("user={user} resume_id={resume_id} item_id={item_id}"),
            result,
        )
    }

    /// Replaces the editable fields of one scoped item from a field bag.
    pub fn edit_item(
        &self,
        user: UserId,
        resume_id: ResumeId,
        item_id: ResumeItemId,
        fields: &FieldBag,
    ) -> ServiceResult<ResumeItem> {
        match ResumeItemDraft::from_fields(fields) {
            Ok(draft) => self.edit_item_draft(user, resume_id, item_id, &draft),
            Err(err) => record(
                "resume_item_edit",
                Instant::now(),
                &format!("user={user} resume_id={resume_id} item_id={item_id}"),
                Err(err.into()),
            ),
        }
    }

    /// Replaces the editable fields of one scoped item from typed input.
    pub fn edit_item_draft(
        &self,
        user: UserId,
        resume_id: ResumeId,
        item_id: ResumeItemId,
        draft: &ResumeItemDraft,
    ) -> ServiceResult<ResumeItem> {
        let started_at = Instant::now();
        let result = self
            .repo
            .update_item(user, resume_id, item_id, draft)
            .map_err(ResumeError::from);
        record(
            "resume_item_edit",
            started_at,
            &format!("user={user} resume_id={resume_id} item_id={item_id}"),
            result,
        )
    }

    /// Deletes one scoped item.
    pub fn delete_item(
        &self,
        user: UserId,
        resume_id: ResumeId,
        item_id: ResumeItemId,
    ) -> ServiceResult<()> {
        let started_at = Instant::now();
        let result = self
            .repo
            .delete_item(user, resume_id, item_id)
            .map_err(ResumeError::from);
        record(
            "resume_item_delete",
            started_at,
            &format!("user={user} resume_id={resume_id} item_id={item_id}"),
            result,
        )
    }
}
