//! Resume item repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - List, create, get, edit and delete items inside one resume.
//!
//! # Invariants
//! - Every operation first proves the parent resume belongs to the caller,
//!   inside the same transaction as the read or write it guards.
//! - Item lookups match both `id` and `resume_id`; an item that lives under
//!   another resume is reported as not found.
//! - Lists are ordered by `start_date DESC, id ASC`.

use crate::model::fields::format_date;
use crate::model::resume::ResumeId;
use crate::model::resume_item::{ResumeItem, ResumeItemDraft, ResumeItemId};
use crate::model::UserId;
use crate::repo::resume_repo::resume_owned_by;
use crate::repo::{
    ensure_connection_ready, parse_stored_date, parse_uuid, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use uuid::Uuid;

const ITEM_COLUMNS: &str =
    "id, resume_id, title, company, start_date, end_date, description, created_at, updated_at";

/// Repository interface for resume item operations.
pub trait ResumeItemRepository {
    /// Lists items of one resume, most recent start date first.
    fn list_items(&self, owner: UserId, resume_id: ResumeId) -> RepoResult<Vec<ResumeItem>>;
    /// Creates one item under `resume_id` and returns the stored record.
    fn create_item(
        &self,
        owner: UserId,
        resume_id: ResumeId,
        draft: &ResumeItemDraft,
    ) -> RepoResult<ResumeItem>;
    /// Loads one item scoped to its resume.
    fn get_item(
        &self,
        owner: UserId,
        resume_id: ResumeId,
        item_id: ResumeItemId,
    ) -> RepoResult<ResumeItem>;
    /// Replaces all editable fields of one scoped item.
    fn update_item(
        &self,
        owner: UserId,
        resume_id: ResumeId,
        item_id: ResumeItemId,
        draft: &ResumeItemDraft,
    ) -> RepoResult<ResumeItem>;
    /// Deletes one scoped item.
    fn delete_item(
        &self,
        owner: UserId,
        resume_id: ResumeId,
        item_id: ResumeItemId,
    ) -> RepoResult<()>;
}

/// SQLite-backed resume item repository.
pub struct SqliteResumeItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteResumeItemRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn in_resume_scope<T>(
        &self,
        behavior: TransactionBehavior,
        owner: UserId,
        resume_id: ResumeId,
        op: impl FnOnce(&Connection) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let tx = Transaction::new_unchecked(self.conn, behavior)?;
        if !resume_owned_by(&tx, owner, resume_id)? {
            return Err(RepoError::ResumeNotFound(resume_id));
        }
        let value = op(&*tx)?;
        tx.commit()?;
        Ok(value)
    }
}

impl ResumeItemRepository for SqliteResumeItemRepository<'_> {
    fn list_items(&self, owner: UserId, resume_id: ResumeId) -> RepoResult<Vec<ResumeItem>> {
        self.in_resume_scope(TransactionBehavior::Deferred, owner, resume_id, |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ITEM_COLUMNS}
                 FROM resume_items
                 WHERE resume_id = ?1
                 ORDER BY start_date DESC, id ASC;"
            ))?;
            let mut rows = stmt.query([resume_id.to_string()])?;
            let mut items = Vec::new();
            while let Some(row) = rows.next()? {
                items.push(parse_item_row(row)?);
            }
            Ok(items)
        })
    }

    fn create_item(
        &self,
        owner: UserId,
        resume_id: ResumeId,
        draft: &ResumeItemDraft,
    ) -> RepoResult<ResumeItem> {
        let draft = draft.validated()?;
        let item_id = Uuid::new_v4();

        self.in_resume_scope(TransactionBehavior::Immediate, owner, resume_id, |conn| {
            let mut stmt = conn.prepare(&format!(
                "INSERT INTO resume_items (
                    id,
                    resume_id,
                    title,
                    company,
                    start_date,
                    end_date,
                    description
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 RETURNING {ITEM_COLUMNS};"
            ))?;
            let mut rows = stmt.query(params![
                item_id.to_string(),
                resume_id.to_string(),
                draft.title.as_str(),
                draft.company.as_str(),
                format_date(draft.start_date),
                draft.end_date.map(format_date),
                draft.description.as_deref(),
            ])?;
            if let Some(row) = rows.next()? {
                return parse_item_row(row);
            }
            Err(RepoError::InvalidData(format!(
                "insert of resume item {item_id} returned no row"
            )))
        })
    }

    fn get_item(
        &self,
        owner: UserId,
        resume_id: ResumeId,
        item_id: ResumeItemId,
    ) -> RepoResult<ResumeItem> {
        self.in_resume_scope(TransactionBehavior::Deferred, owner, resume_id, |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ITEM_COLUMNS}
                 FROM resume_items
                 WHERE id = ?1
                   AND resume_id = ?2;"
            ))?;
            let mut rows = stmt.query([item_id.to_string(), resume_id.to_string()])?;
            if let Some(row) = rows.next()? {
                return parse_item_row(row);
            }
            Err(RepoError::ItemNotFound { resume_id, item_id })
        })
    }

    fn update_item(
        &self,
        owner: UserId,
        resume_id: ResumeId,
        item_id: ResumeItemId,
        draft: &ResumeItemDraft,
    ) -> RepoResult<ResumeItem> {
        let draft = draft.validated()?;

        self.in_resume_scope(TransactionBehavior::Immediate, owner, resume_id, |conn| {
            let mut stmt = conn.prepare(&format!(
                "UPDATE resume_items
                 SET
                    title = ?3,
                    company = ?4,
                    start_date = ?5,
                    end_date = ?6,
                    description = ?7,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?1
                   AND resume_id = ?2
                 RETURNING {ITEM_COLUMNS};"
            ))?;
            let mut rows = stmt.query(params![
                item_id.to_string(),
                resume_id.to_string(),
                draft.title.as_str(),
                draft.company.as_str(),
                format_date(draft.start_date),
                draft.end_date.map(format_date),
                draft.description.as_deref(),
            ])?;
            if let Some(row) = rows.next()? {
                return parse_item_row(row);
            }
            Err(RepoError::ItemNotFound { resume_id, item_id })
        })
    }

    fn delete_item(
        &self,
        owner: UserId,
        resume_id: ResumeId,
        item_id: ResumeItemId,
    ) -> RepoResult<()> {
        self.in_resume_scope(TransactionBehavior::Immediate, owner, resume_id, |conn| {
            let changed = conn.execute(
                "DELETE FROM resume_items WHERE id = ?1 AND resume_id = ?2;",
                [item_id.to_string(), resume_id.to_string()],
            )?;
            if changed == 0 {
                return Err(RepoError::ItemNotFound { resume_id, item_id });
            }
            Ok(())
        })
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<ResumeItem> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "resume_items.id")?;
    let resume_id_text: String = row.get("resume_id")?;
    let resume_id = parse_uuid(&resume_id_text, "resume_items.resume_id")?;

    let start_text: String = row.get("start_date")?;
    let start_date = parse_stored_date(&start_text, "resume_items.start_date")?;
    let end_date = match row.get::<_, Option<String>>("end_date")? {
        Some(value) => Some(parse_stored_date(&value, "resume_items.end_date")?),
        None => None,
    };

    Ok(ResumeItem {
        id,
        resume_id,
        title: row.get("title")?,
        company: row.get("company")?,
        start_date,
        end_date,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
