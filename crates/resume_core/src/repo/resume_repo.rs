//! Resume repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Per-user resume listing with item counts, create, get, rename, delete.
//!
//! # Invariants
//! - Lists are ordered by `title ASC, id ASC`.
//! - `item_count` counts rows in `resume_items` referencing the resume.
//! - Deleting a resume removes its items through `ON DELETE CASCADE`.

use crate::model::resume::{normalize_resume_title, Resume, ResumeId, ResumeSummary};
use crate::model::UserId;
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const RESUME_COLUMNS: &str = "id, owner, title, created_at, updated_at";

/// Repository interface for resume operations.
pub trait ResumeRepository {
    /// Lists resumes owned by `owner`, each with its item count.
    fn list_resumes(&self, owner: UserId) -> RepoResult<Vec<ResumeSummary>>;
    /// Creates one resume and returns the stored record.
    fn create_resume(&self, owner: UserId, title: &str) -> RepoResult<Resume>;
    /// Loads one resume by exact id.
    fn get_resume(&self, owner: UserId, id: ResumeId) -> RepoResult<Resume>;
    /// Replaces the title of one resume.
    fn rename_resume(&self, owner: UserId, id: ResumeId, title: &str) -> RepoResult<Resume>;
    /// Deletes one resume together with all of its items.
    fn delete_resume(&self, owner: UserId, id: ResumeId) -> RepoResult<()>;
}

/// SQLite-backed resume repository.
pub struct SqliteResumeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteResumeRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ResumeRepository for SqliteResumeRepository<'_> {
    fn list_resumes(&self, owner: UserId) -> RepoResult<Vec<ResumeSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                r.id AS id,
                r.owner AS owner,
                r.title AS title,
                r.created_at AS created_at,
                r.updated_at AS updated_at,
                COUNT(i.id) AS item_count
             FROM resumes r
             LEFT JOIN resume_items i ON i.resume_id = r.id
             WHERE r.owner = ?1
             GROUP BY r.id
             ORDER BY r.title ASC, r.id ASC;",
        )?;

        let mut rows = stmt.query([owner.to_string()])?;
        let mut summaries = Vec::new();
        while let Some(row) = rows.next()? {
            let resume = parse_resume_row(row)?;
            let count: i64 = row.get("item_count")?;
            let item_count = u32::try_from(count).map_err(|_| {
                RepoError::InvalidData(format!(
                    "item count {count} out of range for resume {}",
                    resume.id
                ))
            })?;
            summaries.push(ResumeSummary { resume, item_count });
        }
        Ok(summaries)
    }

    fn create_resume(&self, owner: UserId, title: &str) -> RepoResult<Resume> {
        let title = normalize_resume_title(title)?;
        let id = Uuid::new_v4();

        let mut stmt = self.conn.prepare(&format!(
            "INSERT INTO resumes (id, owner, title)
             VALUES (?1, ?2, ?3)
             RETURNING {RESUME_COLUMNS};"
        ))?;
        let mut rows = stmt.query(params![id.to_string(), owner.to_string(), title])?;
        if let Some(row) = rows.next()? {
            return parse_resume_row(row);
        }
        Err(RepoError::InvalidData(format!(
            "insert of resume {id} returned no row"
        )))
    }

    fn get_resume(&self, owner: UserId, id: ResumeId) -> RepoResult<Resume> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RESUME_COLUMNS}
             FROM resumes
             WHERE id = ?1
               AND owner = ?2;"
        ))?;
        let mut rows = stmt.query([id.to_string(), owner.to_string()])?;
        if let Some(row) = rows.next()? {
            return parse_resume_row(row);
        }
        Err(RepoError::ResumeNotFound(id))
    }

    fn rename_resume(&self, owner: UserId, id: ResumeId, title: &str) -> RepoResult<Resume> {
        let title = normalize_resume_title(title)?;

        let mut stmt = self.conn.prepare(&format!(
            "UPDATE resumes
             SET title = ?3,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1
               AND owner = ?2
             RETURNING {RESUME_COLUMNS};"
        ))?;
        let mut rows = stmt.query(params![id.to_string(), owner.to_string(), title])?;
        if let Some(row) = rows.next()? {
            return parse_resume_row(row);
        }
        Err(RepoError::ResumeNotFound(id))
    }

    fn delete_resume(&self, owner: UserId, id: ResumeId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM resumes WHERE id = ?1 AND owner = ?2;",
            [id.to_string(), owner.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::ResumeNotFound(id));
        }
        Ok(())
    }
}

/// Returns whether `owner` holds resume `id`.
pub(crate) fn resume_owned_by(conn: &Connection, owner: UserId, id: ResumeId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM resumes
            WHERE id = ?1
              AND owner = ?2
        );",
        [id.to_string(), owner.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn parse_resume_row(row: &Row<'_>) -> RepoResult<Resume> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "resumes.id")?;
    let owner_text: String = row.get("owner")?;
    let owner = parse_uuid(&owner_text, "resumes.owner")?;

    Ok(Resume {
        id,
        owner,
        title: row.get("title")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
