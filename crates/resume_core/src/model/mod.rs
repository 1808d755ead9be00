//! Resume domain model.
//!
//! # Responsibility
//! - Define the records stored by the resume core and their write-side drafts.
//! - Own field-level validation (required-ness, length, date parseability).
//!
//! # Invariants
//! - Owner and parent references are never optional once loaded.
//! - Text limits are counted in characters, not bytes.

pub mod fields;
pub mod resume;
pub mod resume_item;

use uuid::Uuid;

/// Identity of an already-authenticated caller.
///
/// Authentication happens outside this crate; the core only scopes by it.
pub type UserId = Uuid;
