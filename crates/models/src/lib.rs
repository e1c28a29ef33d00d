//! Persistence entities for the university domain.
//!
//! Both tables are soft-deleted: rows are never removed, `is_deleted` is
//! flipped instead, and every read path filters on it.

pub mod db;
pub mod errors;
pub mod group;
pub mod student;
