//! Business core for groups and students.
//! - Enforces the domain invariants (uniqueness among live rows, capacity
//!   limit, referential delete guard, soft deletion) on top of repository
//!   traits.
//! - Reuses validation and entity definitions from the `models` crate.
//! - Provides clear error types consumed by the API boundary.

pub mod blob;
pub mod errors;
pub mod group;
pub mod memory;
pub mod pagination;
pub mod student;

pub use blob::{BlobStore, FsBlobStore, PhotoUpload};
pub use errors::ServiceError;
pub use group::{GroupRepository, GroupService, SeaOrmGroupRepository};
pub use memory::{MemoryBlobStore, MemoryDb, MemoryGroupRepository, MemoryStudentRepository};
pub use pagination::PageQuery;
pub use student::{SeaOrmStudentRepository, StudentRepository, StudentService};
