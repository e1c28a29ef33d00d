//! In-memory repository and blob-store implementations.
//!
//! Used by tests and local development; they honor the exact trait
//! contracts of the SeaORM implementations (soft-delete filtering,
//! id assignment, full-state save, unique-insert backstop).

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::blob::BlobStore;
use crate::errors::ServiceError;
use crate::group::repository::GroupRepository;
use crate::student::repository::StudentRepository;
use common::types::StudentFields;
use models::{group, student};

#[derive(Default)]
struct Tables {
    groups: BTreeMap<i32, group::Model>,
    students: BTreeMap<i32, student::Model>,
    next_group_id: i32,
    next_student_id: i32,
}

/// Shared in-memory "database" backing both repositories, so the group
/// repository can see student rows for eager loads.
#[derive(Default)]
pub struct MemoryDb {
    tables: RwLock<Tables>,
}

impl MemoryDb {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert_group(&self, name: &str, limit: i32) -> group::Model {
        let mut t = self.tables.write().expect("memory db poisoned");
        t.next_group_id += 1;
        let now = Utc::now().into();
        let g = group::Model {
            id: t.next_group_id,
            name: name.to_string(),
            limit,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        t.groups.insert(g.id, g.clone());
        g
    }

    pub fn insert_student(&self, fields: &StudentFields, image: Option<String>) -> student::Model {
        let mut t = self.tables.write().expect("memory db poisoned");
        t.next_student_id += 1;
        let now = Utc::now().into();
        let s = student::Model {
            id: t.next_student_id,
            first_name: fields.first_name.clone(),
            last_name: fields.last_name.clone(),
            email: fields.email.clone(),
            phone: fields.phone.clone(),
            address: fields.address.clone(),
            birth_date: fields.birth_date,
            image,
            group_id: fields.group_id,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        t.students.insert(s.id, s.clone());
        s
    }

    /// Flip a student's soft-delete flag directly, bypassing the service
    /// rules (models an external actor for tests).
    pub fn soft_delete_student(&self, id: i32) {
        let mut t = self.tables.write().expect("memory db poisoned");
        if let Some(s) = t.students.get_mut(&id) {
            s.is_deleted = true;
            s.updated_at = Utc::now().into();
        }
    }

    fn live_students_of(&self, group_id: i32) -> Vec<student::Model> {
        let t = self.tables.read().expect("memory db poisoned");
        t.students
            .values()
            .filter(|s| s.group_id == Some(group_id) && !s.is_deleted)
            .cloned()
            .collect()
    }
}

#[derive(Clone)]
pub struct MemoryGroupRepository {
    db: Arc<MemoryDb>,
}

impl MemoryGroupRepository {
    pub fn new(db: Arc<MemoryDb>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GroupRepository for MemoryGroupRepository {
    async fn create(&self, name: &str, limit: i32) -> Result<group::Model, ServiceError> {
        // Same backstop the partial unique index gives the Postgres
        // implementation: a live duplicate fails at insert even when the
        // caller skipped the exists check.
        if self.name_in_use(name, None).await? {
            return Err(ServiceError::Db(format!(
                "unique constraint idx_groups_name_live violated by name {name}"
            )));
        }
        Ok(self.db.insert_group(name, limit))
    }

    async fn find_active(&self, id: i32) -> Result<Option<group::Model>, ServiceError> {
        let t = self.db.tables.read().expect("memory db poisoned");
        Ok(t.groups.get(&id).filter(|g| !g.is_deleted).cloned())
    }

    async fn find_active_with_students(
        &self,
        id: i32,
    ) -> Result<Option<(group::Model, Vec<student::Model>)>, ServiceError> {
        let Some(g) = self.find_active(id).await? else {
            return Ok(None);
        };
        Ok(Some((g, self.db.live_students_of(id))))
    }

    async fn page_active(
        &self,
        page_idx: u64,
        per_page: u64,
    ) -> Result<(Vec<group::Model>, u64), ServiceError> {
        let t = self.db.tables.read().expect("memory db poisoned");
        let live: Vec<group::Model> =
            t.groups.values().filter(|g| !g.is_deleted).cloned().collect();
        let total = live.len() as u64;
        let items = live
            .into_iter()
            .skip((page_idx * per_page) as usize)
            .take(per_page as usize)
            .collect();
        Ok((items, total))
    }

    async fn list_active(&self) -> Result<Vec<group::Model>, ServiceError> {
        let t = self.db.tables.read().expect("memory db poisoned");
        let mut live: Vec<group::Model> =
            t.groups.values().filter(|g| !g.is_deleted).cloned().collect();
        live.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(live)
    }

    async fn name_in_use(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, ServiceError> {
        let t = self.db.tables.read().expect("memory db poisoned");
        Ok(t.groups
            .values()
            .any(|g| !g.is_deleted && g.name == name && Some(g.id) != exclude_id))
    }

    async fn save(&self, group: group::Model) -> Result<group::Model, ServiceError> {
        let mut t = self.db.tables.write().expect("memory db poisoned");
        if !t.groups.contains_key(&group.id) {
            return Err(ServiceError::Db(format!("group {} does not exist", group.id)));
        }
        t.groups.insert(group.id, group.clone());
        Ok(group)
    }
}

#[derive(Clone)]
pub struct MemoryStudentRepository {
    db: Arc<MemoryDb>,
}

impl MemoryStudentRepository {
    pub fn new(db: Arc<MemoryDb>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentRepository for MemoryStudentRepository {
    async fn create(
        &self,
        fields: &StudentFields,
        image: Option<String>,
    ) -> Result<student::Model, ServiceError> {
        if self.email_in_use(&fields.email, None).await? {
            return Err(ServiceError::Db(format!(
                "unique constraint idx_students_email_live violated by email {}",
                fields.email
            )));
        }
        Ok(self.db.insert_student(fields, image))
    }

    async fn find_active(&self, id: i32) -> Result<Option<student::Model>, ServiceError> {
        let t = self.db.tables.read().expect("memory db poisoned");
        Ok(t.students.get(&id).filter(|s| !s.is_deleted).cloned())
    }

    async fn page_active(
        &self,
        page_idx: u64,
        per_page: u64,
    ) -> Result<(Vec<student::Model>, u64), ServiceError> {
        let t = self.db.tables.read().expect("memory db poisoned");
        let live: Vec<student::Model> =
            t.students.values().filter(|s| !s.is_deleted).cloned().collect();
        let total = live.len() as u64;
        let items = live
            .into_iter()
            .skip((page_idx * per_page) as usize)
            .take(per_page as usize)
            .collect();
        Ok((items, total))
    }

    async fn email_in_use(
        &self,
        email: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, ServiceError> {
        let t = self.db.tables.read().expect("memory db poisoned");
        Ok(t.students
            .values()
            .any(|s| !s.is_deleted && s.email == email && Some(s.id) != exclude_id))
    }

    async fn save(&self, student: student::Model) -> Result<student::Model, ServiceError> {
        let mut t = self.db.tables.write().expect("memory db poisoned");
        if !t.students.contains_key(&student.id) {
            return Err(ServiceError::Db(format!("student {} does not exist", student.id)));
        }
        t.students.insert(student.id, student.clone());
        Ok(student)
    }
}

/// Blob store keeping file content in a map; lets tests assert reclaim.
#[derive(Default)]
pub struct MemoryBlobStore {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, stored_name: &str) -> bool {
        self.files.read().expect("blob store poisoned").contains_key(stored_name)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn save(&self, bytes: &[u8], original_name: &str) -> Result<String, ServiceError> {
        let stored = format!("{}-{}", Uuid::new_v4(), original_name);
        self.files
            .write()
            .expect("blob store poisoned")
            .insert(stored.clone(), bytes.to_vec());
        Ok(stored)
    }

    async fn delete(&self, stored_name: &str) -> Result<(), ServiceError> {
        self.files.write().expect("blob store poisoned").remove(stored_name);
        Ok(())
    }
}
