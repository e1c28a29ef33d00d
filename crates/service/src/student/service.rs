use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use crate::blob::{BlobStore, PhotoUpload};
use crate::errors::ServiceError;
use crate::group::repository::GroupRepository;
use crate::pagination::PageQuery;
use crate::student::repository::StudentRepository;
use common::types::{Paged, StudentDetail, StudentFields, StudentListItem};

/// Business rules for students: email uniqueness among live rows, the
/// owning group must exist and be live, photo files are reclaimed when
/// replaced.
#[derive(Clone)]
pub struct StudentService {
    repo: Arc<dyn StudentRepository>,
    groups: Arc<dyn GroupRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl StudentService {
    pub fn new(
        repo: Arc<dyn StudentRepository>,
        groups: Arc<dyn GroupRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self { repo, groups, blobs }
    }

    async fn check_group_exists(&self, group_id: Option<i32>) -> Result<(), ServiceError> {
        if let Some(gid) = group_id {
            if self.groups.find_active(gid).await?.is_none() {
                return Err(ServiceError::field("groupId", "Group not found"));
            }
        }
        Ok(())
    }

    fn validate(fields: &StudentFields) -> Result<(), ServiceError> {
        models::student::validate_names(&fields.first_name, &fields.last_name)?;
        models::student::validate_email(&fields.email)?;
        Ok(())
    }

    #[instrument(skip(self, fields, photo), fields(email = %fields.email))]
    pub async fn create(
        &self,
        fields: &StudentFields,
        photo: Option<PhotoUpload>,
    ) -> Result<i32, ServiceError> {
        Self::validate(fields)?;

        if self.repo.email_in_use(&fields.email, None).await? {
            return Err(ServiceError::Duplicate { field: "email" });
        }
        self.check_group_exists(fields.group_id).await?;

        let image = match photo {
            Some(p) => Some(self.blobs.save(&p.bytes, &p.file_name).await?),
            None => None,
        };

        let created = self.repo.create(fields, image).await?;
        info!(student_id = created.id, "created student");
        Ok(created.id)
    }

    pub async fn get_all(&self, query: PageQuery) -> Result<Paged<StudentListItem>, ServiceError> {
        let (page_idx, per_page) = query.validate()?;
        let (rows, total) = self.repo.page_active(page_idx, per_page).await?;
        let items = rows.into_iter().map(Into::into).collect();
        Ok(Paged::new(items, query.page_number, query.page_size, total))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<StudentDetail, ServiceError> {
        let student = self
            .repo
            .find_active(id)
            .await?
            .ok_or(ServiceError::not_found("Student"))?;
        Ok(student.into())
    }

    #[instrument(skip(self, fields, photo), fields(student_id = id))]
    pub async fn update(
        &self,
        id: i32,
        fields: &StudentFields,
        photo: Option<PhotoUpload>,
    ) -> Result<(), ServiceError> {
        Self::validate(fields)?;

        let mut student = self
            .repo
            .find_active(id)
            .await?
            .ok_or(ServiceError::not_found("Student"))?;

        if student.email != fields.email && self.repo.email_in_use(&fields.email, Some(id)).await? {
            return Err(ServiceError::Duplicate { field: "email" });
        }
        self.check_group_exists(fields.group_id).await?;

        student.apply_fields(fields);

        if let Some(p) = photo {
            // Reclaim the previous stored file before recording the new one.
            if let Some(old) = student.image.take() {
                self.blobs.delete(&old).await?;
            }
            student.image = Some(self.blobs.save(&p.bytes, &p.file_name).await?);
        }

        self.repo.save(student).await?;
        info!(student_id = id, "updated student");
        Ok(())
    }

    #[instrument(skip(self), fields(student_id = id))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let mut student = self
            .repo
            .find_active(id)
            .await?
            .ok_or(ServiceError::not_found("Student"))?;

        student.is_deleted = true;
        student.updated_at = Utc::now().into();
        self.repo.save(student).await?;
        info!(student_id = id, "soft-deleted student");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryBlobStore, MemoryDb, MemoryGroupRepository, MemoryStudentRepository};
    use chrono::NaiveDate;

    struct Fixture {
        students: StudentService,
        groups: crate::group::GroupService,
        blobs: Arc<MemoryBlobStore>,
    }

    fn fixture() -> Fixture {
        let db = MemoryDb::shared();
        let group_repo = Arc::new(MemoryGroupRepository::new(db.clone()));
        let blobs = Arc::new(MemoryBlobStore::new());
        Fixture {
            students: StudentService::new(
                Arc::new(MemoryStudentRepository::new(db.clone())),
                group_repo.clone(),
                blobs.clone(),
            ),
            groups: crate::group::GroupService::new(group_repo),
            blobs,
        }
    }

    fn fields(email: &str, group_id: Option<i32>) -> StudentFields {
        StudentFields {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            phone: "555-0100".into(),
            address: "12 Analytical St".into(),
            birth_date: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
            group_id,
        }
    }

    fn photo(name: &str) -> PhotoUpload {
        PhotoUpload { file_name: name.into(), bytes: vec![1, 2, 3] }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email_among_live_rows() {
        let fx = fixture();
        fx.students.create(&fields("ada@example.com", None), None).await.unwrap();

        let err = fx.students.create(&fields("ada@example.com", None), None).await.unwrap_err();
        assert_eq!(err.status(), 400);
        assert_eq!(err.field_errors()[0].field, "email");
    }

    #[tokio::test]
    async fn deleted_student_email_may_be_reused() {
        let fx = fixture();
        let id = fx.students.create(&fields("ada@example.com", None), None).await.unwrap();
        fx.students.delete(id).await.unwrap();

        fx.students.create(&fields("ada@example.com", None), None).await.unwrap();
    }

    #[tokio::test]
    async fn create_rejects_dangling_group_reference() {
        let fx = fixture();
        let err = fx.students.create(&fields("ada@example.com", Some(99)), None).await.unwrap_err();
        assert_eq!(err.field_errors()[0].field, "groupId");
    }

    #[tokio::test]
    async fn create_saves_photo_and_records_stored_name() {
        let fx = fixture();
        let id = fx
            .students
            .create(&fields("ada@example.com", None), Some(photo("face.png")))
            .await
            .unwrap();

        let detail = fx.students.get_by_id(id).await.unwrap();
        let stored = detail.image.expect("image recorded");
        assert!(stored.ends_with("face.png"));
        assert!(fx.blobs.contains(&stored));
    }

    #[tokio::test]
    async fn update_replaces_photo_and_reclaims_the_old_file() {
        let fx = fixture();
        let id = fx
            .students
            .create(&fields("ada@example.com", None), Some(photo("old.png")))
            .await
            .unwrap();
        let old = fx.students.get_by_id(id).await.unwrap().image.unwrap();

        fx.students
            .update(id, &fields("ada@example.com", None), Some(photo("new.png")))
            .await
            .unwrap();

        let new = fx.students.get_by_id(id).await.unwrap().image.unwrap();
        assert_ne!(old, new);
        assert!(!fx.blobs.contains(&old), "old blob reclaimed");
        assert!(fx.blobs.contains(&new));
    }

    #[tokio::test]
    async fn update_without_photo_keeps_the_existing_image() {
        let fx = fixture();
        let id = fx
            .students
            .create(&fields("ada@example.com", None), Some(photo("keep.png")))
            .await
            .unwrap();
        let before = fx.students.get_by_id(id).await.unwrap().image;

        fx.students.update(id, &fields("ada@new.example.com", None), None).await.unwrap();

        let after = fx.students.get_by_id(id).await.unwrap();
        assert_eq!(after.email, "ada@new.example.com");
        assert_eq!(after.image, before);
    }

    #[tokio::test]
    async fn round_trip_create_then_get() {
        let fx = fixture();
        let gid = fx
            .groups
            .create(&common::types::GroupCreateRequest { name: "A1".into(), limit: 5 })
            .await
            .unwrap();
        let input = fields("ada@example.com", Some(gid));
        let id = fx.students.create(&input, None).await.unwrap();

        let detail = fx.students.get_by_id(id).await.unwrap();
        assert_eq!(detail.first_name, input.first_name);
        assert_eq!(detail.email, input.email);
        assert_eq!(detail.birth_date, input.birth_date);
        assert_eq!(detail.group_id, Some(gid));
    }

    #[tokio::test]
    async fn delete_is_soft_and_reports_not_found_afterwards() {
        let fx = fixture();
        let id = fx.students.create(&fields("ada@example.com", None), None).await.unwrap();
        fx.students.delete(id).await.unwrap();

        assert_eq!(fx.students.get_by_id(id).await.unwrap_err().status(), 404);
        assert_eq!(fx.students.delete(id).await.unwrap_err().status(), 404);
    }

    #[tokio::test]
    async fn listing_filters_deleted_students() {
        let fx = fixture();
        fx.students.create(&fields("a@example.com", None), None).await.unwrap();
        let gone = fx.students.create(&fields("b@example.com", None), None).await.unwrap();
        fx.students.delete(gone).await.unwrap();

        let page = fx
            .students
            .get_all(PageQuery { page_number: 1, page_size: 10 })
            .await
            .unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].email, "a@example.com");
    }
}
