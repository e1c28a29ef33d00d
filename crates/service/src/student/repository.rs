use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::errors::ServiceError;
use common::types::StudentFields;
use models::student;

/// Persistence capability set for students, mirroring the group repository.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn create(
        &self,
        fields: &StudentFields,
        image: Option<String>,
    ) -> Result<student::Model, ServiceError>;

    async fn find_active(&self, id: i32) -> Result<Option<student::Model>, ServiceError>;

    async fn page_active(
        &self,
        page_idx: u64,
        per_page: u64,
    ) -> Result<(Vec<student::Model>, u64), ServiceError>;

    /// Is `email` used by a live student other than `exclude_id`?
    async fn email_in_use(&self, email: &str, exclude_id: Option<i32>)
        -> Result<bool, ServiceError>;

    async fn save(&self, student: student::Model) -> Result<student::Model, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn create(
        &self,
        fields: &StudentFields,
        image: Option<String>,
    ) -> Result<student::Model, ServiceError> {
        let created = student::new_active(fields, image).insert(&self.db).await?;
        Ok(created)
    }

    async fn find_active(&self, id: i32) -> Result<Option<student::Model>, ServiceError> {
        let found = student::Entity::find_by_id(id)
            .filter(student::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await?;
        Ok(found)
    }

    async fn page_active(
        &self,
        page_idx: u64,
        per_page: u64,
    ) -> Result<(Vec<student::Model>, u64), ServiceError> {
        let paginator = student::Entity::find()
            .filter(student::Column::IsDeleted.eq(false))
            .order_by_asc(student::Column::Id)
            .paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page_idx).await?;
        Ok((items, total))
    }

    async fn email_in_use(
        &self,
        email: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, ServiceError> {
        let mut query = student::Entity::find()
            .filter(student::Column::Email.eq(email))
            .filter(student::Column::IsDeleted.eq(false));
        if let Some(id) = exclude_id {
            query = query.filter(student::Column::Id.ne(id));
        }
        let count = query.count(&self.db).await?;
        Ok(count > 0)
    }

    async fn save(&self, student: student::Model) -> Result<student::Model, ServiceError> {
        // Mark every field dirty so the full row state is written back.
        let am = student.into_active_model().reset_all();
        let saved = am.update(&self.db).await?;
        Ok(saved)
    }
}
