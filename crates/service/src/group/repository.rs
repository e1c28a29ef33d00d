use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::errors::ServiceError;
use models::{group, student};

/// Persistence capability set for groups. All reads filter soft-deleted
/// rows; `save` persists whatever state the caller hands it, including the
/// soft-delete flag.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn create(&self, name: &str, limit: i32) -> Result<group::Model, ServiceError>;

    async fn find_active(&self, id: i32) -> Result<Option<group::Model>, ServiceError>;

    /// Like `find_active`, with the group's live students eagerly loaded.
    async fn find_active_with_students(
        &self,
        id: i32,
    ) -> Result<Option<(group::Model, Vec<student::Model>)>, ServiceError>;

    /// One page of live groups plus the total live-row count.
    async fn page_active(
        &self,
        page_idx: u64,
        per_page: u64,
    ) -> Result<(Vec<group::Model>, u64), ServiceError>;

    /// All live groups, unpaginated (selection widgets).
    async fn list_active(&self) -> Result<Vec<group::Model>, ServiceError>;

    /// Is `name` used by a live group other than `exclude_id`?
    async fn name_in_use(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, ServiceError>;

    async fn save(&self, group: group::Model) -> Result<group::Model, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmGroupRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl GroupRepository for SeaOrmGroupRepository {
    async fn create(&self, name: &str, limit: i32) -> Result<group::Model, ServiceError> {
        let created = group::new_active(name, limit).insert(&self.db).await?;
        Ok(created)
    }

    async fn find_active(&self, id: i32) -> Result<Option<group::Model>, ServiceError> {
        let found = group::Entity::find_by_id(id)
            .filter(group::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await?;
        Ok(found)
    }

    async fn find_active_with_students(
        &self,
        id: i32,
    ) -> Result<Option<(group::Model, Vec<student::Model>)>, ServiceError> {
        let Some(g) = self.find_active(id).await? else {
            return Ok(None);
        };
        let students = student::Entity::find()
            .filter(student::Column::GroupId.eq(id))
            .filter(student::Column::IsDeleted.eq(false))
            .all(&self.db)
            .await?;
        Ok(Some((g, students)))
    }

    async fn page_active(
        &self,
        page_idx: u64,
        per_page: u64,
    ) -> Result<(Vec<group::Model>, u64), ServiceError> {
        let paginator = group::Entity::find()
            .filter(group::Column::IsDeleted.eq(false))
            .order_by_asc(group::Column::Id)
            .paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page_idx).await?;
        Ok((items, total))
    }

    async fn list_active(&self) -> Result<Vec<group::Model>, ServiceError> {
        let items = group::Entity::find()
            .filter(group::Column::IsDeleted.eq(false))
            .order_by_asc(group::Column::Name)
            .all(&self.db)
            .await?;
        Ok(items)
    }

    async fn name_in_use(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, ServiceError> {
        let mut query = group::Entity::find()
            .filter(group::Column::Name.eq(name))
            .filter(group::Column::IsDeleted.eq(false));
        if let Some(id) = exclude_id {
            query = query.filter(group::Column::Id.ne(id));
        }
        let count = query.count(&self.db).await?;
        Ok(count > 0)
    }

    async fn save(&self, group: group::Model) -> Result<group::Model, ServiceError> {
        // Mark every field dirty so the full row state is written back.
        let am = group.into_active_model().reset_all();
        let saved = am.update(&self.db).await?;
        Ok(saved)
    }
}
