use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::group::repository::GroupRepository;
use crate::pagination::PageQuery;
use common::types::{GroupCreateRequest, GroupDetail, GroupListItem, GroupOption, Paged};

/// Business rules for groups: name uniqueness among live rows, capacity
/// limit never below enrollment, no deletion while students remain.
#[derive(Clone)]
pub struct GroupService {
    repo: Arc<dyn GroupRepository>,
}

impl GroupService {
    pub fn new(repo: Arc<dyn GroupRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, req), fields(name = %req.name))]
    pub async fn create(&self, req: &GroupCreateRequest) -> Result<i32, ServiceError> {
        models::group::validate_name(&req.name)?;
        models::group::validate_limit(req.limit)?;

        if self.repo.name_in_use(&req.name, None).await? {
            return Err(ServiceError::Duplicate { field: "name" });
        }

        let created = self.repo.create(&req.name, req.limit).await?;
        info!(group_id = created.id, "created group");
        Ok(created.id)
    }

    pub async fn get_all(&self, query: PageQuery) -> Result<Paged<GroupListItem>, ServiceError> {
        let (page_idx, per_page) = query.validate()?;
        let (rows, total) = self.repo.page_active(page_idx, per_page).await?;
        let items = rows.into_iter().map(Into::into).collect();
        Ok(Paged::new(items, query.page_number, query.page_size, total))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<GroupDetail, ServiceError> {
        let group = self
            .repo
            .find_active(id)
            .await?
            .ok_or(ServiceError::not_found("Group"))?;
        Ok(group.into())
    }

    /// Unpaginated `{id, name}` list for selection widgets.
    pub async fn get_whole(&self) -> Result<Vec<GroupOption>, ServiceError> {
        let groups = self.repo.list_active().await?;
        Ok(groups.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, req), fields(group_id = id))]
    pub async fn update(&self, id: i32, req: &GroupCreateRequest) -> Result<(), ServiceError> {
        models::group::validate_name(&req.name)?;
        models::group::validate_limit(req.limit)?;

        let (mut group, students) = self
            .repo
            .find_active_with_students(id)
            .await?
            .ok_or(ServiceError::not_found("Group"))?;

        if group.name != req.name && self.repo.name_in_use(&req.name, Some(id)).await? {
            return Err(ServiceError::Duplicate { field: "name" });
        }

        if (students.len() as i32) > req.limit {
            return Err(ServiceError::field("limit", "Limit overflow"));
        }

        group.name = req.name.clone();
        group.limit = req.limit;
        group.updated_at = Utc::now().into();
        self.repo.save(group).await?;
        info!(group_id = id, "updated group");
        Ok(())
    }

    #[instrument(skip(self), fields(group_id = id))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let (mut group, students) = self
            .repo
            .find_active_with_students(id)
            .await?
            .ok_or(ServiceError::not_found("Group"))?;

        if !students.is_empty() {
            return Err(ServiceError::field("group", "Group has students"));
        }

        group.is_deleted = true;
        group.updated_at = Utc::now().into();
        self.repo.save(group).await?;
        info!(group_id = id, "soft-deleted group");
        Ok(())
    }
}
