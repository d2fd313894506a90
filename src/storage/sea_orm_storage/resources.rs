use super::{SeaOrmStorage, aggregates::write_analytics, db_err};
use crate::entity::content_analytics::{
    Column as AnalyticsColumn, Entity as ContentAnalyticsEntity,
};
use crate::entity::resource_access::{
    ActiveModel as AccessActiveModel, Column as AccessColumn, Entity as ResourceAccessEntity,
};
use crate::entity::resources::{ActiveModel, Column, Entity as Resources};
use crate::errors::Result;
use crate::models::{
    resources::{
        entities::{Resource, ResourceAccess},
        requests::{CreateResourceRequest, UpdateResourceRequest},
    },
    stats::entities::ContentType,
};
use crate::storage::ResourceAccessCommit;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建资源，初始未发布
    pub async fn create_resource_impl(&self, req: CreateResourceRequest) -> Result<Resource> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(req.course_id),
            title: Set(req.title),
            description: Set(req.description),
            resource_type: Set(req.resource_type.as_str().to_string()),
            url: Set(req.url),
            category: Set(req.category),
            display_order: Set(req.display_order),
            is_published: Set(false),
            is_visible_to_students: Set(false),
            available_from: Set(req.available_from.map(|d| d.timestamp())),
            expires_at: Set(req.expires_at.map(|d| d.timestamp())),
            created_by: Set(req.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_err("创建资源失败"))?;

        Ok(result.into_resource())
    }

    pub async fn get_resource_by_id_impl(&self, resource_id: i64) -> Result<Option<Resource>> {
        let result = Resources::find_by_id(resource_id)
            .one(&self.db)
            .await
            .map_err(db_err("查询资源失败"))?;

        Ok(result.map(|m| m.into_resource()))
    }

    /// 更新资源
    pub async fn update_resource_impl(
        &self,
        resource_id: i64,
        update: UpdateResourceRequest,
    ) -> Result<Option<Resource>> {
        if self.get_resource_by_id_impl(resource_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(resource_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(url) = update.url {
            model.url = Set(url);
        }
        if let Some(category) = update.category {
            model.category = Set(Some(category));
        }
        if let Some(display_order) = update.display_order {
            model.display_order = Set(display_order);
        }
        if let Some(available_from) = update.available_from {
            model.available_from = Set(Some(available_from.timestamp()));
        }
        if let Some(expires_at) = update.expires_at {
            model.expires_at = Set(Some(expires_at.timestamp()));
        }

        let result = model.update(&self.db).await.map_err(db_err("更新资源失败"))?;

        Ok(Some(result.into_resource()))
    }

    pub async fn set_resource_visibility_impl(
        &self,
        resource_id: i64,
        is_published: bool,
        is_visible_to_students: bool,
    ) -> Result<Option<Resource>> {
        if self.get_resource_by_id_impl(resource_id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(resource_id),
            is_published: Set(is_published),
            is_visible_to_students: Set(is_visible_to_students),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(db_err("更新资源可见性失败"))?;

        Ok(Some(result.into_resource()))
    }

    /// 删除资源，连同访问记录和分析数据
    pub async fn delete_resource_impl(&self, resource_id: i64) -> Result<bool> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        ResourceAccessEntity::delete_many()
            .filter(AccessColumn::ResourceId.eq(resource_id))
            .exec(&txn)
            .await
            .map_err(db_err("删除资源访问记录失败"))?;

        ContentAnalyticsEntity::delete_many()
            .filter(AnalyticsColumn::ContentType.eq(ContentType::Resource.as_str()))
            .filter(AnalyticsColumn::ContentId.eq(resource_id))
            .exec(&txn)
            .await
            .map_err(db_err("删除资源分析数据失败"))?;

        let result = Resources::delete_by_id(resource_id)
            .exec(&txn)
            .await
            .map_err(db_err("删除资源失败"))?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出课程资源，可按分类筛选
    pub async fn list_resources_impl(
        &self,
        course_id: i64,
        include_unpublished: bool,
        category: Option<&str>,
    ) -> Result<Vec<Resource>> {
        let mut select = Resources::find().filter(Column::CourseId.eq(course_id));

        if !include_unpublished {
            select = select
                .filter(Column::IsPublished.eq(true))
                .filter(Column::IsVisibleToStudents.eq(true));
        }
        if let Some(category) = category {
            select = select.filter(Column::Category.eq(category));
        }

        let resources = select
            .order_by_asc(Column::DisplayOrder)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("查询资源列表失败"))?;

        Ok(resources.into_iter().map(|m| m.into_resource()).collect())
    }

    /// 课程内出现过的非空分类，按字母序
    pub async fn list_resource_categories_impl(&self, course_id: i64) -> Result<Vec<String>> {
        let categories: Vec<Option<String>> = Resources::find()
            .select_only()
            .column(Column::Category)
            .distinct()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Category.is_not_null())
            .order_by_asc(Column::Category)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err("查询资源分类失败"))?;

        Ok(categories
            .into_iter()
            .flatten()
            .filter(|c| !c.trim().is_empty())
            .collect())
    }

    pub async fn has_accessed_resource_impl(&self, resource_id: i64, user_id: i64) -> Result<bool> {
        let count = ResourceAccessEntity::find()
            .filter(AccessColumn::ResourceId.eq(resource_id))
            .filter(AccessColumn::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(db_err("查询资源访问记录失败"))?;

        Ok(count > 0)
    }

    /// 记录访问，并在同一事务中更新资源分析
    pub async fn record_resource_access_impl(
        &self,
        commit: ResourceAccessCommit,
    ) -> Result<ResourceAccess> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let model = AccessActiveModel {
            resource_id: Set(commit.resource_id),
            user_id: Set(commit.user_id),
            action: Set(commit.action.as_str().to_string()),
            accessed_at: Set(commit.accessed_at.timestamp()),
            ..Default::default()
        };

        let access = model
            .insert(&txn)
            .await
            .map_err(db_err("记录资源访问失败"))?;

        write_analytics(&txn, &commit.analytics).await?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(access.into_resource_access())
    }
}
