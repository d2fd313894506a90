use super::{SeaOrmStorage, aggregates::write_stats, db_err};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::Result;
use crate::models::common::pagination::{MAX_PAGE, MAX_PAGE_SIZE};
use crate::models::{
    PaginationInfo,
    stats::entities::StudentStats,
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UpdateProfileRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::StatsWrite;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建用户
    ///
    /// 学生在同一事务中写入一行全零统计。
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now();
        let is_student = req.role == UserRole::Student;

        let model = ActiveModel {
            email: Set(req.email),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            role: Set(req.role.to_string()),
            student_id: Set(req.student_id),
            department: Set(req.department),
            title: Set(req.title),
            is_active: Set(true),
            enrollment_date: Set(is_student.then(|| now.timestamp())),
            created_at: Set(now.timestamp()),
            updated_at: Set(now.timestamp()),
            ..Default::default()
        };

        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let user = model.insert(&txn).await.map_err(db_err("创建用户失败"))?;

        if is_student {
            let write = StatsWrite {
                expected_version: None,
                stats: StudentStats::empty(user.id, now),
            };
            write_stats(&txn, &write).await?;
        }

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(user.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("查询用户失败"))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err("查询用户失败"))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        // 存储层同样截断，调用方可能绕过 PaginationQuery
        let page = query.page.clamp(1, MAX_PAGE as u64);
        let size = query.size.clamp(1, MAX_PAGE_SIZE as u64);

        let mut select = Users::find();

        // 角色筛选
        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("查询用户总数失败"))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("查询用户列表失败"))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 更新个人资料，用户不存在返回 None
    pub async fn update_user_profile_impl(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<User>> {
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(profile_image) = update.profile_image {
            model.profile_image = Set(Some(profile_image));
        }
        if let Some(department) = update.department {
            model.department = Set(Some(department));
        }
        if let Some(title) = update.title {
            model.title = Set(Some(title));
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("更新用户资料失败"))?;

        self.get_user_by_id_impl(id).await
    }

    /// 记录最近登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<Option<User>> {
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        ActiveModel {
            id: Set(id),
            last_login: Set(Some(chrono::Utc::now().timestamp())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(db_err("更新登录时间失败"))?;

        self.get_user_by_id_impl(id).await
    }

    /// 停用用户，已停用时保持不变
    pub async fn deactivate_user_impl(&self, id: i64) -> Result<Option<User>> {
        let Some(user) = self.get_user_by_id_impl(id).await? else {
            return Ok(None);
        };
        if !user.is_active {
            return Ok(Some(user));
        }

        ActiveModel {
            id: Set(id),
            is_active: Set(false),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(db_err("停用用户失败"))?;

        self.get_user_by_id_impl(id).await
    }
}
