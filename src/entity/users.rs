//! 用户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub profile_image: Option<String>,
    pub student_id: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub is_active: bool,
    pub enrollment_date: Option<i64>,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use super::{to_datetime, to_datetime_opt};
        use crate::models::users::entities::{User, UserRole};

        User {
            id: self.id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            role: self.role.parse::<UserRole>().unwrap_or(UserRole::Student),
            profile_image: self.profile_image,
            student_id: self.student_id,
            enrollment_date: to_datetime_opt(self.enrollment_date),
            department: self.department,
            title: self.title,
            is_active: self.is_active,
            last_login: to_datetime_opt(self.last_login),
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
