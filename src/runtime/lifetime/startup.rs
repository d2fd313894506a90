use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreateUserRequest, UserListQuery};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

// 默认管理员邮箱
const DEFAULT_ADMIN_EMAIL: &str = "admin@lms.local";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 初始化默认管理员账号
/// 如果数据库中没有管理员，则创建一个，保证评分与建课有可用的操作人
async fn seed_admin(storage: &Arc<dyn Storage>) {
    let query = UserListQuery {
        page: 1,
        size: 1,
        role: Some(UserRole::Admin),
    };

    match storage.list_users_with_pagination(query).await {
        Ok(list) if list.pagination.total > 0 => {
            debug!(
                "Database already has {} admin(s), skipping admin seed",
                list.pagination.total
            );
            return;
        }
        Ok(_) => {
            info!("No admin found in database, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count admins: {}, skipping admin seed", e);
            return;
        }
    }

    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| {
        warn!("ADMIN_EMAIL not set, using {}", DEFAULT_ADMIN_EMAIL);
        DEFAULT_ADMIN_EMAIL.to_string()
    });

    let admin_request = CreateUserRequest {
        email,
        first_name: "System".to_string(),
        last_name: "Administrator".to_string(),
        role: UserRole::Admin,
        student_id: None,
        department: None,
        title: None,
    };

    match storage.create_user(admin_request).await {
        Ok(user) => {
            info!(
                "Default admin account created successfully (ID: {}, email: {})",
                user.id, user.email
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储连接、迁移和初始数据
pub async fn prepare_server_startup() -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认管理员账号（如果需要）
    seed_admin(&storage).await;

    StartupContext { storage }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::memory_storage;

    #[tokio::test]
    async fn test_seed_admin_runs_once() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);

        seed_admin(&storage).await;
        seed_admin(&storage).await;

        let admins = storage
            .list_users_with_pagination(UserListQuery {
                page: 1,
                size: 10,
                role: Some(UserRole::Admin),
            })
            .await
            .unwrap();
        assert_eq!(admins.pagination.total, 1);
        assert!(admins.items[0].role.can_grade());
    }
}
