use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 课程资源表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Resources::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Resources::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Resources::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Resources::Title).string().not_null())
                    .col(ColumnDef::new(Resources::Description).text().null())
                    .col(ColumnDef::new(Resources::ResourceType).string().not_null())
                    .col(ColumnDef::new(Resources::Url).string().not_null())
                    .col(ColumnDef::new(Resources::Category).string().null())
                    .col(
                        ColumnDef::new(Resources::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Resources::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Resources::IsVisibleToStudents)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Resources::AvailableFrom).big_integer().null())
                    .col(ColumnDef::new(Resources::ExpiresAt).big_integer().null())
                    .col(ColumnDef::new(Resources::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Resources::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Resources::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Resources::Table, Resources::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 资源访问记录表 ====================
        manager
            .create_table(
                Table::create()
                    .table(ResourceAccess::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResourceAccess::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ResourceAccess::ResourceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ResourceAccess::UserId).big_integer().not_null())
                    .col(ColumnDef::new(ResourceAccess::Action).string().not_null())
                    .col(
                        ColumnDef::new(ResourceAccess::AccessedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ResourceAccess::Table, ResourceAccess::ResourceId)
                            .to(Resources::Table, Resources::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ResourceAccess::Table, ResourceAccess::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_resources_course_category")
                    .table(Resources::Table)
                    .col(Resources::CourseId)
                    .col(Resources::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_resource_access_resource_user")
                    .table(ResourceAccess::Table)
                    .col(ResourceAccess::ResourceId)
                    .col(ResourceAccess::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ResourceAccess::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Resources::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Resources {
    #[sea_orm(iden = "resources")]
    Table,
    Id,
    CourseId,
    Title,
    Description,
    ResourceType,
    Url,
    Category,
    DisplayOrder,
    IsPublished,
    IsVisibleToStudents,
    AvailableFrom,
    ExpiresAt,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ResourceAccess {
    #[sea_orm(iden = "resource_access")]
    Table,
    Id,
    ResourceId,
    UserId,
    Action,
    AccessedAt,
}
