use super::{
    SeaOrmStorage,
    aggregates::{write_analytics, write_stats},
    db_err,
};
use crate::entity::content_analytics::{
    Column as AnalyticsColumn, Entity as ContentAnalyticsEntity,
};
use crate::entity::note_views::{
    ActiveModel as NoteViewActiveModel, Column as NoteViewColumn, Entity as NoteViews,
};
use crate::entity::notes::{ActiveModel, Column, Entity as Notes};
use crate::errors::Result;
use crate::models::{
    notes::{
        entities::{Note, NoteView},
        requests::{CreateNoteRequest, UpdateNoteRequest},
    },
    stats::entities::ContentType,
};
use crate::storage::NoteViewCommit;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建笔记
    pub async fn create_note_impl(&self, req: CreateNoteRequest) -> Result<Note> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(req.course_id),
            title: Set(req.title),
            content: Set(req.content),
            display_order: Set(req.display_order),
            is_published: Set(req.is_published),
            is_visible_to_students: Set(req.is_visible_to_students),
            publish_at: Set(req.publish_at.map(|d| d.timestamp())),
            expires_at: Set(req.expires_at.map(|d| d.timestamp())),
            created_by: Set(req.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_err("创建笔记失败"))?;

        Ok(result.into_note())
    }

    /// 通过 ID 获取笔记
    pub async fn get_note_by_id_impl(&self, note_id: i64) -> Result<Option<Note>> {
        let result = Notes::find_by_id(note_id)
            .one(&self.db)
            .await
            .map_err(db_err("查询笔记失败"))?;

        Ok(result.map(|m| m.into_note()))
    }

    /// 更新笔记
    pub async fn update_note_impl(
        &self,
        note_id: i64,
        update: UpdateNoteRequest,
    ) -> Result<Option<Note>> {
        if self.get_note_by_id_impl(note_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(note_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(content) = update.content {
            model.content = Set(content);
        }
        if let Some(display_order) = update.display_order {
            model.display_order = Set(display_order);
        }
        if let Some(publish_at) = update.publish_at {
            model.publish_at = Set(Some(publish_at.timestamp()));
        }
        if let Some(expires_at) = update.expires_at {
            model.expires_at = Set(Some(expires_at.timestamp()));
        }

        let result = model.update(&self.db).await.map_err(db_err("更新笔记失败"))?;

        Ok(Some(result.into_note()))
    }

    /// 设置笔记可见性
    pub async fn set_note_visibility_impl(
        &self,
        note_id: i64,
        is_published: bool,
        is_visible_to_students: bool,
    ) -> Result<Option<Note>> {
        if self.get_note_by_id_impl(note_id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(note_id),
            is_published: Set(is_published),
            is_visible_to_students: Set(is_visible_to_students),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(db_err("更新笔记可见性失败"))?;

        Ok(Some(result.into_note()))
    }

    /// 删除笔记，连同浏览记录和分析数据
    pub async fn delete_note_impl(&self, note_id: i64) -> Result<bool> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        NoteViews::delete_many()
            .filter(NoteViewColumn::NoteId.eq(note_id))
            .exec(&txn)
            .await
            .map_err(db_err("删除笔记浏览记录失败"))?;

        ContentAnalyticsEntity::delete_many()
            .filter(AnalyticsColumn::ContentType.eq(ContentType::Note.as_str()))
            .filter(AnalyticsColumn::ContentId.eq(note_id))
            .exec(&txn)
            .await
            .map_err(db_err("删除笔记分析数据失败"))?;

        let result = Notes::delete_by_id(note_id)
            .exec(&txn)
            .await
            .map_err(db_err("删除笔记失败"))?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出课程笔记
    pub async fn list_notes_impl(
        &self,
        course_id: i64,
        include_unpublished: bool,
    ) -> Result<Vec<Note>> {
        let mut select = Notes::find().filter(Column::CourseId.eq(course_id));

        if !include_unpublished {
            select = select
                .filter(Column::IsPublished.eq(true))
                .filter(Column::IsVisibleToStudents.eq(true));
        }

        let notes = select
            .order_by_asc(Column::DisplayOrder)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("查询笔记列表失败"))?;

        Ok(notes.into_iter().map(|m| m.into_note()).collect())
    }

    /// 用户是否浏览过笔记
    pub async fn has_viewed_note_impl(&self, note_id: i64, user_id: i64) -> Result<bool> {
        let count = NoteViews::find()
            .filter(NoteViewColumn::NoteId.eq(note_id))
            .filter(NoteViewColumn::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(db_err("查询浏览记录失败"))?;

        Ok(count > 0)
    }

    /// 统计笔记浏览次数与独立浏览人数
    pub async fn count_note_views_impl(&self, note_id: i64) -> Result<(i64, i64)> {
        let total = NoteViews::find()
            .filter(NoteViewColumn::NoteId.eq(note_id))
            .count(&self.db)
            .await
            .map_err(db_err("统计浏览次数失败"))?;

        let unique = NoteViews::find()
            .select_only()
            .column(NoteViewColumn::UserId)
            .distinct()
            .filter(NoteViewColumn::NoteId.eq(note_id))
            .count(&self.db)
            .await
            .map_err(db_err("统计浏览人数失败"))?;

        Ok((total as i64, unique as i64))
    }

    /// 统计带时长的浏览次数
    pub async fn count_timed_note_views_impl(&self, note_id: i64) -> Result<i64> {
        let count = NoteViews::find()
            .filter(NoteViewColumn::NoteId.eq(note_id))
            .filter(NoteViewColumn::Duration.gt(0))
            .count(&self.db)
            .await
            .map_err(db_err("统计浏览时长失败"))?;

        Ok(count as i64)
    }

    /// 记录浏览，并在同一事务中更新学生统计和笔记分析
    pub async fn record_note_view_impl(&self, commit: NoteViewCommit) -> Result<NoteView> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let model = NoteViewActiveModel {
            note_id: Set(commit.note_id),
            user_id: Set(commit.user_id),
            viewed_at: Set(commit.viewed_at.timestamp()),
            duration: Set(commit.duration),
            ..Default::default()
        };

        let view = model.insert(&txn).await.map_err(db_err("记录浏览失败"))?;

        write_stats(&txn, &commit.stats).await?;
        write_analytics(&txn, &commit.analytics).await?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(view.into_note_view())
    }
}
