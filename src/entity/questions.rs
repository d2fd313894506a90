//! 题目实体
//!
//! 题目类型拆分为 `question_type` 及若干可空列存储，选项和文件类型以 JSON 文本保存。

use sea_orm::entity::prelude::*;

use crate::errors::{LmsError, Result as LmsResult};
use crate::models::assessments::entities::{Question, QuestionKind, QuestionOption};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assessment_id: i64,
    pub question_type: String,
    #[sea_orm(column_type = "Text")]
    pub prompt: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub explanation: Option<String>,
    pub points: f64,
    pub display_order: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub options: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub rubric: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub allowed_file_types: Option<String>,
    pub max_file_size: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assessments::Entity",
        from = "Column::AssessmentId",
        to = "super::assessments::Column::Id"
    )]
    Assessment,
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 题目类型对应的列值
#[derive(Debug, Default)]
pub struct KindColumns {
    pub question_type: String,
    pub options: Option<String>,
    pub rubric: Option<String>,
    pub allowed_file_types: Option<String>,
    pub max_file_size: Option<i64>,
}

impl KindColumns {
    pub fn from_kind(kind: &QuestionKind) -> LmsResult<Self> {
        let mut columns = KindColumns {
            question_type: kind.type_name().to_string(),
            ..Default::default()
        };
        match kind {
            QuestionKind::MultipleChoice { options } | QuestionKind::TrueFalse { options } => {
                columns.options = Some(serde_json::to_string(options)?);
            }
            QuestionKind::ShortAnswer { rubric } | QuestionKind::Written { rubric } => {
                columns.rubric = rubric.clone();
            }
            QuestionKind::FileUpload {
                allowed_file_types,
                max_file_size,
            } => {
                columns.allowed_file_types = Some(serde_json::to_string(allowed_file_types)?);
                columns.max_file_size = *max_file_size;
            }
        }
        Ok(columns)
    }
}

impl Model {
    fn kind(&self) -> LmsResult<QuestionKind> {
        let parse_options = |raw: &Option<String>| -> LmsResult<Vec<QuestionOption>> {
            match raw {
                Some(json) => Ok(serde_json::from_str(json)?),
                None => Ok(Vec::new()),
            }
        };

        let kind = match self.question_type.as_str() {
            QuestionKind::MULTIPLE_CHOICE => QuestionKind::MultipleChoice {
                options: parse_options(&self.options)?,
            },
            QuestionKind::TRUE_FALSE => QuestionKind::TrueFalse {
                options: parse_options(&self.options)?,
            },
            QuestionKind::SHORT_ANSWER => QuestionKind::ShortAnswer {
                rubric: self.rubric.clone(),
            },
            QuestionKind::WRITTEN => QuestionKind::Written {
                rubric: self.rubric.clone(),
            },
            QuestionKind::FILE_UPLOAD => QuestionKind::FileUpload {
                allowed_file_types: match &self.allowed_file_types {
                    Some(json) => serde_json::from_str(json)?,
                    None => Vec::new(),
                },
                max_file_size: self.max_file_size,
            },
            other => {
                return Err(LmsError::serialization(format!(
                    "未知的题目类型: {other}"
                )));
            }
        };
        Ok(kind)
    }

    pub fn into_question(self) -> LmsResult<Question> {
        use super::to_datetime;

        let kind = self.kind()?;
        Ok(Question {
            id: self.id,
            assessment_id: self.assessment_id,
            prompt: self.prompt,
            explanation: self.explanation,
            points: self.points,
            display_order: self.display_order,
            kind,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_from(columns: KindColumns) -> Model {
        Model {
            id: 1,
            assessment_id: 1,
            question_type: columns.question_type,
            prompt: "2 + 2 = ?".to_string(),
            explanation: None,
            points: 5.0,
            display_order: 1,
            options: columns.options,
            rubric: columns.rubric,
            allowed_file_types: columns.allowed_file_types,
            max_file_size: columns.max_file_size,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_choice_kind_survives_columns() {
        let kind = QuestionKind::MultipleChoice {
            options: vec![
                QuestionOption {
                    id: "a".into(),
                    text: "3".into(),
                    is_correct: false,
                },
                QuestionOption {
                    id: "b".into(),
                    text: "4".into(),
                    is_correct: true,
                },
            ],
        };
        let question = model_from(KindColumns::from_kind(&kind).unwrap())
            .into_question()
            .unwrap();
        assert_eq!(question.kind, kind);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let mut model = model_from(KindColumns::default());
        model.question_type = "essay".into();
        assert!(matches!(
            model.into_question(),
            Err(LmsError::Serialization(_))
        ));
    }
}
