//! 评分计算
//!
//! 纯函数，不访问存储。

use crate::models::assessments::entities::{Question, QuestionKind, QuestionOption};
use crate::models::attempts::entities::{AnswerPayload, QuestionResponse};

/// 可自动评分的题目能力
pub trait AutoGradable {
    /// 所选选项是否正确，未匹配到选项视为错误
    fn is_correct(&self, selected_option_id: &str) -> bool;
}

impl AutoGradable for Vec<QuestionOption> {
    fn is_correct(&self, selected_option_id: &str) -> bool {
        self.iter()
            .find(|option| option.id == selected_option_id)
            .is_some_and(|option| option.is_correct)
    }
}

impl QuestionKind {
    /// 选择类题目返回自动评分器，其余类型需要人工评分
    pub fn auto_grader(&self) -> Option<&dyn AutoGradable> {
        match self {
            QuestionKind::MultipleChoice { options } | QuestionKind::TrueFalse { options } => {
                Some(options as &dyn AutoGradable)
            }
            QuestionKind::ShortAnswer { .. }
            | QuestionKind::Written { .. }
            | QuestionKind::FileUpload { .. } => None,
        }
    }
}

/// 单题评分结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseScore {
    pub is_auto_graded: bool,
    pub is_correct: Option<bool>,
    pub points_awarded: Option<f64>,
}

impl ResponseScore {
    const MANUAL: ResponseScore = ResponseScore {
        is_auto_graded: false,
        is_correct: None,
        points_awarded: None,
    };
}

/// 提交答案时立即评分
///
/// 仅当题目可自动评分且答案为所选选项时给分，否则留待人工评分。
pub fn score_response(question: &Question, answer: &AnswerPayload) -> ResponseScore {
    let (Some(grader), Some(option_id)) = (question.kind.auto_grader(), answer.selected_option())
    else {
        return ResponseScore::MANUAL;
    };

    let correct = grader.is_correct(option_id);
    ResponseScore {
        is_auto_graded: true,
        is_correct: Some(correct),
        points_awarded: Some(if correct { question.points } else { 0.0 }),
    }
}

/// 是否存在需要人工评分的作答
pub fn needs_manual_grading(responses: &[QuestionResponse]) -> bool {
    responses.iter().any(|r| !r.is_auto_graded)
}

/// 汇总得分，返回 (总分, 未评分题数)
pub fn sum_points(responses: &[QuestionResponse]) -> (f64, usize) {
    responses
        .iter()
        .fold((0.0, 0), |(total, ungraded), r| match r.points_awarded {
            Some(points) => (total + points, ungraded),
            None => (total, ungraded + 1),
        })
}

/// 得分率，总分非正时为 0
pub fn percentage(score: f64, total_points: f64) -> f64 {
    if total_points <= 0.0 {
        return 0.0;
    }
    score / total_points * 100.0
}

/// 未设置及格线时视为通过
pub fn is_passed(percentage: f64, passing_score: Option<f64>) -> bool {
    passing_score.is_none_or(|threshold| percentage >= threshold)
}

pub fn letter_grade(percentage: f64) -> &'static str {
    match percentage {
        p if p >= 90.0 => "A",
        p if p >= 80.0 => "B",
        p if p >= 70.0 => "C",
        p if p >= 60.0 => "D",
        _ => "F",
    }
}

/// 增量平均：(旧均值 * 旧数量 + 新值) / (旧数量 + 1)
pub fn incremental_mean(old_mean: f64, old_count: i64, value: f64) -> f64 {
    let count = old_count.max(0) as f64;
    (old_mean * count + value) / (count + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn option(id: &str, is_correct: bool) -> QuestionOption {
        QuestionOption {
            id: id.to_string(),
            text: id.to_uppercase(),
            is_correct,
        }
    }

    fn question(kind: QuestionKind, points: f64) -> Question {
        Question {
            id: 1,
            assessment_id: 1,
            prompt: "prompt".into(),
            explanation: None,
            points,
            display_order: 1,
            kind,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn selected(id: &str) -> AnswerPayload {
        AnswerPayload::SelectedOption {
            option_id: id.to_string(),
        }
    }

    #[test]
    fn test_correct_choice_earns_full_points() {
        let q = question(
            QuestionKind::MultipleChoice {
                options: vec![option("a", false), option("b", true)],
            },
            4.0,
        );
        let score = score_response(&q, &selected("b"));
        assert!(score.is_auto_graded);
        assert_eq!(score.is_correct, Some(true));
        assert_eq!(score.points_awarded, Some(4.0));
    }

    #[test]
    fn test_unmatched_option_is_incorrect() {
        let q = question(
            QuestionKind::TrueFalse {
                options: vec![option("true", true), option("false", false)],
            },
            2.0,
        );
        let score = score_response(&q, &selected("maybe"));
        assert!(score.is_auto_graded);
        assert_eq!(score.is_correct, Some(false));
        assert_eq!(score.points_awarded, Some(0.0));
    }

    #[test]
    fn test_written_and_text_answers_need_manual_grading() {
        let written = question(QuestionKind::Written { rubric: None }, 10.0);
        let text = AnswerPayload::Text {
            text: "essay".into(),
        };
        assert_eq!(score_response(&written, &text), ResponseScore::MANUAL);

        // 选择题但未给出选项也走人工评分
        let choice = question(
            QuestionKind::MultipleChoice {
                options: vec![option("a", true)],
            },
            1.0,
        );
        assert!(!score_response(&choice, &text).is_auto_graded);
    }

    #[test]
    fn test_percentage_and_pass() {
        assert_eq!(percentage(65.0, 100.0), 65.0);
        assert_eq!(percentage(5.0, 0.0), 0.0);
        assert!(is_passed(65.0, None));
        assert!(!is_passed(65.0, Some(70.0)));
        assert!(is_passed(70.0, Some(70.0)));
    }

    #[test]
    fn test_letter_grades() {
        assert_eq!(letter_grade(95.0), "A");
        assert_eq!(letter_grade(90.0), "A");
        assert_eq!(letter_grade(89.9), "B");
        assert_eq!(letter_grade(70.0), "C");
        assert_eq!(letter_grade(60.0), "D");
        assert_eq!(letter_grade(12.0), "F");
    }

    #[test]
    fn test_incremental_mean_matches_arithmetic_mean() {
        let scores = [80.0, 65.0, 100.0, 42.5];
        let mut mean = 0.0;
        for (i, s) in scores.iter().enumerate() {
            mean = incremental_mean(mean, i as i64, *s);
        }
        let expected = scores.iter().sum::<f64>() / scores.len() as f64;
        assert!((mean - expected).abs() < 1e-9);
    }
}
