use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::assessments::entities::QuestionKind;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("Invalid url regex"));

static COURSE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{2,32}$").expect("Invalid course code regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_course_code(code: &str) -> Result<(), &'static str> {
    // 课程代码：2-32 位字母、数字、下划线或连字符
    if !COURSE_CODE_RE.is_match(code) {
        return Err("Course code must be 2-32 letters, digits, underscores or hyphens");
    }
    Ok(())
}

// 资源链接只接受 http(s)
pub fn validate_url(url: &str) -> Result<(), &'static str> {
    if !URL_RE.is_match(url) {
        return Err("Resource url must start with http:// or https://");
    }
    Ok(())
}

/// 测评的数值与时间窗口规则
///
/// 创建与更新共用；更新时只校验合并后的最终值。
#[derive(Debug, Clone, Copy)]
pub struct AssessmentRules {
    pub total_points: f64,
    pub passing_score: Option<f64>,
    pub max_attempts: Option<i32>,
    pub time_limit: Option<i32>,
    pub available_from: Option<chrono::DateTime<chrono::Utc>>,
    pub available_until: Option<chrono::DateTime<chrono::Utc>>,
}

pub fn validate_assessment(rules: &AssessmentRules) -> Result<(), String> {
    if !rules.total_points.is_finite() || rules.total_points <= 0.0 {
        return Err(format!(
            "总分必须大于 0，当前为 {}",
            rules.total_points
        ));
    }
    if let Some(score) = rules.passing_score
        && !(0.0..=100.0).contains(&score)
    {
        return Err(format!("及格线 {score} 超出范围 [0, 100]"));
    }
    if let Some(max) = rules.max_attempts
        && max < 1
    {
        return Err(format!("最大作答次数至少为 1，当前为 {max}"));
    }
    if let Some(limit) = rules.time_limit
        && limit < 1
    {
        return Err(format!("时间限制至少为 1 分钟，当前为 {limit}"));
    }
    if let (Some(from), Some(until)) = (rules.available_from, rules.available_until)
        && from > until
    {
        return Err("开放时间不能晚于截止时间".to_string());
    }
    Ok(())
}

pub fn validate_question(points: f64, kind: &QuestionKind) -> Result<(), String> {
    if !points.is_finite() || points < 0.0 {
        return Err(format!("题目分值不能为负数，当前为 {points}"));
    }

    if let Some(options) = kind.options() {
        if options.is_empty() {
            return Err(format!("{} 题目必须提供选项", kind.type_name()));
        }
        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = options.iter().find(|o| !seen.insert(o.id.as_str())) {
            return Err(format!("选项 id '{}' 重复", dup.id));
        }
        if !options.iter().any(|o| o.is_correct) {
            return Err(format!("{} 题目至少需要一个正确选项", kind.type_name()));
        }
    }

    if let QuestionKind::FileUpload {
        max_file_size: Some(size),
        ..
    } = kind
        && *size <= 0
    {
        return Err(format!("文件大小上限必须大于 0，当前为 {size}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessments::entities::QuestionOption;

    fn rules() -> AssessmentRules {
        AssessmentRules {
            total_points: 100.0,
            passing_score: Some(70.0),
            max_attempts: Some(3),
            time_limit: None,
            available_from: None,
            available_until: None,
        }
    }

    fn option(id: &str, is_correct: bool) -> QuestionOption {
        QuestionOption {
            id: id.to_string(),
            text: id.to_uppercase(),
            is_correct,
        }
    }

    #[test]
    fn test_email() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("alice.example.com").is_err());
        assert!(validate_email("alice@example").is_err());
    }

    #[test]
    fn test_course_code() {
        assert!(validate_course_code("CS-101").is_ok());
        assert!(validate_course_code("C").is_err());
        assert!(validate_course_code("CS 101").is_err());
    }

    #[test]
    fn test_url() {
        assert!(validate_url("https://example.com/slides.pdf").is_ok());
        assert!(validate_url("http://video.example.com/watch?v=1").is_ok());
        assert!(validate_url("ftp://example.com/file").is_err());
        assert!(validate_url("https://").is_err());
        assert!(validate_url("https://exa mple.com").is_err());
    }

    #[test]
    fn test_assessment_rules() {
        assert!(validate_assessment(&rules()).is_ok());
        assert!(validate_assessment(&AssessmentRules { total_points: 0.0, ..rules() }).is_err());
        assert!(
            validate_assessment(&AssessmentRules { passing_score: Some(101.0), ..rules() }).is_err()
        );
        assert!(validate_assessment(&AssessmentRules { max_attempts: Some(0), ..rules() }).is_err());

        let now = chrono::Utc::now();
        let window = AssessmentRules {
            available_from: Some(now),
            available_until: Some(now - chrono::Duration::hours(1)),
            ..rules()
        };
        assert!(validate_assessment(&window).is_err());
    }

    #[test]
    fn test_question_rules() {
        let choice = QuestionKind::MultipleChoice {
            options: vec![option("a", false), option("b", true)],
        };
        assert!(validate_question(5.0, &choice).is_ok());
        assert!(validate_question(-1.0, &choice).is_err());

        let empty = QuestionKind::TrueFalse { options: vec![] };
        assert!(validate_question(1.0, &empty).is_err());

        let dup = QuestionKind::MultipleChoice {
            options: vec![option("a", true), option("a", false)],
        };
        assert!(validate_question(1.0, &dup).is_err());

        let written = QuestionKind::Written { rubric: None };
        assert!(validate_question(0.0, &written).is_ok());
    }
}
