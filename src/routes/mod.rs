pub mod assessments;

pub mod attempts;

pub mod courses;

pub mod grades;

pub mod grading;

pub mod notes;

pub mod resources;

pub mod stats;

pub mod users;

pub use assessments::configure_assessments_routes;
pub use attempts::configure_attempts_routes;
pub use courses::configure_courses_routes;
pub use grades::configure_grades_routes;
pub use grading::configure_grading_routes;
pub use notes::configure_notes_routes;
pub use resources::configure_resources_routes;
pub use stats::configure_stats_routes;
pub use users::configure_user_routes;

use actix_web::web;

// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_user_routes)
        .configure(configure_courses_routes)
        .configure(configure_notes_routes)
        .configure(configure_resources_routes)
        .configure(configure_assessments_routes)
        .configure(configure_attempts_routes)
        .configure(configure_grading_routes)
        .configure(configure_grades_routes)
        .configure(configure_stats_routes);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use super::configure_api_routes;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::memory_storage;
    use crate::utils::{json_error_handler, path_error_handler, query_error_handler};

    macro_rules! app {
        () => {{
            let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
            test::init_service(
                App::new()
                    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                    .app_data(web::PathConfig::default().error_handler(path_error_handler))
                    .app_data(web::Data::new(storage))
                    .configure(configure_api_routes),
            )
            .await
        }};
    }

    async fn body(resp: ServiceResponse) -> Value {
        test::read_body_json(resp).await
    }

    fn user(email: &str, role: &str) -> Value {
        json!({
            "email": email,
            "first_name": "Test",
            "last_name": "User",
            "role": role,
            "student_id": null,
            "department": null,
            "title": null
        })
    }

    #[actix_web::test]
    async fn test_user_routes() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(user("Alice@Example.com", "student"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created = body(resp).await;
        assert_eq!(created["code"], 0);
        assert_eq!(created["data"]["email"], "alice@example.com");
        let id = created["data"]["id"].as_i64().unwrap();

        // 重复邮箱
        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(user("alice@example.com", "tutor"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(user("not-an-email", "student"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/users/{id}"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/v1/users/999").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/api/v1/users?role=student&page=1&size=10")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let list = body(resp).await;
        assert_eq!(list["data"]["pagination"]["total"], 1);

        // 学生创建时带统计行
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/stats/students/{id}"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_huge_page_number_is_capped() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(user("dave@example.com", "student"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::get()
            .uri("/api/v1/users?page=9223372036854775807&size=100")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let list = body(resp).await;
        assert_eq!(list["data"]["pagination"]["page"], 1_000_000);
        assert_eq!(list["data"]["pagination"]["total"], 1);
        assert_eq!(list["data"]["items"].as_array().map(Vec::len), Some(0));
    }

    #[actix_web::test]
    async fn test_malformed_input_uses_envelope() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body(resp).await["code"], 1000);

        let req = test::TestRequest::get().uri("/api/v1/courses/abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body(resp).await["code"], 1000);
    }

    #[actix_web::test]
    async fn test_assessment_lifecycle_over_http() {
        let app = app!();

        let mut ids = Vec::new();
        for (email, role) in [("tutor@example.com", "tutor"), ("bob@example.com", "student")] {
            let req = test::TestRequest::post()
                .uri("/api/v1/users")
                .set_json(user(email, role))
                .to_request();
            let created = body(test::call_service(&app, req).await).await;
            ids.push(created["data"]["id"].as_i64().unwrap());
        }
        let (tutor, student) = (ids[0], ids[1]);

        let req = test::TestRequest::post()
            .uri("/api/v1/courses")
            .set_json(json!({
                "code": "cs101",
                "name": "Intro",
                "description": "Basics",
                "cover_image": null,
                "created_by": tutor,
                "start_date": null,
                "end_date": null
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let course = body(resp).await;
        assert_eq!(course["data"]["code"], "CS101");
        let course_id = course["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/courses/{course_id}/enrollments"))
            .set_json(json!({ "user_id": student }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        // totalPoints 为 0 被拒绝
        let mut assessment = json!({
            "course_id": course_id,
            "title": "Quiz 1",
            "description": null,
            "assessment_type": "quiz",
            "total_points": 0.0,
            "passing_score": 60.0,
            "time_limit": null,
            "max_attempts": 1,
            "available_from": null,
            "available_until": null,
            "created_by": tutor
        });
        let req = test::TestRequest::post()
            .uri("/api/v1/assessments")
            .set_json(&assessment)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        assessment["total_points"] = json!(10.0);
        let req = test::TestRequest::post()
            .uri("/api/v1/assessments")
            .set_json(&assessment)
            .to_request();
        let created = body(test::call_service(&app, req).await).await;
        let assessment_id = created["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/assessments/{assessment_id}/questions"))
            .set_json(json!({
                "prompt": "2 + 2 = 4",
                "explanation": null,
                "points": 10.0,
                "display_order": 1,
                "kind": {
                    "question_type": "true_false",
                    "options": [
                        { "id": "t", "text": "True", "is_correct": true },
                        { "id": "f", "text": "False", "is_correct": false }
                    ]
                }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let question_id = body(resp).await["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::post()
            .uri("/api/v1/attempts")
            .set_json(json!({ "assessment_id": assessment_id, "user_id": student }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let attempt_id = body(resp).await["data"]["attempt_id"].as_i64().unwrap();

        // 超出作答次数
        let req = test::TestRequest::post()
            .uri("/api/v1/attempts")
            .set_json(json!({ "assessment_id": assessment_id, "user_id": student }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(body(resp).await["code"], 5004);

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/attempts/{attempt_id}/responses"))
            .set_json(json!({
                "question_id": question_id,
                "answer": { "type": "selected_option", "option_id": "t" }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body(resp).await["data"]["is_correct"], true);

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/attempts/{attempt_id}/submit"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let submitted = body(resp).await;
        assert_eq!(submitted["data"]["status"], "graded");
        assert_eq!(submitted["data"]["percentage"], 100.0);

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/attempts/{attempt_id}/submit"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/attempts/{attempt_id}/grade"))
            .to_request();
        let grade = body(test::call_service(&app, req).await).await;
        assert_eq!(grade["data"]["letter_grade"], "A");

        let req = test::TestRequest::get()
            .uri(&format!(
                "/api/v1/grades/students/{student}/courses/{course_id}/summary"
            ))
            .to_request();
        let summary = body(test::call_service(&app, req).await).await;
        assert_eq!(summary["data"]["total_grades"], 1);
        assert_eq!(summary["data"]["earned_points"], 10.0);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/assessments/{assessment_id}/stats"))
            .to_request();
        let stats = body(test::call_service(&app, req).await).await;
        assert_eq!(stats["data"]["completed_attempts"], 1);
        assert_eq!(stats["data"]["pass_rate"], 100.0);

        let req = test::TestRequest::get()
            .uri("/api/v1/stats/leaderboard?limit=5")
            .to_request();
        let board = body(test::call_service(&app, req).await).await;
        assert_eq!(board["data"]["items"][0]["user_id"], student);
        assert_eq!(board["data"]["items"][0]["rank"], 1);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/stats/courses/{course_id}"))
            .to_request();
        let analytics = body(test::call_service(&app, req).await).await;
        assert_eq!(analytics["data"]["assessments"]["total_completions"], 1);
    }

    #[actix_web::test]
    async fn test_grading_requires_grader_role() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(user("carol@example.com", "student"))
            .to_request();
        let student = body(test::call_service(&app, req).await).await["data"]["id"]
            .as_i64()
            .unwrap();

        let req = test::TestRequest::post()
            .uri("/api/v1/grading/attempts/1/finalize")
            .set_json(json!({ "feedback": null, "grader_id": student }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/api/v1/grading/pending")
            .to_request();
        let pending = body(test::call_service(&app, req).await).await;
        assert_eq!(pending["data"]["items"].as_array().map(Vec::len), Some(0));
    }

    #[actix_web::test]
    async fn test_resource_routes() {
        let app = app!();

        let mut ids = Vec::new();
        for (email, role) in [("tutor@example.com", "tutor"), ("erin@example.com", "student")] {
            let req = test::TestRequest::post()
                .uri("/api/v1/users")
                .set_json(user(email, role))
                .to_request();
            let created = body(test::call_service(&app, req).await).await;
            ids.push(created["data"]["id"].as_i64().unwrap());
        }
        let (tutor, student) = (ids[0], ids[1]);

        let req = test::TestRequest::post()
            .uri("/api/v1/courses")
            .set_json(json!({
                "code": "cs102",
                "name": "Data",
                "description": "Links",
                "cover_image": null,
                "created_by": tutor,
                "start_date": null,
                "end_date": null
            }))
            .to_request();
        let course_id = body(test::call_service(&app, req).await).await["data"]["id"]
            .as_i64()
            .unwrap();

        let resource = |title: &str, url: &str, category: Option<&str>, by: i64| {
            json!({
                "course_id": course_id,
                "title": title,
                "description": null,
                "resource_type": "link",
                "url": url,
                "category": category,
                "created_by": by,
                "available_from": null,
                "expires_at": null
            })
        };

        // 非法链接与学生创建均被拒绝
        let req = test::TestRequest::post()
            .uri("/api/v1/resources")
            .set_json(resource("Slides", "ftp://example.com/a", None, tutor))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/v1/resources")
            .set_json(resource("Slides", "https://example.com/a", None, student))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let mut resource_ids = Vec::new();
        for (title, category) in [("Slides", Some("lectures")), ("Docs", Some("reading")), ("Misc", None)] {
            let req = test::TestRequest::post()
                .uri("/api/v1/resources")
                .set_json(resource(title, "https://example.com/a", category, tutor))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
            let created = body(resp).await;
            assert_eq!(created["data"]["is_published"], false);
            resource_ids.push(created["data"]["id"].as_i64().unwrap());
        }

        // 未发布的资源对学生列表不可见
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/courses/{course_id}/resources"))
            .to_request();
        let list = body(test::call_service(&app, req).await).await;
        assert_eq!(list["data"]["items"].as_array().map(Vec::len), Some(0));

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/resources/{}/visibility", resource_ids[0]))
            .set_json(json!({ "is_published": true, "is_visible_to_students": true }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/courses/{course_id}/resources?category=lectures"))
            .to_request();
        let list = body(test::call_service(&app, req).await).await;
        assert_eq!(list["data"]["items"][0]["title"], "Slides");

        let req = test::TestRequest::get()
            .uri(&format!(
                "/api/v1/courses/{course_id}/resources?include_unpublished=true&category=reading"
            ))
            .to_request();
        let list = body(test::call_service(&app, req).await).await;
        assert_eq!(list["data"]["items"].as_array().map(Vec::len), Some(1));

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/courses/{course_id}/resource-categories"))
            .to_request();
        let categories = body(test::call_service(&app, req).await).await;
        assert_eq!(categories["data"]["categories"], json!(["lectures", "reading"]));

        // 浏览与下载都计入资源分析
        for action in ["view", "download", "view"] {
            let req = test::TestRequest::post()
                .uri(&format!("/api/v1/resources/{}/access", resource_ids[0]))
                .set_json(json!({ "user_id": student, "action": action }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/stats/courses/{course_id}"))
            .to_request();
        let analytics = body(test::call_service(&app, req).await).await;
        assert_eq!(analytics["data"]["resources"]["total_views"], 3);
        assert_eq!(analytics["data"]["resources"]["items"][0]["unique_viewers"], 1);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/resources/{}", resource_ids[0]))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/resources/{}", resource_ids[0]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(resp).await["code"], 4100);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/stats/courses/{course_id}"))
            .to_request();
        let analytics = body(test::call_service(&app, req).await).await;
        assert_eq!(analytics["data"]["resources"]["total_views"], 0);
    }

    #[actix_web::test]
    async fn test_user_profile_and_deactivation() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(user("frank@example.com", "tutor"))
            .to_request();
        let tutor = body(test::call_service(&app, req).await).await["data"]["id"]
            .as_i64()
            .unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/users/{tutor}"))
            .set_json(json!({ "first_name": "Frank", "department": "Maths" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated = body(resp).await;
        assert_eq!(updated["data"]["first_name"], "Frank");
        assert_eq!(updated["data"]["last_name"], "User");
        assert_eq!(updated["data"]["department"], "Maths");

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/users/{tutor}"))
            .set_json(json!({ "last_name": "  " }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/users/{tutor}/last-login"))
            .to_request();
        let login = body(test::call_service(&app, req).await).await;
        assert!(login["data"]["last_login"].is_string());

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/users/{tutor}/deactivate"))
            .to_request();
        let deactivated = body(test::call_service(&app, req).await).await;
        assert_eq!(deactivated["data"]["is_active"], false);

        // 停用的导师不能评分
        let req = test::TestRequest::post()
            .uri("/api/v1/grading/attempts/1/finalize")
            .set_json(json!({ "feedback": null, "grader_id": tutor }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::post()
            .uri("/api/v1/users/999/deactivate")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
