#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use chrono::{Duration, Utc};
    use db::{
        models::{
            assignment::Model as AssignmentModel,
            course::Model as CourseModel,
            non_container_question::Model as QuestionModel,
            user::Model as UserModel,
            user_course_role::{Model as UserCourseRoleModel, Role},
        },
        test_utils::setup_test_db,
    };
    use sea_orm::DatabaseConnection;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::helpers::{body_json, get, init_env, make_app, send_json, token_for};

    struct TestData {
        instructor: UserModel,
        ta: UserModel,
        student: UserModel,
        course: CourseModel,
        assignment: AssignmentModel,
        other_assignment: AssignmentModel,
        question: QuestionModel,
    }

    async fn setup(db: &DatabaseConnection) -> TestData {
        init_env();
        let course = CourseModel::create(db, "Algorithms", "COS314", "2025S1").await.unwrap();
        let other_course = CourseModel::create(db, "Compilers", "COS341", "2025S1").await.unwrap();
        let instructor = UserModel::create(db, "inst", "inst@test.com", false).await.unwrap();
        let ta = UserModel::create(db, "assistant", "assistant@test.com", false).await.unwrap();
        let student = UserModel::create(db, "learner", "learner@test.com", false).await.unwrap();

        UserCourseRoleModel::assign(db, instructor.id, course.id, Role::Instructor).await.unwrap();
        UserCourseRoleModel::assign(db, ta.id, course.id, Role::Ta).await.unwrap();
        UserCourseRoleModel::assign(db, student.id, course.id, Role::Student).await.unwrap();

        let now = Utc::now();
        let assignment = AssignmentModel::create(
            db,
            course.id,
            "Quiz 1",
            None,
            now - Duration::days(1),
            now + Duration::days(1),
        )
        .await
        .unwrap();
        let other_assignment = AssignmentModel::create(
            db,
            other_course.id,
            "Quiz X",
            None,
            now - Duration::days(1),
            now + Duration::days(1),
        )
        .await
        .unwrap();
        let question = QuestionModel::create(db, assignment.id, "2 + 2?", 1.0, "4", false)
            .await
            .unwrap();

        TestData {
            instructor,
            ta,
            student,
            course,
            assignment,
            other_assignment,
            question,
        }
    }

    fn base(course_id: i64, assignment_id: i64) -> String {
        format!("/api/courses/{course_id}/assignments/{assignment_id}/non-container-auto-graders")
    }

    #[tokio::test]
    async fn ta_lists_questions_with_answers() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let token = token_for(&data.ta);
        let response = app
            .oneshot(get(&base(data.course.id, data.assignment.id), Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"][0]["correct_string"], "4");
    }

    #[tokio::test]
    async fn student_cannot_view_questions_even_when_released() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let token = token_for(&data.student);
        let uri = format!("{}/{}", base(data.course.id, data.assignment.id), data.question.id);
        let response = app.oneshot(get(&uri, Some(&token))).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = body_json(response).await;
        assert_eq!(json["data"]["reason"], "permission_denied");
    }

    #[tokio::test]
    async fn assignment_outside_course_is_not_found() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let token = token_for(&data.instructor);
        let response = app
            .oneshot(get(&base(data.course.id, data.other_assignment.id), Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn instructor_creates_regex_question() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db.clone());

        let token = token_for(&data.instructor);
        let payload = json!({
            "question": "Name a prime below 10",
            "score": 2.5,
            "correct_string": "^(2|3|5|7)$",
            "is_regex": true
        });
        let req = send_json(
            "POST",
            &base(data.course.id, data.assignment.id),
            Some(&token),
            Some(payload),
        );
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["data"]["is_regex"], true);

        let stored = QuestionModel::list_for_assignment(&db, data.assignment.id).await.unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[tokio::test]
    async fn invalid_regex_is_rejected() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let token = token_for(&data.instructor);
        let payload = json!({
            "question": "Broken",
            "score": 1,
            "correct_string": "([a-z",
            "is_regex": true
        });
        let req = send_json(
            "POST",
            &base(data.course.id, data.assignment.id),
            Some(&token),
            Some(payload),
        );
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn ta_cannot_edit_question() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let token = token_for(&data.ta);
        let uri = format!("{}/{}", base(data.course.id, data.assignment.id), data.question.id);
        let payload = json!({ "question": "2 + 2?", "score": 1, "correct_string": "5" });
        let response = app
            .oneshot(send_json("PUT", &uri, Some(&token), Some(payload)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn instructor_edits_and_deletes_question() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db.clone());

        let token = token_for(&data.instructor);
        let uri = format!("{}/{}", base(data.course.id, data.assignment.id), data.question.id);
        let payload = json!({ "question": "2 + 2 = ?", "score": 3, "correct_string": "four" });
        let response = app
            .clone()
            .oneshot(send_json("PUT", &uri, Some(&token), Some(payload)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["correct_string"], "four");

        let response = app
            .oneshot(send_json("DELETE", &uri, Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let remaining = QuestionModel::list_for_assignment(&db, data.assignment.id).await.unwrap();
        assert!(remaining.is_empty());
    }
}
