#[cfg(test)]
mod tests {
    use api::auth::error::ConfigurationError;
    use api::auth::guards::PermissionGate;
    use api::auth::permissions::{PermissionDefinition, PermissionTable};
    use api::state::AppState;
    use axum::http::StatusCode;
    use chrono::{Duration, Utc};
    use db::{
        models::{
            assignment::Model as AssignmentModel,
            course::Model as CourseModel,
            user::Model as UserModel,
            user_course_role::{Model as UserCourseRoleModel, Role},
        },
        test_utils::setup_test_db,
    };
    use sea_orm::DatabaseConnection;
    use tower::ServiceExt;

    use crate::helpers::{body_json, get, init_env, make_app, make_app_with, token_for};

    struct TestData {
        instructor: UserModel,
        ta: UserModel,
        student: UserModel,
        outsider: UserModel,
        admin: UserModel,
        course: CourseModel,
        other_course: CourseModel,
        released: AssignmentModel,
        unreleased: AssignmentModel,
        foreign: AssignmentModel,
    }

    async fn setup(db: &DatabaseConnection) -> TestData {
        init_env();
        let course = CourseModel::create(db, "Data Structures", "COS212", "2025S1").await.unwrap();
        let other_course = CourseModel::create(db, "Networks", "COS332", "2025S1").await.unwrap();

        let instructor = UserModel::create(db, "instructor", "instructor@test.com", false).await.unwrap();
        let ta = UserModel::create(db, "ta", "ta@test.com", false).await.unwrap();
        let student = UserModel::create(db, "student", "student@test.com", false).await.unwrap();
        let outsider = UserModel::create(db, "outsider", "outsider@test.com", false).await.unwrap();
        let admin = UserModel::create(db, "admin", "admin@test.com", true).await.unwrap();

        UserCourseRoleModel::assign(db, instructor.id, course.id, Role::Instructor).await.unwrap();
        UserCourseRoleModel::assign(db, ta.id, course.id, Role::Ta).await.unwrap();
        UserCourseRoleModel::assign(db, student.id, course.id, Role::Student).await.unwrap();
        UserCourseRoleModel::assign(db, outsider.id, other_course.id, Role::Student).await.unwrap();

        let now = Utc::now();
        let released = AssignmentModel::create(
            db,
            course.id,
            "Released",
            None,
            now - Duration::days(1),
            now + Duration::days(6),
        )
        .await
        .unwrap();
        let unreleased = AssignmentModel::create(
            db,
            course.id,
            "Unreleased",
            Some("Not yet"),
            now + Duration::days(1),
            now + Duration::days(8),
        )
        .await
        .unwrap();
        let foreign = AssignmentModel::create(
            db,
            other_course.id,
            "Foreign",
            None,
            now - Duration::days(1),
            now + Duration::days(6),
        )
        .await
        .unwrap();

        TestData {
            instructor,
            ta,
            student,
            outsider,
            admin,
            course,
            other_course,
            released,
            unreleased,
            foreign,
        }
    }

    fn list_uri(course_id: i64) -> String {
        format!("/api/courses/{course_id}/assignments")
    }

    fn item_uri(course_id: i64, assignment_id: i64) -> String {
        format!("/api/courses/{course_id}/assignments/{assignment_id}")
    }

    async fn expect_denied(response: axum::response::Response, status: StatusCode, reason: &str) {
        assert_eq!(response.status(), status);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["data"]["reason"], reason);
    }

    // --- Static permission gate ---

    #[tokio::test]
    async fn instructor_can_list_all_assignments() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let token = token_for(&data.instructor);
        let response = app.oneshot(get(&list_uri(data.course.id), Some(&token))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn student_cannot_list_all_assignments() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let token = token_for(&data.student);
        let response = app.oneshot(get(&list_uri(data.course.id), Some(&token))).await.unwrap();

        expect_denied(response, StatusCode::FORBIDDEN, "permission_denied").await;
    }

    #[tokio::test]
    async fn missing_token_is_unauthenticated() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let response = app.oneshot(get(&list_uri(data.course.id), None)).await.unwrap();

        expect_denied(response, StatusCode::UNAUTHORIZED, "unauthenticated").await;
    }

    #[tokio::test]
    async fn garbage_token_is_unauthenticated() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let response = app
            .oneshot(get(&item_uri(data.course.id, data.released.id), Some("not-a-jwt")))
            .await
            .unwrap();

        expect_denied(response, StatusCode::UNAUTHORIZED, "unauthenticated").await;
    }

    #[tokio::test]
    async fn user_from_other_course_is_not_enrolled() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let token = token_for(&data.outsider);
        let response = app
            .oneshot(get(&format!("{}/released", list_uri(data.course.id)), Some(&token)))
            .await
            .unwrap();

        expect_denied(response, StatusCode::FORBIDDEN, "not_enrolled").await;
    }

    #[tokio::test]
    async fn global_admin_passes_without_enrolment() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let token = token_for(&data.admin);
        let response = app.oneshot(get(&list_uri(data.course.id), Some(&token))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn super_user_passes_without_enrolment() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app_with(db, PermissionTable::builtin().unwrap(), vec![data.outsider.id]);

        let token = token_for(&data.outsider);
        let response = app
            .oneshot(get(&item_uri(data.course.id, data.unreleased.id), Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_course_id_is_bad_request() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let token = token_for(&data.instructor);
        let response = app
            .oneshot(get("/api/courses/abc/assignments", Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_path_without_token_is_unauthenticated() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let response = app
            .clone()
            .oneshot(get("/api/courses/abc/assignments", None))
            .await
            .unwrap();
        expect_denied(response, StatusCode::UNAUTHORIZED, "unauthenticated").await;

        let response = app
            .oneshot(get(&format!("{}/first", list_uri(data.course.id)), None))
            .await
            .unwrap();
        expect_denied(response, StatusCode::UNAUTHORIZED, "unauthenticated").await;
    }

    // --- State-gated assignment access ---

    #[tokio::test]
    async fn student_sees_released_assignment() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let token = token_for(&data.student);
        let response = app
            .oneshot(get(&item_uri(data.course.id, data.released.id), Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["id"], data.released.id);
    }

    #[tokio::test]
    async fn student_blocked_from_unreleased_assignment() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let token = token_for(&data.student);
        let response = app
            .oneshot(get(&item_uri(data.course.id, data.unreleased.id), Some(&token)))
            .await
            .unwrap();

        expect_denied(response, StatusCode::FORBIDDEN, "state_gate_denied").await;
    }

    #[tokio::test]
    async fn ta_sees_unreleased_assignment() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let token = token_for(&data.ta);
        let response = app
            .oneshot(get(&item_uri(data.course.id, data.unreleased.id), Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn assignment_from_other_course_is_not_found() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let token = token_for(&data.instructor);
        let response = app
            .oneshot(get(&item_uri(data.course.id, data.foreign.id), Some(&token)))
            .await
            .unwrap();

        expect_denied(response, StatusCode::NOT_FOUND, "resource_not_found").await;
        assert_ne!(data.foreign.course_id, data.course.id);
        assert_eq!(data.foreign.course_id, data.other_course.id);
    }

    #[tokio::test]
    async fn unknown_assignment_is_not_found() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let token = token_for(&data.student);
        let response = app
            .oneshot(get(&item_uri(data.course.id, 9999), Some(&token)))
            .await
            .unwrap();

        expect_denied(response, StatusCode::NOT_FOUND, "resource_not_found").await;
    }

    #[tokio::test]
    async fn not_enrolled_wins_over_not_found() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let token = token_for(&data.outsider);
        let response = app
            .oneshot(get(&item_uri(data.course.id, 9999), Some(&token)))
            .await
            .unwrap();

        expect_denied(response, StatusCode::FORBIDDEN, "not_enrolled").await;
    }

    #[tokio::test]
    async fn malformed_assignment_id_is_bad_request() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let app = make_app(db);

        let token = token_for(&data.student);
        let response = app
            .oneshot(get(&format!("{}/first", list_uri(data.course.id)), Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // --- Configured tables ---

    #[tokio::test]
    async fn custom_table_changes_elevated_standing() {
        let db = setup_test_db().await;
        let data = setup(&db).await;
        let table = PermissionTable::load(&[
            PermissionDefinition::new("assignmentViewAll", &["instructor", "admin"]),
            PermissionDefinition::new("assignmentViewReleased", &["student", "ta", "instructor", "admin"]),
            PermissionDefinition::new("assignmentEditAll", &["instructor", "admin"]),
        ])
        .unwrap();
        let app = make_app_with(db, table, Vec::new());

        let token = token_for(&data.ta);
        let response = app
            .oneshot(get(&item_uri(data.course.id, data.unreleased.id), Some(&token)))
            .await
            .unwrap();

        expect_denied(response, StatusCode::FORBIDDEN, "state_gate_denied").await;
    }

    #[tokio::test]
    async fn unknown_route_permission_is_a_configuration_error() {
        init_env();
        let db = setup_test_db().await;
        let state = AppState::with_table(db, PermissionTable::builtin().unwrap(), Vec::new());

        let err = PermissionGate::new(&state, "assignmentPublishAll").err().unwrap();
        assert!(matches!(err, ConfigurationError::UnknownPermission(code) if code == "assignmentPublishAll"));

        let gate = PermissionGate::new(&state, "assignmentViewAll").unwrap();
        assert_eq!(gate.permission().to_string(), "assignmentViewAll");
    }
}
