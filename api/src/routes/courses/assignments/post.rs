use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::{assignment::Model as AssignmentModel, course};
use sea_orm::EntityTrait;
use validator::Validate;

use super::common::{AssignmentRequest, AssignmentResponse};
use crate::response::ApiResponse;
use crate::routes::common::{db_error, not_found, validation_error};
use crate::state::AppState;

/// POST /api/courses/{course_id}/assignments
///
/// Creates an assignment. Guarded by `assignmentEditAll`.
///
/// ### Request Body
/// ```json
/// {
///   "name": "Assignment 1",
///   "description": "Linked lists",
///   "start_date": "2025-02-01T00:00:00Z",
///   "due_date": "2025-02-14T23:59:59Z"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the new assignment
/// - `400 Bad Request` if validation fails
/// - `404 Not Found` if the course does not exist
pub async fn create_assignment(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(req): Json<AssignmentRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return validation_error(&errors);
    }

    let db = app_state.db();
    match course::Entity::find_by_id(course_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found(format!("Course {course_id} not found")),
        Err(e) => return db_error("failed to check course", e),
    }

    match AssignmentModel::create(
        db,
        course_id,
        &req.name,
        req.description.as_deref(),
        req.start_date,
        req.due_date,
    )
    .await
    {
        Ok(assignment) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                AssignmentResponse::from(assignment),
                "Assignment created successfully",
            )),
        )
            .into_response(),
        Err(e) => db_error("failed to create assignment", e),
    }
}
