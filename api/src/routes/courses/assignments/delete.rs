use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::assignment::Model as AssignmentModel;

use crate::response::{ApiResponse, Empty};
use crate::routes::common::{db_error, not_found};
use crate::state::AppState;

/// DELETE /api/courses/{course_id}/assignments/{assignment_id}
///
/// Deletes the assignment and, by cascade, its auto-grader questions.
pub async fn delete_assignment(
    State(app_state): State<AppState>,
    Path((course_id, assignment_id)): Path<(i64, i64)>,
) -> Response {
    match AssignmentModel::delete_in_course(app_state.db(), course_id, assignment_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Empty::default(),
                format!("Assignment {assignment_id} deleted successfully"),
            )),
        )
            .into_response(),
        Ok(false) => not_found(format!(
            "No assignment with ID {assignment_id} in course {course_id}"
        )),
        Err(e) => db_error("failed to delete assignment", e),
    }
}
