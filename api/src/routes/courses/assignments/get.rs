use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use db::models::assignment::Model as AssignmentModel;

use super::common::AssignmentResponse;
use crate::response::ApiResponse;
use crate::routes::common::{db_error, not_found};
use crate::state::AppState;

/// GET /api/courses/{course_id}/assignments
///
/// Lists every assignment of the course, including unreleased ones.
/// Guarded by `assignmentViewAll`.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "message": "Assignments retrieved successfully",
///   "data": [
///     {
///       "id": 1,
///       "course_id": 3,
///       "name": "Assignment 1",
///       "description": null,
///       "start_date": "2025-01-01T00:00:00+00:00",
///       "due_date": "2025-01-31T23:59:59+00:00",
///       "created_at": "2025-01-01T00:00:00+00:00",
///       "updated_at": "2025-01-01T00:00:00+00:00"
///     }
///   ]
/// }
/// ```
pub async fn get_assignments(State(app_state): State<AppState>, Path(course_id): Path<i64>) -> Response {
    match AssignmentModel::list_for_course(app_state.db(), course_id).await {
        Ok(assignments) => {
            let data: Vec<AssignmentResponse> = assignments.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Assignments retrieved successfully")),
            )
                .into_response()
        }
        Err(e) => db_error("failed to list assignments", e),
    }
}

/// GET /api/courses/{course_id}/assignments/released
///
/// Lists assignments whose start date is at or before the current time.
/// Guarded by `assignmentViewReleased`.
pub async fn get_released_assignments(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Response {
    match AssignmentModel::list_released(app_state.db(), course_id, Utc::now()).await {
        Ok(assignments) => {
            let data: Vec<AssignmentResponse> = assignments.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Released assignments retrieved successfully")),
            )
                .into_response()
        }
        Err(e) => db_error("failed to list released assignments", e),
    }
}

/// GET /api/courses/{course_id}/assignments/{assignment_id}
///
/// Guarded by the release gate: staff always, students once released.
///
/// ### Responses
/// - `200 OK` with the assignment
/// - `404 Not Found` if the assignment is not part of the course
pub async fn get_assignment(
    State(app_state): State<AppState>,
    Path((course_id, assignment_id)): Path<(i64, i64)>,
) -> Response {
    match AssignmentModel::find_in_course(app_state.db(), course_id, assignment_id).await {
        Ok(Some(assignment)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                AssignmentResponse::from(assignment),
                "Assignment retrieved successfully",
            )),
        )
            .into_response(),
        Ok(None) => not_found("Assignment not found"),
        Err(e) => db_error("failed to fetch assignment", e),
    }
}
