use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::assignment::Model as AssignmentModel;
use validator::Validate;

use super::common::{AssignmentRequest, AssignmentResponse};
use crate::response::ApiResponse;
use crate::routes::common::{db_error, not_found, validation_error};
use crate::state::AppState;

/// PUT /api/courses/{course_id}/assignments/{assignment_id}
///
/// Replaces the editable fields of an assignment. Guarded by `assignmentEditAll`.
/// Takes the same body as `POST`.
pub async fn edit_assignment(
    State(app_state): State<AppState>,
    Path((course_id, assignment_id)): Path<(i64, i64)>,
    Json(req): Json<AssignmentRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return validation_error(&errors);
    }

    match AssignmentModel::edit(
        app_state.db(),
        course_id,
        assignment_id,
        &req.name,
        req.description.as_deref(),
        req.start_date,
        req.due_date,
    )
    .await
    {
        Ok(Some(assignment)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                AssignmentResponse::from(assignment),
                "Assignment updated successfully",
            )),
        )
            .into_response(),
        Ok(None) => not_found("Assignment not found"),
        Err(e) => db_error("failed to update assignment", e),
    }
}
