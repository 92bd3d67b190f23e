use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::non_container_question::Model as QuestionModel;

use super::common::ensure_assignment;
use crate::response::{ApiResponse, Empty};
use crate::routes::common::{db_error, not_found};
use crate::state::AppState;

/// DELETE /api/courses/{course_id}/assignments/{assignment_id}/non-container-auto-graders/{question_id}
pub async fn delete_auto_grader(
    State(app_state): State<AppState>,
    Path((course_id, assignment_id, question_id)): Path<(i64, i64, i64)>,
) -> Response {
    let db = app_state.db();
    if let Err(resp) = ensure_assignment(db, course_id, assignment_id).await {
        return resp;
    }

    match QuestionModel::delete_in_assignment(db, assignment_id, question_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty::default(), "Auto-grader deleted successfully")),
        )
            .into_response(),
        Ok(false) => not_found("Auto-grader not found"),
        Err(e) => db_error("failed to delete auto-grader", e),
    }
}
