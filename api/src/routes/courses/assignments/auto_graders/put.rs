use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::non_container_question::Model as QuestionModel;
use validator::Validate;

use super::common::{AutoGraderRequest, AutoGraderResponse, ensure_assignment};
use crate::response::ApiResponse;
use crate::routes::common::{db_error, not_found, validation_error};
use crate::state::AppState;

/// PUT /api/courses/{course_id}/assignments/{assignment_id}/non-container-auto-graders/{question_id}
///
/// Replaces a question. Same body as `POST`.
pub async fn edit_auto_grader(
    State(app_state): State<AppState>,
    Path((course_id, assignment_id, question_id)): Path<(i64, i64, i64)>,
    Json(req): Json<AutoGraderRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return validation_error(&errors);
    }

    let db = app_state.db();
    if let Err(resp) = ensure_assignment(db, course_id, assignment_id).await {
        return resp;
    }

    match QuestionModel::edit(
        db,
        assignment_id,
        question_id,
        &req.question,
        req.score,
        &req.correct_string,
        req.is_regex,
    )
    .await
    {
        Ok(Some(question)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                AutoGraderResponse::from(question),
                "Auto-grader updated successfully",
            )),
        )
            .into_response(),
        Ok(None) => not_found("Auto-grader not found"),
        Err(e) => db_error("failed to update auto-grader", e),
    }
}
