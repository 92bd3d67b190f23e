use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::non_container_question::Model as QuestionModel;

use super::common::{AutoGraderResponse, ensure_assignment};
use crate::response::ApiResponse;
use crate::routes::common::{db_error, not_found};
use crate::state::AppState;

/// GET /api/courses/{course_id}/assignments/{assignment_id}/non-container-auto-graders
///
/// Lists the auto-grader questions of an assignment, answers included.
/// Guarded by `assignmentViewAll`.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "message": "Auto-graders retrieved successfully",
///   "data": [
///     { "id": 1, "assignment_id": 2, "question": "2 + 2?", "score": 1.0,
///       "correct_string": "^4$", "is_regex": true,
///       "created_at": "...", "updated_at": "..." }
///   ]
/// }
/// ```
/// - `404 Not Found` if the assignment is not part of the course
pub async fn get_auto_graders(
    State(app_state): State<AppState>,
    Path((course_id, assignment_id)): Path<(i64, i64)>,
) -> Response {
    let db = app_state.db();
    if let Err(resp) = ensure_assignment(db, course_id, assignment_id).await {
        return resp;
    }

    match QuestionModel::list_for_assignment(db, assignment_id).await {
        Ok(questions) => {
            let data: Vec<AutoGraderResponse> = questions.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Auto-graders retrieved successfully")),
            )
                .into_response()
        }
        Err(e) => db_error("failed to list auto-graders", e),
    }
}

/// GET /api/courses/{course_id}/assignments/{assignment_id}/non-container-auto-graders/{question_id}
pub async fn get_auto_grader(
    State(app_state): State<AppState>,
    Path((course_id, assignment_id, question_id)): Path<(i64, i64, i64)>,
) -> Response {
    let db = app_state.db();
    if let Err(resp) = ensure_assignment(db, course_id, assignment_id).await {
        return resp;
    }

    match QuestionModel::find_in_assignment(db, assignment_id, question_id).await {
        Ok(Some(question)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                AutoGraderResponse::from(question),
                "Auto-grader retrieved successfully",
            )),
        )
            .into_response(),
        Ok(None) => not_found("Auto-grader not found"),
        Err(e) => db_error("failed to fetch auto-grader", e),
    }
}
