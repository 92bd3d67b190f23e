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
use crate::routes::common::{db_error, validation_error};
use crate::state::AppState;

/// POST /api/courses/{course_id}/assignments/{assignment_id}/non-container-auto-graders
///
/// Adds a question. Guarded by `assignmentEditAll`.
///
/// ### Request Body
/// ```json
/// { "question": "2 + 2?", "score": 1.0, "correct_string": "^4$", "is_regex": true }
/// ```
///
/// ### Responses
/// - `201 Created`
/// - `400 Bad Request` on validation failure, including a pattern that does not compile
/// - `404 Not Found` if the assignment is not part of the course
pub async fn create_auto_grader(
    State(app_state): State<AppState>,
    Path((course_id, assignment_id)): Path<(i64, i64)>,
    Json(req): Json<AutoGraderRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return validation_error(&errors);
    }

    let db = app_state.db();
    if let Err(resp) = ensure_assignment(db, course_id, assignment_id).await {
        return resp;
    }

    match QuestionModel::create(
        db,
        assignment_id,
        &req.question,
        req.score,
        &req.correct_string,
        req.is_regex,
    )
    .await
    {
        Ok(question) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                AutoGraderResponse::from(question),
                "Auto-grader created successfully",
            )),
        )
            .into_response(),
        Err(e) => db_error("failed to create auto-grader", e),
    }
}
