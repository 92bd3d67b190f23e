use axum::response::Response;
use db::models::{assignment::Model as AssignmentModel, non_container_question::Model as QuestionModel};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::routes::common::{db_error, not_found};

#[derive(Debug, Serialize, Deserialize)]
pub struct AutoGraderResponse {
    pub id: i64,
    pub assignment_id: i64,
    pub question: String,
    pub score: f64,
    pub correct_string: String,
    pub is_regex: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<QuestionModel> for AutoGraderResponse {
    fn from(q: QuestionModel) -> Self {
        Self {
            id: q.id,
            assignment_id: q.assignment_id,
            question: q.question,
            score: q.score,
            correct_string: q.correct_string,
            is_regex: q.is_regex,
            created_at: q.created_at.to_rfc3339(),
            updated_at: q.updated_at.to_rfc3339(),
        }
    }
}

/// Body for creating or replacing a non-container auto-grader question.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_pattern"))]
pub struct AutoGraderRequest {
    #[validate(length(min = 1, message = "Question cannot be empty"))]
    pub question: String,
    #[validate(range(min = 0.0, message = "Score cannot be negative"))]
    pub score: f64,
    #[validate(length(min = 1, message = "Correct string cannot be empty"))]
    pub correct_string: String,
    #[serde(default)]
    pub is_regex: bool,
}

fn validate_pattern(req: &AutoGraderRequest) -> Result<(), ValidationError> {
    if req.is_regex && regex::Regex::new(&req.correct_string).is_err() {
        let mut err = ValidationError::new("regex");
        err.message = Some("Correct string is not a valid regular expression".into());
        return Err(err);
    }
    Ok(())
}

/// Confirms the assignment belongs to the course before touching its questions.
pub async fn ensure_assignment(
    db: &DatabaseConnection,
    course_id: i64,
    assignment_id: i64,
) -> Result<(), Response> {
    match AssignmentModel::find_in_course(db, course_id, assignment_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(not_found(format!(
            "Assignment {assignment_id} in Course {course_id} not found"
        ))),
        Err(e) => Err(db_error("failed to fetch assignment", e)),
    }
}
