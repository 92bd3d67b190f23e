use chrono::{DateTime, Utc};
use db::models::assignment::Model as AssignmentModel;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Serialize, Deserialize)]
pub struct AssignmentResponse {
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub start_date: String,
    pub due_date: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<AssignmentModel> for AssignmentResponse {
    fn from(assignment: AssignmentModel) -> Self {
        Self {
            id: assignment.id,
            course_id: assignment.course_id,
            name: assignment.name,
            description: assignment.description,
            start_date: assignment.start_date.to_rfc3339(),
            due_date: assignment.due_date.to_rfc3339(),
            created_at: assignment.created_at.to_rfc3339(),
            updated_at: assignment.updated_at.to_rfc3339(),
        }
    }
}

/// Body for creating or replacing an assignment.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_dates"))]
pub struct AssignmentRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

fn validate_dates(req: &AssignmentRequest) -> Result<(), ValidationError> {
    if req.due_date < req.start_date {
        let mut err = ValidationError::new("date_order");
        err.message = Some("Due date cannot be before start date".into());
        return Err(err);
    }
    Ok(())
}
