use axum::Router;

use crate::auth::error::ConfigurationError;
use crate::state::AppState;

pub mod assignments;

/// Builds the `/courses` route group. Every nested route carries `{course_id}`.
pub fn course_routes(app_state: &AppState) -> Result<Router<AppState>, ConfigurationError> {
    Ok(Router::new().nest(
        "/{course_id}/assignments",
        assignments::assignment_routes(app_state)?,
    ))
}
