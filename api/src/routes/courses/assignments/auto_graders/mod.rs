//! Non-container auto-grader routes, mounted at
//! `/courses/{course_id}/assignments/{assignment_id}/non-container-auto-graders`.
//!
//! Viewing needs `assignmentViewAll`; creating, editing and deleting need
//! `assignmentEditAll`.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};

use crate::auth::error::ConfigurationError;
use crate::auth::guards::{PermissionGate, require_permission};
use crate::state::AppState;

use delete::delete_auto_grader;
use get::{get_auto_grader, get_auto_graders};
use post::create_auto_grader;
use put::edit_auto_grader;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

pub fn auto_grader_routes(app_state: &AppState) -> Result<Router<AppState>, ConfigurationError> {
    let view_all = PermissionGate::new(app_state, "assignmentViewAll")?;
    let edit_all = PermissionGate::new(app_state, "assignmentEditAll")?;

    Ok(Router::new()
        .route(
            "/",
            get(get_auto_graders)
                .route_layer(from_fn_with_state(view_all.clone(), require_permission)),
        )
        .route(
            "/",
            post(create_auto_grader)
                .route_layer(from_fn_with_state(edit_all.clone(), require_permission)),
        )
        .route(
            "/{question_id}",
            get(get_auto_grader).route_layer(from_fn_with_state(view_all, require_permission)),
        )
        .route(
            "/{question_id}",
            put(edit_auto_grader)
                .route_layer(from_fn_with_state(edit_all.clone(), require_permission)),
        )
        .route(
            "/{question_id}",
            delete(delete_auto_grader).route_layer(from_fn_with_state(edit_all, require_permission)),
        ))
}
