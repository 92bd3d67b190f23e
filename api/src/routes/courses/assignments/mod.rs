//! Assignment routes, mounted at `/courses/{course_id}/assignments`.
//!
//! Routes:
//! - `GET    /released`                    → Released assignments (`assignmentViewReleased`)
//! - `GET    /`                            → All assignments (`assignmentViewAll`)
//! - `GET    /{assignment_id}`             → One assignment (release gate)
//! - `POST   /`                            → Create (`assignmentEditAll`)
//! - `PUT    /{assignment_id}`             → Edit (`assignmentEditAll`)
//! - `DELETE /{assignment_id}`             → Delete (`assignmentEditAll`)
//!
//! Nested:
//! - `/{assignment_id}/non-container-auto-graders` → `auto_graders::auto_grader_routes`

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};

use crate::auth::error::ConfigurationError;
use crate::auth::guards::{PermissionGate, require_permission, require_released_assignment};
use crate::state::AppState;

use delete::delete_assignment;
use get::{get_assignment, get_assignments, get_released_assignments};
use post::create_assignment;
use put::edit_assignment;

pub mod auto_graders;
pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

pub fn assignment_routes(app_state: &AppState) -> Result<Router<AppState>, ConfigurationError> {
    let view_released = PermissionGate::new(app_state, "assignmentViewReleased")?;
    let view_all = PermissionGate::new(app_state, "assignmentViewAll")?;
    let edit_all = PermissionGate::new(app_state, "assignmentEditAll")?;

    Ok(Router::new()
        .route(
            "/released",
            get(get_released_assignments)
                .route_layer(from_fn_with_state(view_released, require_permission)),
        )
        .route(
            "/",
            get(get_assignments)
                .route_layer(from_fn_with_state(view_all, require_permission)),
        )
        .route(
            "/",
            post(create_assignment)
                .route_layer(from_fn_with_state(edit_all.clone(), require_permission)),
        )
        .route(
            "/{assignment_id}",
            get(get_assignment).route_layer(from_fn_with_state(
                app_state.clone(),
                require_released_assignment,
            )),
        )
        .route(
            "/{assignment_id}",
            put(edit_assignment)
                .route_layer(from_fn_with_state(edit_all.clone(), require_permission)),
        )
        .route(
            "/{assignment_id}",
            delete(delete_assignment)
                .route_layer(from_fn_with_state(edit_all, require_permission)),
        )
        .nest(
            "/{assignment_id}/non-container-auto-graders",
            auto_graders::auto_grader_routes(app_state)?,
        ))
}
