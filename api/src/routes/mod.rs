//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → Health check endpoint (public)
//! - `/courses/{course_id}/assignments` → Assignments and their non-container auto-graders,
//!   each route guarded by a permission gate or the assignment release gate.

use axum::Router;

use crate::auth::error::ConfigurationError;
use crate::routes::{courses::course_routes, health::health_routes};
use crate::state::AppState;

pub mod common;
pub mod courses;
pub mod health;

/// Builds the complete application router.
///
/// Every permission code referenced by a route is resolved here, so a misconfigured
/// route fails with `ConfigurationError` before the server binds.
pub fn routes(app_state: AppState) -> Result<Router, ConfigurationError> {
    let router = Router::new()
        .nest("/health", health_routes())
        .nest("/courses", course_routes(&app_state)?)
        .with_state(app_state);

    Ok(router)
}
