use axum::{Json, Router, response::IntoResponse, routing::get};

use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/health
///
/// Liveness probe. Public; does not touch the database.
pub async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success("OK", "Health check passed"))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}
