use std::sync::Once;

use api::auth::generate_jwt;
use api::auth::permissions::PermissionTable;
use api::routes::routes;
use api::state::AppState;
use axum::{
    Router,
    body::Body,
    http::{Request, header},
    response::Response,
};
use db::models::user::Model as UserModel;
use sea_orm::DatabaseConnection;
use serde_json::Value;

static INIT: Once = Once::new();

/// Seeds the environment the global config reads, before anything touches it.
pub fn init_env() {
    INIT.call_once(|| unsafe {
        std::env::set_var("DATABASE_PATH", "sqlite::memory:");
        std::env::set_var("JWT_SECRET", "integration-test-secret");
        std::env::set_var("JWT_DURATION_MINUTES", "60");
    });
}

/// Router over `db` with the built-in permission table and no super users.
pub fn make_app(db: DatabaseConnection) -> Router {
    make_app_with(db, PermissionTable::builtin().unwrap(), Vec::new())
}

pub fn make_app_with(db: DatabaseConnection, table: PermissionTable, super_users: Vec<i64>) -> Router {
    init_env();
    let state = AppState::with_table(db, table, super_users);
    Router::new().nest("/api", routes(state).expect("route wiring"))
}

pub fn token_for(user: &UserModel) -> String {
    init_env();
    generate_jwt(user.id, user.admin).unwrap().0
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).method("GET");
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, bearer(t));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn send_json(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).method(method);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, bearer(t));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
