pub mod app;

pub use app::{body_json, bearer, get, init_env, make_app, make_app_with, send_json, token_for};
