use std::net::SocketAddr;

use api::auth::middleware::log_request;
use api::routes::routes;
use api::state::AppState;
use axum::{Router, http::header::CONTENT_TYPE, middleware::from_fn};
use tower_http::cors::CorsLayer;
use tracing_appender::rolling;
use util::config;

#[tokio::main]
async fn main() {
    let _log_guard = init_logging(&config::log_file(), config::log_to_stdout());

    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to database");
            std::process::exit(1);
        }
    };

    // Permission table and route wiring are validated here; never serve with a bad table.
    let app_state = match AppState::from_config(db) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "invalid authorization configuration");
            std::process::exit(1);
        }
    };
    let api = match routes(app_state) {
        Ok(router) => router,
        Err(e) => {
            tracing::error!(error = %e, "invalid route permission wiring");
            std::process::exit(1);
        }
    };

    let cors = CorsLayer::very_permissive().expose_headers([CONTENT_TYPE]);

    let app = Router::new()
        .nest("/api", api)
        .layer(from_fn(log_request))
        .layer(cors);

    let addr: SocketAddr = match format!("{}:{}", config::host(), config::port()).parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(error = %e, "invalid HOST/PORT");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Starting {} ({}) on http://{}",
        config::project_name(),
        config::env(),
        addr
    );

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        tracing::error!(error = %e, "server stopped");
    }
}

fn init_logging(log_file: &str, log_to_stdout: bool) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_thread_ids(true);

    let env_filter = EnvFilter::try_new(config::log_level())
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_LEVEL));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if log_to_stdout {
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    guard
}
