use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use validator::ValidationErrors;

use crate::response::{ApiResponse, Empty};

pub fn not_found(message: impl Into<String>) -> Response {
    (StatusCode::NOT_FOUND, Json(ApiResponse::<Empty>::error(message))).into_response()
}

pub fn db_error(context: &str, err: DbErr) -> Response {
    tracing::error!(error = %err, "{context}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<Empty>::error(format!("Database error: {context}"))),
    )
        .into_response()
}

/// Flattens validator errors into a single readable message.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("Invalid {field}"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

pub fn validation_error(errors: &ValidationErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<Empty>::error(format_validation_errors(errors))),
    )
        .into_response()
}
