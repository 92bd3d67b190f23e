use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::auth::error::DenyReason;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Some message"
/// }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Constructs a success response with the given data and message.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Constructs an error response with a message and default `data`.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

#[derive(Serialize, Default)]
pub struct Empty {}

/// Body of a denied request. Only the reason code is exposed.
#[derive(Serialize)]
pub struct Denied {
    pub reason: DenyReason,
}

impl IntoResponse for DenyReason {
    fn into_response(self) -> Response {
        let body = ApiResponse {
            success: false,
            data: Denied { reason: self },
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
