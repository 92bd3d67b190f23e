use axum::http::StatusCode;
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

/// Why a request was not allowed through a gate.
///
/// Every non-allow outcome carries exactly one of these. The serialized form is the
/// stable code sent to clients and written to the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("User is not enrolled in this course")]
    NotEnrolled,

    #[error("Resource not found")]
    ResourceNotFound,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Resource has not been released yet")]
    StateGateDenied,

    #[error("Authorization dependency unavailable, try again later")]
    DependencyUnavailable,
}

impl DenyReason {
    pub fn code(self) -> &'static str {
        match self {
            DenyReason::Unauthenticated => "unauthenticated",
            DenyReason::NotEnrolled => "not_enrolled",
            DenyReason::ResourceNotFound => "resource_not_found",
            DenyReason::PermissionDenied => "permission_denied",
            DenyReason::StateGateDenied => "state_gate_denied",
            DenyReason::DependencyUnavailable => "dependency_unavailable",
        }
    }

    pub fn status_code(self) -> StatusCode {
        match self {
            DenyReason::Unauthenticated => StatusCode::UNAUTHORIZED,
            DenyReason::NotEnrolled
            | DenyReason::PermissionDenied
            | DenyReason::StateGateDenied => StatusCode::FORBIDDEN,
            DenyReason::ResourceNotFound => StatusCode::NOT_FOUND,
            DenyReason::DependencyUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Failure of a membership or resource store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for DenyReason {
    fn from(_: StoreError) -> Self {
        DenyReason::DependencyUnavailable
    }
}

/// Startup-time misconfiguration of the permission table or route wiring.
///
/// Raised while the table is loaded or the router is built; the process must not
/// serve traffic when this occurs.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("unknown permission code `{0}`")]
    UnknownPermission(String),

    #[error("permission `{0}` is defined more than once")]
    DuplicatePermission(String),

    #[error("permission `{permission}` references unknown role `{role}`")]
    UnknownRole { permission: String, role: String },

    #[error("permission `{0}` has an empty role set")]
    EmptyRoleSet(String),

    #[error("permission `{0}` is missing from the permission table")]
    MissingPermission(String),

    #[error("failed to read permission file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse permission file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
