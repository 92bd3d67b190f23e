//! Request gates.
//!
//! Each gate translates path parameters and the bearer token into engine inputs, asks the
//! [`AuthorizationEngine`](crate::auth::engine::AuthorizationEngine) for a decision, and
//! either runs the rest of the pipeline untouched or ends the request with the status and
//! reason code of the denial. Gates hold no policy of their own.
//!
//! A request without a valid token is answered 401 even when its path ids are malformed.

use std::collections::HashMap;

use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, Path, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::claims::AuthUser;
use crate::auth::engine::Decision;
use crate::auth::error::{ConfigurationError, DenyReason};
use crate::auth::extractors::path_id;
use crate::auth::permissions::Permission;
use crate::auth::principal::Principal;
use crate::auth::resource::ResourceRef;
use crate::response::{ApiResponse, Empty};
use crate::state::AppState;

/// State for [`require_permission`]: the app state plus the permission the route demands.
#[derive(Clone)]
pub struct PermissionGate {
    state: AppState,
    permission: Permission,
}

impl PermissionGate {
    /// Binds a route to a permission code.
    ///
    /// Called while the router is built, so an unknown code stops startup instead of
    /// failing requests later.
    pub fn new(state: &AppState, code: &str) -> Result<Self, ConfigurationError> {
        let permission = state.engine().table().resolve(code)?;
        Ok(Self {
            state: state.clone(),
            permission,
        })
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }
}

/// Reads the principal from the `Authorization` header, leaving the request intact.
async fn extract_principal(req: Request<Body>) -> (Request<Body>, Option<Principal>) {
    let (mut parts, body) = req.into_parts();
    let principal = AuthUser::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|AuthUser(claims)| Principal::from(&claims));
    (Request::from_parts(parts, body), principal)
}

/// Rejects a malformed path id. Missing credentials still take precedence.
fn bad_path(principal: Option<&Principal>, name: &str) -> Response {
    if principal.is_none() {
        return DenyReason::Unauthenticated.into_response();
    }
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<Empty>::error(format!("Missing or invalid {name}"))),
    )
        .into_response()
}

async fn finish(decision: Decision, req: Request<Body>, next: Next) -> Response {
    match decision {
        Decision::Allow => next.run(req).await,
        Decision::Deny(reason) => reason.into_response(),
    }
}

/// Static permission gate. Requires `{course_id}` in the route path.
pub async fn require_permission(
    State(gate): State<PermissionGate>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let (req, principal) = extract_principal(req).await;

    let Some(course_id) = path_id(&params, "course_id") else {
        return bad_path(principal.as_ref(), "course_id");
    };

    let decision = gate
        .state
        .engine()
        .authorize(principal.as_ref(), course_id, gate.permission)
        .await;

    finish(decision, req, next).await
}

/// State-gated assignment access. Requires `{course_id}` and `{assignment_id}` in the path.
///
/// Course staff always pass; students pass once the assignment's start date is reached.
pub async fn require_released_assignment(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let (req, principal) = extract_principal(req).await;

    let Some(course_id) = path_id(&params, "course_id") else {
        return bad_path(principal.as_ref(), "course_id");
    };
    let Some(assignment_id) = path_id(&params, "assignment_id") else {
        return bad_path(principal.as_ref(), "assignment_id");
    };

    let resource = ResourceRef::Assignment {
        course_id,
        assignment_id,
    };
    let decision = state
        .engine()
        .authorize_by_resource_state(principal.as_ref(), &resource)
        .await;

    finish(decision, req, next).await
}
