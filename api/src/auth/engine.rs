//! The authorization decision engine.
//!
//! Two checks are exposed:
//! - [`AuthorizationEngine::authorize`]: can the caller's role(s) in the course exercise a permission.
//! - [`AuthorizationEngine::authorize_by_resource_state`]: may the caller access a specific
//!   resource, given whether it has been released.
//!
//! Preconditions are evaluated in a fixed order and the first failure wins:
//! unauthenticated, not enrolled, resource not found, permission denied, state gate denied.
//!
//! The release comparison reads the clock when the decision is made, after the resource
//! lookup. A request that arrives just before the release instant may therefore be allowed
//! if it is processed after it, and the reverse. That is accepted behaviour.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use db::models::user_course_role::Role;

use crate::auth::error::DenyReason;
use crate::auth::permissions::{Permission, PermissionTable};
use crate::auth::principal::{Principal, PrincipalResolver};
use crate::auth::resource::{ResourceRef, ResourceStateLookup};

/// Outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn reason(&self) -> Option<DenyReason> {
        match self {
            Decision::Allow => None,
            Decision::Deny(reason) => Some(*reason),
        }
    }
}

impl From<Result<(), DenyReason>> for Decision {
    fn from(result: Result<(), DenyReason>) -> Self {
        match result {
            Ok(()) => Decision::Allow,
            Err(reason) => Decision::Deny(reason),
        }
    }
}

/// Source of "now" for release comparisons.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct AuthorizationEngine {
    table: Arc<PermissionTable>,
    principals: PrincipalResolver,
    resources: ResourceStateLookup,
    clock: Clock,
}

impl AuthorizationEngine {
    pub fn new(
        table: Arc<PermissionTable>,
        principals: PrincipalResolver,
        resources: ResourceStateLookup,
    ) -> Self {
        Self {
            table,
            principals,
            resources,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    /// Static check: allowed iff the caller's roles in `course_id` intersect
    /// `roles_allowed(permission)`.
    pub async fn authorize(
        &self,
        principal: Option<&Principal>,
        course_id: i64,
        permission: Permission,
    ) -> Decision {
        let result = self.check_permission(principal, course_id, permission).await;

        match result {
            Ok(()) => tracing::debug!(
                target: "audit",
                user_id = principal.map(|p| p.user_id),
                course_id,
                %permission,
                "access allowed"
            ),
            Err(reason) => tracing::info!(
                target: "audit",
                reason = reason.code(),
                user_id = principal.map(|p| p.user_id),
                course_id,
                %permission,
                "access denied"
            ),
        }

        result.into()
    }

    /// State-gated check.
    ///
    /// Elevated roles are always allowed. Roles with only view standing are allowed once
    /// `now >= available_from` and denied with `StateGateDenied` before that.
    pub async fn authorize_by_resource_state(
        &self,
        principal: Option<&Principal>,
        resource: &ResourceRef,
    ) -> Decision {
        let result = self.check_resource_state(principal, resource).await;

        match result {
            Ok(()) => tracing::debug!(
                target: "audit",
                user_id = principal.map(|p| p.user_id),
                course_id = resource.course_id(),
                resource_id = resource.resource_id(),
                "access allowed"
            ),
            Err(reason) => tracing::info!(
                target: "audit",
                reason = reason.code(),
                user_id = principal.map(|p| p.user_id),
                course_id = resource.course_id(),
                resource_id = resource.resource_id(),
                "access denied"
            ),
        }

        result.into()
    }

    async fn check_permission(
        &self,
        principal: Option<&Principal>,
        course_id: i64,
        permission: Permission,
    ) -> Result<(), DenyReason> {
        let roles = self.principals.resolve(principal, course_id).await?;

        if self.table.allows_any(permission, &roles) {
            Ok(())
        } else {
            Err(DenyReason::PermissionDenied)
        }
    }

    async fn check_resource_state(
        &self,
        principal: Option<&Principal>,
        resource: &ResourceRef,
    ) -> Result<(), DenyReason> {
        let roles = self.principals.resolve(principal, resource.course_id()).await?;
        let snapshot = self.resources.lookup(resource).await?;

        if self.has_standing(resource.elevated_permission(), &roles) {
            return Ok(());
        }

        if !self.has_standing(resource.view_permission(), &roles) {
            return Err(DenyReason::PermissionDenied);
        }

        let now = (self.clock)();
        if now >= snapshot.available_from {
            Ok(())
        } else {
            Err(DenyReason::StateGateDenied)
        }
    }

    fn has_standing(&self, permission: Permission, roles: &HashSet<Role>) -> bool {
        self.table.allows_any(permission, roles)
    }
}
