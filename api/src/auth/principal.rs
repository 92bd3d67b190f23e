//! Principal resolution: who is calling, and what are they in this course.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use db::models::user_course_role::Role;

use crate::auth::claims::Claims;
use crate::auth::error::{DenyReason, StoreError};

/// The authenticated actor, as carried by the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    /// Global administrator flag from the token.
    pub admin: bool,
}

impl From<&Claims> for Principal {
    fn from(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            admin: claims.admin,
        }
    }
}

/// Read-only source of course membership records.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Every role `user_id` holds in `course_id`; empty when not enrolled.
    async fn roles_in_course(&self, user_id: i64, course_id: i64) -> Result<Vec<Role>, StoreError>;
}

/// Resolves a principal's roles within the course named by the request path.
///
/// Global admins and configured super users additionally hold [`Role::Admin`] in every course.
pub struct PrincipalResolver {
    store: Arc<dyn MembershipStore>,
    super_users: HashSet<i64>,
}

impl PrincipalResolver {
    pub fn new(store: Arc<dyn MembershipStore>, super_users: impl IntoIterator<Item = i64>) -> Self {
        Self {
            store,
            super_users: super_users.into_iter().collect(),
        }
    }

    pub fn is_super_user(&self, user_id: i64) -> bool {
        self.super_users.contains(&user_id)
    }

    pub async fn resolve(
        &self,
        principal: Option<&Principal>,
        course_id: i64,
    ) -> Result<HashSet<Role>, DenyReason> {
        let principal = principal.ok_or(DenyReason::Unauthenticated)?;

        let mut roles: HashSet<Role> = self
            .store
            .roles_in_course(principal.user_id, course_id)
            .await
            .map_err(|e| {
                tracing::warn!(
                    error = %e,
                    user_id = principal.user_id,
                    course_id,
                    "Membership lookup failed"
                );
                DenyReason::DependencyUnavailable
            })?
            .into_iter()
            .collect();

        if principal.admin || self.is_super_user(principal.user_id) {
            roles.insert(Role::Admin);
        }

        if roles.is_empty() {
            return Err(DenyReason::NotEnrolled);
        }

        Ok(roles)
    }
}
