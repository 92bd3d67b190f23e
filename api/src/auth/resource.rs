//! Resource state lookup for state-gated checks.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::auth::error::{DenyReason, StoreError};
use crate::auth::permissions::Permission;

/// A resource addressed by the request path. The course always comes from the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceRef {
    Assignment { course_id: i64, assignment_id: i64 },
}

impl ResourceRef {
    pub fn course_id(&self) -> i64 {
        match self {
            ResourceRef::Assignment { course_id, .. } => *course_id,
        }
    }

    pub fn resource_id(&self) -> i64 {
        match self {
            ResourceRef::Assignment { assignment_id, .. } => *assignment_id,
        }
    }

    /// Permission granting access once the resource is available.
    pub fn view_permission(&self) -> Permission {
        match self {
            ResourceRef::Assignment { .. } => Permission::AssignmentViewReleased,
        }
    }

    /// Permission granting access regardless of availability.
    pub fn elevated_permission(&self) -> Permission {
        match self {
            ResourceRef::Assignment { .. } => Permission::AssignmentViewAll,
        }
    }
}

/// The minimal facts a state-gated decision needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSnapshot {
    /// Course that owns the resource.
    pub course_id: i64,
    /// Release instant; before it only elevated roles may access the resource.
    pub available_from: DateTime<Utc>,
}

/// Read-only source of resource state.
///
/// Implementations look the resource up by id alone and report its owner; the
/// course comparison happens in [`ResourceStateLookup`].
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn snapshot(&self, resource: &ResourceRef) -> Result<Option<ResourceSnapshot>, StoreError>;
}

pub struct ResourceStateLookup {
    store: Arc<dyn ResourceStore>,
}

impl ResourceStateLookup {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    /// Fetches a fresh snapshot. Missing resources and resources owned by another
    /// course are both `ResourceNotFound`.
    pub async fn lookup(&self, resource: &ResourceRef) -> Result<ResourceSnapshot, DenyReason> {
        let snapshot = self
            .store
            .snapshot(resource)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, resource = ?resource, "Resource lookup failed");
                DenyReason::DependencyUnavailable
            })?
            .ok_or(DenyReason::ResourceNotFound)?;

        if snapshot.course_id != resource.course_id() {
            return Err(DenyReason::ResourceNotFound);
        }

        Ok(snapshot)
    }
}
