//! Database-backed implementations of the authorization stores.

use async_trait::async_trait;
use db::models::{assignment, user_course_role};
use sea_orm::DatabaseConnection;

use crate::auth::error::StoreError;
use crate::auth::principal::MembershipStore;
use crate::auth::resource::{ResourceRef, ResourceSnapshot, ResourceStore};

#[derive(Clone)]
pub struct DbMembershipStore {
    db: DatabaseConnection,
}

impl DbMembershipStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MembershipStore for DbMembershipStore {
    async fn roles_in_course(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<Vec<user_course_role::Role>, StoreError> {
        Ok(user_course_role::Model::roles_for(&self.db, user_id, course_id).await?)
    }
}

#[derive(Clone)]
pub struct DbResourceStore {
    db: DatabaseConnection,
}

impl DbResourceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResourceStore for DbResourceStore {
    async fn snapshot(&self, resource: &ResourceRef) -> Result<Option<ResourceSnapshot>, StoreError> {
        match resource {
            ResourceRef::Assignment { assignment_id, .. } => {
                let state = assignment::Model::release_state(&self.db, *assignment_id).await?;
                Ok(state.map(|(course_id, available_from)| ResourceSnapshot {
                    course_id,
                    available_from,
                }))
            }
        }
    }
}
