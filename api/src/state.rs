//! Application state shared across route handlers and gates.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::engine::AuthorizationEngine;
use crate::auth::error::ConfigurationError;
use crate::auth::permissions::PermissionTable;
use crate::auth::principal::PrincipalResolver;
use crate::auth::resource::ResourceStateLookup;
use crate::auth::stores::{DbMembershipStore, DbResourceStore};

/// Central application state.
///
/// Holds the database connection used by handlers and the authorization engine used by
/// the gates. Cloning is cheap; the engine and its permission table are shared.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    engine: Arc<AuthorizationEngine>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, engine: Arc<AuthorizationEngine>) -> Self {
        Self { db, engine }
    }

    /// Wires the database-backed stores around `table`.
    pub fn with_table(
        db: DatabaseConnection,
        table: PermissionTable,
        super_users: impl IntoIterator<Item = i64>,
    ) -> Self {
        let engine = AuthorizationEngine::new(
            Arc::new(table),
            PrincipalResolver::new(Arc::new(DbMembershipStore::new(db.clone())), super_users),
            ResourceStateLookup::new(Arc::new(DbResourceStore::new(db.clone()))),
        );
        Self::new(db, Arc::new(engine))
    }

    /// Loads the permission table named by the configuration (or the built-in one).
    pub fn from_config(db: DatabaseConnection) -> Result<Self, ConfigurationError> {
        let table = PermissionTable::from_config(util::config::permissions_file().as_deref())?;
        Ok(Self::with_table(db, table, util::config::super_users()))
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn engine(&self) -> &AuthorizationEngine {
        &self.engine
    }
}
