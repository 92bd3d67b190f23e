//! Static permission table.
//!
//! Maps every [`Permission`] to the non-empty set of course roles allowed to exercise it.
//! The table is loaded once at startup (built-in defaults or a JSON file) and is
//! read-only afterwards, so it is shared between requests behind an `Arc`.

use std::collections::{BTreeSet, HashSet};
use std::str::FromStr;

use db::models::user_course_role::Role;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::auth::error::ConfigurationError;

const PERMISSION_COUNT: usize = 3;

/// An action on an entity class, named by a stable camelCase code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum Permission {
    /// View every assignment of the course, released or not.
    AssignmentViewAll,
    /// View assignments whose release date has passed.
    AssignmentViewReleased,
    /// Create, edit and delete assignments and their auto-graders.
    AssignmentEditAll,
}

impl Permission {
    pub const ALL: [Permission; PERMISSION_COUNT] = [
        Permission::AssignmentViewAll,
        Permission::AssignmentViewReleased,
        Permission::AssignmentEditAll,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// One row of a permission table source.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PermissionDefinition {
    pub code: String,
    pub roles: Vec<String>,
}

impl PermissionDefinition {
    pub fn new(code: &str, roles: &[&str]) -> Self {
        Self {
            code: code.to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// Built-in table used when no `PERMISSIONS_FILE` is configured.
pub fn default_definitions() -> Vec<PermissionDefinition> {
    vec![
        PermissionDefinition::new("assignmentViewAll", &["instructor", "ta", "admin"]),
        PermissionDefinition::new(
            "assignmentViewReleased",
            &["student", "ta", "instructor", "admin"],
        ),
        PermissionDefinition::new("assignmentEditAll", &["instructor", "admin"]),
    ]
}

#[derive(Debug, Clone)]
pub struct PermissionTable {
    entries: [BTreeSet<Role>; PERMISSION_COUNT],
}

impl PermissionTable {
    /// Validates and builds a table.
    ///
    /// Rejects unknown or duplicate codes, unknown roles, empty role sets, and any
    /// permission left undefined, so that `roles_allowed` is total afterwards.
    pub fn load(definitions: &[PermissionDefinition]) -> Result<Self, ConfigurationError> {
        let mut entries: [Option<BTreeSet<Role>>; PERMISSION_COUNT] = Default::default();

        for def in definitions {
            let permission = Permission::from_str(&def.code)
                .map_err(|_| ConfigurationError::UnknownPermission(def.code.clone()))?;

            let slot = &mut entries[permission.index()];
            if slot.is_some() {
                return Err(ConfigurationError::DuplicatePermission(def.code.clone()));
            }

            let roles = def
                .roles
                .iter()
                .map(|role| {
                    Role::from_str(role).map_err(|_| ConfigurationError::UnknownRole {
                        permission: def.code.clone(),
                        role: role.clone(),
                    })
                })
                .collect::<Result<BTreeSet<_>, _>>()?;

            if roles.is_empty() {
                return Err(ConfigurationError::EmptyRoleSet(def.code.clone()));
            }

            *slot = Some(roles);
        }

        let mut table: [BTreeSet<Role>; PERMISSION_COUNT] = Default::default();
        for permission in Permission::ALL {
            table[permission.index()] = entries[permission.index()]
                .take()
                .ok_or_else(|| ConfigurationError::MissingPermission(permission.to_string()))?;
        }

        Ok(Self { entries: table })
    }

    pub fn builtin() -> Result<Self, ConfigurationError> {
        Self::load(&default_definitions())
    }

    /// Loads a JSON array of `{ "code": ..., "roles": [...] }` objects.
    pub fn from_file(path: &str) -> Result<Self, ConfigurationError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_string(),
            source,
        })?;
        let definitions: Vec<PermissionDefinition> =
            serde_json::from_str(&raw).map_err(|source| ConfigurationError::Parse {
                path: path.to_string(),
                source,
            })?;
        Self::load(&definitions)
    }

    /// Uses `path` when given, otherwise the built-in table.
    pub fn from_config(path: Option<&str>) -> Result<Self, ConfigurationError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    pub fn roles_allowed(&self, permission: Permission) -> &BTreeSet<Role> {
        &self.entries[permission.index()]
    }

    /// True iff any of `roles` may exercise `permission`.
    pub fn allows_any(&self, permission: Permission, roles: &HashSet<Role>) -> bool {
        self.roles_allowed(permission)
            .iter()
            .any(|role| roles.contains(role))
    }

    /// Resolves a permission code referenced by a route.
    pub fn resolve(&self, code: &str) -> Result<Permission, ConfigurationError> {
        Permission::from_str(code).map_err(|_| ConfigurationError::UnknownPermission(code.into()))
    }
}
