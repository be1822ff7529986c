//! User domain entity, roles, and the credential views used for authentication.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A granted authority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Role {
    pub id: i64,
    #[schema(example = "ROLE_CLIENT")]
    pub authority: String,
}

impl Role {
    pub fn new(id: i64, authority: impl Into<String>) -> Self {
        Self {
            id,
            authority: authority.into(),
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Login name, unique
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub roles: Vec<Role>,
}

/// Data needed to create a user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub authorities: Vec<String>,
}

/// One row of the user + roles projection: a user joined with one of its roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetailsProjection {
    pub username: String,
    pub password: String,
    pub role_id: i64,
    pub authority: String,
}

/// Credentials view handed to the authentication layer.
#[derive(Clone, PartialEq, Eq)]
pub struct UserDetails {
    pub username: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
}

// Don't expose hash in debug output
impl std::fmt::Debug for UserDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDetails")
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("roles", &self.roles)
            .finish()
    }
}

impl UserDetails {
    /// Collapse projection rows into a single view.
    ///
    /// Returns `None` for an empty row set. Credentials are taken from the
    /// first row; roles are collected across all rows without duplicates.
    pub fn from_projections(rows: Vec<UserDetailsProjection>) -> Option<Self> {
        let mut rows = rows.into_iter();
        let first = rows.next()?;

        let mut details = Self {
            username: first.username,
            password_hash: first.password,
            roles: vec![Role::new(first.role_id, first.authority)],
        };
        for row in rows {
            let role = Role::new(row.role_id, row.authority);
            if !details.roles.contains(&role) {
                details.roles.push(role);
            }
        }

        Some(details)
    }

    /// Authority strings, in the order they were granted
    pub fn authorities(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.authority.clone()).collect()
    }
}
