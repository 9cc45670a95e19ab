use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::lifecycle::SoftDeletable;
use crate::domain::listing::SortField;

/// Privilege levels, totally ordered: `User < Employee < Admin`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Employee,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Employee => "employee",
            Role::Admin => "admin",
        }
    }

    /// Whether this role grants at least the privileges of `required`.
    pub fn satisfies(self, required: Role) -> bool {
        self >= required
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role `{0}`")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "employee" => Ok(Role::Employee),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub pseudo: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl SoftDeletable for User {
    fn id(&self) -> Uuid {
        self.id
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub pseudo: String,
    pub email: String,
    pub password_hash: String,
}

/// Partial update: `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub pseudo: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.pseudo.is_none() && self.email.is_none() && self.password_hash.is_none()
    }

    pub fn apply_to(&self, user: &mut User) {
        if let Some(pseudo) = &self.pseudo {
            user.pseudo = pseudo.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(hash) = &self.password_hash {
            user.password_hash = hash.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSort {
    Pseudo,
    Email,
    Role,
    CreatedAt,
}

impl SortField for UserSort {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "pseudo" => Some(UserSort::Pseudo),
            "email" => Some(UserSort::Email),
            "role" => Some(UserSort::Role),
            "created_at" => Some(UserSort::CreatedAt),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            UserSort::Pseudo => "pseudo",
            UserSort::Email => "email",
            // privilege order, not alphabetical
            UserSort::Role => "CASE role WHEN 'user' THEN 0 WHEN 'employee' THEN 1 ELSE 2 END",
            UserSort::CreatedAt => "created_at",
        }
    }
}
