//! User identity types.
//!
//! Accounts are owned by the identity provider. This service only reads
//! them and receives the authenticated [`Principal`] explicitly on every call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_CLIENT, ROLE_DRIVER};

/// Role derived from the driver capability flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Driver,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Client => write!(f, "{}", ROLE_CLIENT),
            Role::Driver => write!(f, "{}", ROLE_DRIVER),
        }
    }
}

/// Authenticated actor invoking an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
    pub is_driver: bool,
}

impl Principal {
    pub fn new(id: Uuid, username: impl Into<String>, is_driver: bool) -> Self {
        Self {
            id,
            username: username.into(),
            is_driver,
        }
    }

    pub fn role(&self) -> Role {
        if self.is_driver {
            Role::Driver
        } else {
            Role::Client
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub is_driver: bool,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    #[schema(example = "ana.popescu")]
    pub username: String,
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[schema(example = "+40712345678")]
    pub phone: String,
    pub is_driver: bool,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            phone: user.phone,
            is_driver: user.is_driver,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}
