//! User types.

use crate::AuthError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use trtech_commerce::customer::CustomerProfile;
use trtech_commerce::ids::UserId;

/// User role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Shop customer.
    #[default]
    Customer,
    /// Back-office access.
    Admin,
}

impl Role {
    /// Get role as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            other => Err(AuthError::Internal(format!("unknown role: {other}"))),
        }
    }
}

/// The person using the shop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum User {
    /// Nobody is signed in.
    #[default]
    Anonymous,
    /// Signed-in customer.
    Authenticated {
        id: UserId,
        profile: CustomerProfile,
        roles: Vec<Role>,
    },
}

impl User {
    /// Create a signed-in customer.
    pub fn customer(id: UserId, profile: CustomerProfile) -> Self {
        User::Authenticated {
            id,
            profile,
            roles: vec![Role::Customer],
        }
    }

    /// Check if user is authenticated.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, User::Authenticated { .. })
    }

    /// Get user ID if authenticated.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            User::Authenticated { id, .. } => Some(id),
            User::Anonymous => None,
        }
    }

    /// Get the profile if authenticated.
    pub fn profile(&self) -> Option<&CustomerProfile> {
        match self {
            User::Authenticated { profile, .. } => Some(profile),
            User::Anonymous => None,
        }
    }

    /// Get email if authenticated.
    pub fn email(&self) -> Option<&str> {
        self.profile().map(|p| p.email.as_str())
    }

    /// Get display name.
    pub fn display_name(&self) -> &str {
        match self {
            User::Authenticated { profile, .. } => profile.display_name(),
            User::Anonymous => "Guest",
        }
    }

    /// Get roles.
    pub fn roles(&self) -> &[Role] {
        match self {
            User::Authenticated { roles, .. } => roles,
            User::Anonymous => &[],
        }
    }

    /// Check if user has a specific role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles().contains(&role)
    }
}
