//! Caller identity for admin-gated operations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Admin,
}

/// Whoever is issuing a session command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Caller {
    pub role: Role,
}

impl Caller {
    pub const MEMBER: Caller = Caller { role: Role::Member };
    pub const ADMIN: Caller = Caller { role: Role::Admin };

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
