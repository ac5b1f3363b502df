//! Account roles and the resolved caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role carried by every account
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
    Doctor,
    Nurse,
    Secretary,
    Admin,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Patient,
        Role::Doctor,
        Role::Nurse,
        Role::Secretary,
        Role::Admin,
    ];

    /// Roles that own a role-profile entry
    pub fn has_profile(&self) -> bool {
        !matches!(self, Role::Admin)
    }

    /// Staff roles are created by an administrator, never self-registered
    pub fn is_staff_role(&self) -> bool {
        matches!(self, Role::Doctor | Role::Nurse | Role::Secretary)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::Nurse => "nurse",
            Role::Secretary => "secretary",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            "nurse" => Ok(Role::Nurse),
            "secretary" => Ok(Role::Secretary),
            "admin" | "administrator" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// The calling account, resolved from the agent key.
///
/// `Id` is the account identifier; zomes use the account's `ActionHash`,
/// tests use plain integers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor<Id> {
    pub account: Id,
    pub role: Role,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
}

impl<Id> Actor<Id> {
    pub fn new(account: Id, role: Role) -> Self {
        Self {
            account,
            role,
            is_staff: matches!(role, Role::Admin),
            is_superuser: false,
            is_active: true,
        }
    }

    /// Administrators and superusers bypass every ownership filter
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin || self.is_superuser
    }

    /// Accounts allowed to run bulk overrides
    pub fn is_privileged(&self) -> bool {
        self.is_admin() || self.is_staff
    }
}
