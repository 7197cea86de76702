use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Employer,
    Moderator,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Employee, Role::Employer, Role::Moderator];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Employer => "employer",
            Role::Moderator => "moderator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| Error::Unauthorized(format!("unknown role '{}'", raw)))
    }
}

/// Authenticated identity attached to every protected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
    #[serde(default)]
    pub is_superuser: bool,
}

impl Actor {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self {
            user_id,
            role,
            is_superuser: false,
        }
    }

    pub fn superuser(user_id: Uuid, role: Role) -> Self {
        Self {
            user_id,
            role,
            is_superuser: true,
        }
    }

    pub fn require_role(&self, role: Role) -> crate::error::Result<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(Error::Forbidden(format!(
                "{} role required, caller is {}",
                role, self.role
            )))
        }
    }
}
