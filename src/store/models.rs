use serde::{Deserialize, Serialize};
use std::fmt;

/// Privilege level, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Administrator,
    Owner,
}

impl Role {
    pub fn can_manage_application(self) -> bool {
        self != Role::User
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::User => "User",
            Role::Administrator => "Administrator",
            Role::Owner => "Owner",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// The current user's role inside this application, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl Application {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            role,
        }
    }
}

/// Organization-wide identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub role: Role,
}

impl Default for User {
    fn default() -> Self {
        Self {
            email: String::new(),
            role: Role::User,
        }
    }
}
