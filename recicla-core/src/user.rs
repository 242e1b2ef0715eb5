//! Registered users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User profile. The password hash lives only in [`UserCredentials`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "curso")]
    pub course: String,
    #[serde(rename = "semestre")]
    pub semester: String,
    #[serde(rename = "turma")]
    pub class_id: String,
    #[serde(rename = "turno")]
    pub shift: String,
    #[serde(rename = "unidade")]
    pub unit_id: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Public subset of a user embedded in other responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// User together with the stored bcrypt hash, used only for login
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Data required to register a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub course: String,
    pub semester: String,
    pub class_id: String,
    pub shift: String,
    pub unit_id: String,
}
