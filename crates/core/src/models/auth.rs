use serde::{Deserialize, Serialize};

use crate::models::member::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub login_id: String,
    pub password: String,
}

/// Backend login payload: tokens plus the member's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub id: i64,
    #[serde(default)]
    pub login_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

/// The signed-in member as the console remembers it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub member_id: i64,
    pub login_id: String,
    pub name: String,
    pub role: Role,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: SessionUser,
}

impl Session {
    /// Builds a session from a login response, keeping the login id the member typed
    /// when the backend does not echo it back.
    pub fn from_login(login_id: &str, response: LoginResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            user: SessionUser {
                member_id: response.id,
                login_id: response.login_id.unwrap_or_else(|| login_id.to_string()),
                name: response.name,
                role: response.role,
            },
        }
    }
}
