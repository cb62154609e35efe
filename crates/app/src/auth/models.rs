//! Auth models.

use haat::{ids::UserId, order::Role};
use serde::{Deserialize, Serialize};

/// `POST /auth/signup` payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// `POST /auth/login` payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The server's auth response: the bearer token plus the identity fields it
/// echoes back.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,

    /// Token scheme, `"Bearer"`.
    #[serde(rename = "type")]
    pub token_type: String,

    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
}
