//! User models.

use haat::{ids::UserId, order::Role};
use serde::{Deserialize, Serialize};

/// The logged-in user's profile as the server returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub address: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub phone: Option<String>,
}

/// Editable profile fields for `PUT /users/me`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
