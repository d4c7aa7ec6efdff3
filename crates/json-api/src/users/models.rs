//! User Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use portal_app::domain::users::records::UserRecord;

/// A portal account as exposed over the API. Never carries the password
/// hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,

    /// First and last name, or the username when both are blank.
    pub name: String,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,

    /// `employee`, `customer` or `admin`
    pub role: String,

    /// `pending`, `active` or `suspended`
    pub status: String,

    pub is_directory_user: bool,
    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id.into_i64(),
            name: user.display_name(),
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            company: user.company,
            phone: user.phone,
            role: user.role.to_string(),
            status: user.status.to_string(),
            is_directory_user: user.is_directory_user,
            created_at: user.created_at.to_string(),
        }
    }
}

/// Envelope for endpoints that return the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserEnvelope {
    pub user: UserResponse,
}

impl From<UserRecord> for UserEnvelope {
    fn from(user: UserRecord) -> Self {
        Self { user: user.into() }
    }
}
