//! User Records

use jiff::Timestamp;
use portal::roles::{Role, UserStatus};

use crate::ids::TypedId;

/// User ID
pub type UserId = TypedId<UserRecord>;

/// User Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,

    /// Argon2 PHC string. Directory users carry a random placeholder.
    pub password_hash: Option<String>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
    pub status: UserStatus,

    /// Account was created by a directory sign-in.
    pub is_directory_user: bool,

    pub created_at: Timestamp,
}

impl UserRecord {
    /// "First Last", falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if name.is_empty() {
            self.username.clone()
        } else {
            name
        }
    }
}
