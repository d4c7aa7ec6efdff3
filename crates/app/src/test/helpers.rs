//! Test Helpers

use portal::roles::{Role, UserStatus};

use crate::domain::users::data::NewUser;

/// A pending customer with a placeholder name.
pub(crate) fn new_customer(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: None,
        first_name: Some("Test".to_string()),
        last_name: Some("Customer".to_string()),
        company: Some("Example Ltd".to_string()),
        phone: None,
        role: Role::Customer,
        status: UserStatus::Pending,
        is_directory_user: false,
    }
}
