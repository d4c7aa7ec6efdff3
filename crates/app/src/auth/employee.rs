//! Employee sign-in through the directory.

use std::sync::Arc;

use portal::roles::{Role, UserStatus};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    auth::{
        directory::{DirectoryAuthError, DirectoryAuthenticator, DirectoryIdentity},
        password::{PasswordError, hash_password, placeholder_password},
    },
    domain::users::{UsersService, UsersServiceError, data::NewUser, records::UserRecord},
};

#[derive(Debug, Error)]
pub enum EmployeeLoginError {
    #[error(transparent)]
    Directory(#[from] DirectoryAuthError),

    /// The local account exists but may not sign in.
    #[error("account is not active")]
    Inactive,

    /// The directory account collides with a local, non-directory account.
    #[error("directory account conflicts with an existing local account")]
    AccountConflict,

    #[error(transparent)]
    Users(UsersServiceError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl From<UsersServiceError> for EmployeeLoginError {
    fn from(error: UsersServiceError) -> Self {
        match error {
            UsersServiceError::AlreadyExists => Self::AccountConflict,
            error => Self::Users(error),
        }
    }
}

/// Directory sign-in that provisions a local user on first success.
#[derive(Clone)]
pub struct EmployeeAuthenticator {
    directory: Option<DirectoryAuthenticator>,
    users: Arc<dyn UsersService>,
}

impl std::fmt::Debug for EmployeeAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployeeAuthenticator")
            .field("directory", &self.directory)
            .finish_non_exhaustive()
    }
}

impl EmployeeAuthenticator {
    #[must_use]
    pub fn new(directory: Option<DirectoryAuthenticator>, users: Arc<dyn UsersService>) -> Self {
        Self { directory, users }
    }

    /// Whether a directory is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.directory.is_some()
    }

    /// Sign in with directory credentials.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryAuthError::Unavailable`] when no directory is
    /// configured, the directory's own failures, or
    /// [`EmployeeLoginError::Inactive`] for a local account that is not
    /// active.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserRecord, EmployeeLoginError> {
        let directory = self
            .directory
            .as_ref()
            .ok_or(DirectoryAuthError::Unavailable)?;

        let identity = directory.authenticate(username, password).await?;

        match self.users.find_user_by_username(&identity.username).await? {
            Some(user) if !user.is_directory_user => {
                warn!(user_id = %user.id, "directory sign-in matches a local account");

                Err(EmployeeLoginError::AccountConflict)
            }
            Some(user) if !user.status.can_sign_in() => {
                warn!(
                    user_id = %user.id,
                    status = %user.status,
                    "login refused: account not active"
                );

                Err(EmployeeLoginError::Inactive)
            }
            Some(user) => Ok(user),
            None => self.provision(identity).await,
        }
    }

    async fn provision(
        &self,
        identity: DirectoryIdentity,
    ) -> Result<UserRecord, EmployeeLoginError> {
        let (first_name, last_name) = split_full_name(&identity.full_name);

        let user = self
            .users
            .create_user(NewUser {
                username: identity.username,
                email: identity.email,
                password_hash: Some(hash_password(&placeholder_password())?),
                first_name,
                last_name,
                company: None,
                phone: None,
                role: Role::Employee,
                status: UserStatus::Active,
                is_directory_user: true,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "employee provisioned from directory");

        Ok(user)
    }
}

fn split_full_name(full_name: &str) -> (Option<String>, Option<String>) {
    let full_name = full_name.trim();

    match full_name.split_once(char::is_whitespace) {
        Some((first, last)) => (Some(first.to_string()), Some(last.trim().to_string())),
        None if full_name.is_empty() => (None, None),
        None => (Some(full_name.to_string()), None),
    }
}
