//! Local sign-in for customers and admins.

use std::sync::Arc;

use portal::{
    registration::{
        Registration, Violation, Violations, check_password, is_valid_email, username_from_email,
    },
    roles::{Role, UserStatus},
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    auth::password::{PasswordError, hash_password, verify_decoy, verify_password},
    domain::users::{UsersService, UsersServiceError, data::NewUser, records::UserRecord},
};

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("registration is invalid: {0}")]
    Invalid(Violations),

    #[error("username or email is already registered")]
    Conflict,

    #[error(transparent)]
    Users(UsersServiceError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl From<UsersServiceError> for RegistrationError {
    fn from(error: UsersServiceError) -> Self {
        match error {
            UsersServiceError::AlreadyExists => Self::Conflict,
            error => Self::Users(error),
        }
    }
}

#[derive(Debug, Error)]
pub enum CustomerLoginError {
    /// Unknown email, inactive account or wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Users(#[from] UsersServiceError),
}

/// Account created by an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
    pub status: UserStatus,
}

/// Registration and password sign-in against the users store.
#[derive(Clone)]
pub struct LocalAuthenticator {
    users: Arc<dyn UsersService>,
}

impl std::fmt::Debug for LocalAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalAuthenticator").finish_non_exhaustive()
    }
}

impl LocalAuthenticator {
    #[must_use]
    pub fn new(users: Arc<dyn UsersService>) -> Self {
        Self { users }
    }

    /// Register a pending customer.
    ///
    /// # Errors
    ///
    /// Returns every violated field for invalid input, or a conflict when the
    /// email is already registered.
    pub async fn register(
        &self,
        registration: Registration,
    ) -> Result<UserRecord, RegistrationError> {
        let valid = registration.validate().map_err(RegistrationError::Invalid)?;

        if self.users.find_user_by_email(&valid.email).await?.is_some() {
            return Err(RegistrationError::Conflict);
        }

        let username = self.unique_username(&username_from_email(&valid.email)).await?;
        let password_hash = hash_password(&valid.password)?;

        let user = self
            .users
            .create_user(NewUser {
                username,
                email: valid.email,
                password_hash: Some(password_hash),
                first_name: Some(valid.first_name),
                last_name: Some(valid.last_name),
                company: Some(valid.company),
                phone: valid.phone,
                role: Role::Customer,
                status: UserStatus::Pending,
                is_directory_user: false,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "customer registered");

        Ok(user)
    }

    /// Create an account with an explicit role and status.
    ///
    /// # Errors
    ///
    /// Returns a violation for a bad email or short password, or a conflict
    /// when the username or email is taken.
    pub async fn create_account(
        &self,
        account: NewAccount,
    ) -> Result<UserRecord, RegistrationError> {
        let email = account.email.trim().to_lowercase();
        let username = account.username.trim().to_string();

        if username.is_empty() {
            return Err(RegistrationError::Invalid(
                Violation {
                    field: "username",
                    message: "Username is required",
                }
                .into(),
            ));
        }

        if !is_valid_email(&email) {
            return Err(RegistrationError::Invalid(
                Violation {
                    field: "email",
                    message: "Invalid email address",
                }
                .into(),
            ));
        }

        if let Some(violation) = check_password(&account.password) {
            return Err(RegistrationError::Invalid(violation.into()));
        }

        let password_hash = hash_password(&account.password)?;

        let user = self
            .users
            .create_user(NewUser {
                username,
                email,
                password_hash: Some(password_hash),
                first_name: account.first_name,
                last_name: account.last_name,
                company: account.company,
                phone: account.phone,
                role: account.role,
                status: account.status,
                is_directory_user: false,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "account created");

        Ok(user)
    }

    /// Sign in with email and password.
    ///
    /// Directory accounts never sign in here. Every refusal costs one Argon2
    /// verification, so timing does not tell the reasons apart.
    ///
    /// # Errors
    ///
    /// Returns the same [`CustomerLoginError::InvalidCredentials`] for an
    /// unknown email, an account that is not active and a wrong password.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, CustomerLoginError> {
        let email = email.trim().to_lowercase();

        let Some(user) = self.users.find_user_by_email(&email).await? else {
            verify_decoy(password);
            warn!(%email, "login refused: unknown email");

            return Err(CustomerLoginError::InvalidCredentials);
        };

        let hash = match local_password_hash(&user) {
            Ok(hash) => hash,
            Err(reason) => {
                verify_decoy(password);
                warn!(user_id = %user.id, status = %user.status, reason, "login refused");

                return Err(CustomerLoginError::InvalidCredentials);
            }
        };

        match verify_password(password, hash) {
            Ok(true) => {
                info!(user_id = %user.id, "login succeeded");

                Ok(user)
            }
            Ok(false) => {
                warn!(user_id = %user.id, "login refused: wrong password");

                Err(CustomerLoginError::InvalidCredentials)
            }
            Err(error) => {
                warn!(user_id = %user.id, %error, "login refused: stored hash unusable");

                Err(CustomerLoginError::InvalidCredentials)
            }
        }
    }

    /// `base`, or `base2`, `base3`, ... for the first name not taken.
    async fn unique_username(&self, base: &str) -> Result<String, UsersServiceError> {
        let mut candidate = base.to_string();
        let mut suffix = 1_u32;

        while self.users.find_user_by_username(&candidate).await?.is_some() {
            suffix += 1;
            candidate = format!("{base}{suffix}");
        }

        Ok(candidate)
    }
}

/// The hash a local sign-in is checked against, or why there is none.
fn local_password_hash(user: &UserRecord) -> Result<&str, &'static str> {
    if user.is_directory_user {
        return Err("directory account");
    }

    if !user.status.can_sign_in() {
        return Err("account not active");
    }

    user.password_hash.as_deref().ok_or("no local password")
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::password::DECOY_VERIFICATIONS,
        domain::users::{MemoryUsersService, MockUsersService, data::UserUpdate},
    };

    use super::*;

    fn registration(email: &str) -> Registration {
        Registration {
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: email.to_string(),
            company: "C".to_string(),
            phone: None,
            password: "longenough1!".to_string(),
            confirm_password: "longenough1!".to_string(),
        }
    }

    fn authenticator() -> (Arc<MemoryUsersService>, LocalAuthenticator) {
        let users = Arc::new(MemoryUsersService::new());

        (users.clone(), LocalAuthenticator::new(users))
    }

    async fn activate(users: &MemoryUsersService, user: &UserRecord) -> TestResult {
        users
            .update_user(
                user.id,
                UserUpdate {
                    status: Some(UserStatus::Active),
                    ..UserUpdate::default()
                },
            )
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn registered_customers_are_pending_with_hashed_password() -> TestResult {
        let (_, auth) = authenticator();

        let user = auth.register(registration("A@B.com")).await?;

        assert_eq!(user.status, UserStatus::Pending);
        assert_eq!(user.role, Role::Customer);
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.username, "a");
        assert!(!user.is_directory_user);

        let hash = user.password_hash.as_deref().ok_or("missing hash")?;

        assert_ne!(hash, "longenough1!");
        assert!(verify_password("longenough1!", hash)?);

        Ok(())
    }

    #[tokio::test]
    async fn invalid_registration_lists_every_field() {
        let (_, auth) = authenticator();

        let result = auth
            .register(Registration {
                first_name: " ".to_string(),
                email: "nope".to_string(),
                password: "short".to_string(),
                ..registration("x@example.com")
            })
            .await;

        let Err(RegistrationError::Invalid(violations)) = result else {
            panic!("expected validation failure, got {result:?}");
        };

        assert_eq!(
            violations.fields().collect::<Vec<_>>(),
            vec!["firstName", "email", "password", "confirmPassword"]
        );
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() -> TestResult {
        let (_, auth) = authenticator();

        auth.register(registration("a@b.com")).await?;

        let result = auth.register(registration("A@B.COM")).await;

        assert!(matches!(result, Err(RegistrationError::Conflict)));

        Ok(())
    }

    #[tokio::test]
    async fn usernames_get_numeric_suffixes() -> TestResult {
        let (_, auth) = authenticator();

        let first = auth.register(registration("jane@one.com")).await?;
        let second = auth.register(registration("jane@two.com")).await?;
        let third = auth.register(registration("jane@three.com")).await?;

        assert_eq!(first.username, "jane");
        assert_eq!(second.username, "jane2");
        assert_eq!(third.username, "jane3");

        Ok(())
    }

    #[tokio::test]
    async fn pending_accounts_cannot_sign_in() -> TestResult {
        let (users, auth) = authenticator();

        let user = auth.register(registration("a@b.com")).await?;

        assert!(matches!(
            auth.login("a@b.com", "longenough1!").await,
            Err(CustomerLoginError::InvalidCredentials)
        ));

        activate(&users, &user).await?;

        let signed_in = auth.login(" A@B.com ", "longenough1!").await?;

        assert_eq!(signed_in.id, user.id);

        Ok(())
    }

    #[tokio::test]
    async fn suspended_accounts_cannot_sign_in_even_with_correct_password() -> TestResult {
        let (users, auth) = authenticator();

        let user = auth.register(registration("a@b.com")).await?;

        users
            .update_user(
                user.id,
                UserUpdate {
                    status: Some(UserStatus::Suspended),
                    ..UserUpdate::default()
                },
            )
            .await?;

        assert!(matches!(
            auth.login("a@b.com", "longenough1!").await,
            Err(CustomerLoginError::InvalidCredentials)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() -> TestResult {
        let (users, auth) = authenticator();

        let user = auth.register(registration("a@b.com")).await?;
        activate(&users, &user).await?;

        let wrong = auth.login("a@b.com", "wrong-password").await;
        let unknown = auth.login("nobody@b.com", "longenough1!").await;

        assert_eq!(
            wrong.map(|_| ()).map_err(|error| error.to_string()),
            unknown.map(|_| ()).map_err(|error| error.to_string())
        );

        Ok(())
    }

    async fn refused_with_decoy(auth: &LocalAuthenticator, email: &str) -> TestResult<usize> {
        let before = DECOY_VERIFICATIONS.with(std::cell::Cell::get);

        assert!(matches!(
            auth.login(email, "longenough1!").await,
            Err(CustomerLoginError::InvalidCredentials)
        ));

        Ok(DECOY_VERIFICATIONS.with(std::cell::Cell::get) - before)
    }

    #[tokio::test]
    async fn every_refusal_pays_for_a_verification() -> TestResult {
        let (users, auth) = authenticator();

        auth.register(registration("pending@b.com")).await?;

        users
            .create_user(NewUser {
                username: "nohash".to_string(),
                email: "nohash@b.com".to_string(),
                password_hash: None,
                first_name: None,
                last_name: None,
                company: None,
                phone: None,
                role: Role::Customer,
                status: UserStatus::Active,
                is_directory_user: false,
            })
            .await?;

        let wrong = auth.register(registration("wrong@b.com")).await?;
        activate(&users, &wrong).await?;

        assert_eq!(refused_with_decoy(&auth, "nobody@b.com").await?, 1);
        assert_eq!(refused_with_decoy(&auth, "pending@b.com").await?, 1);
        assert_eq!(refused_with_decoy(&auth, "nohash@b.com").await?, 1);

        let before = DECOY_VERIFICATIONS.with(std::cell::Cell::get);
        assert!(auth.login("wrong@b.com", "not-the-password").await.is_err());
        assert_eq!(DECOY_VERIFICATIONS.with(std::cell::Cell::get), before);

        Ok(())
    }

    #[tokio::test]
    async fn directory_accounts_cannot_use_a_local_password() -> TestResult {
        let (users, auth) = authenticator();

        let employee = users
            .create_user(NewUser {
                username: "jdoe".to_string(),
                email: "jdoe@corp.example".to_string(),
                password_hash: Some(hash_password("mylocalpw1")?),
                first_name: None,
                last_name: None,
                company: None,
                phone: None,
                role: Role::Employee,
                status: UserStatus::Active,
                is_directory_user: true,
            })
            .await?;

        assert!(employee.is_directory_user);
        assert_eq!(refused_with_decoy(&auth, "jdoe@corp.example").await?, 1);
        assert!(matches!(
            auth.login("jdoe@corp.example", "mylocalpw1").await,
            Err(CustomerLoginError::InvalidCredentials)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn malformed_stored_hash_is_refused() -> TestResult {
        let (users, auth) = authenticator();

        let user = auth.register(registration("a@b.com")).await?;

        users
            .update_user(
                user.id,
                UserUpdate {
                    status: Some(UserStatus::Active),
                    password_hash: Some("plaintext".to_string()),
                    ..UserUpdate::default()
                },
            )
            .await?;

        assert!(matches!(
            auth.login("a@b.com", "plaintext").await,
            Err(CustomerLoginError::InvalidCredentials)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn admins_sign_in_with_created_accounts() -> TestResult {
        let (_, auth) = authenticator();

        let admin = auth
            .create_account(NewAccount {
                username: "root".to_string(),
                email: "Root@Example.com".to_string(),
                password: "correct horse".to_string(),
                first_name: None,
                last_name: None,
                company: None,
                phone: None,
                role: Role::Admin,
                status: UserStatus::Active,
            })
            .await?;

        assert_eq!(admin.email, "root@example.com");

        let signed_in = auth.login("root@example.com", "correct horse").await?;

        assert_eq!(signed_in.role, Role::Admin);

        Ok(())
    }

    #[tokio::test]
    async fn create_account_rejects_short_passwords() {
        let (_, auth) = authenticator();

        let result = auth
            .create_account(NewAccount {
                username: "root".to_string(),
                email: "root@example.com".to_string(),
                password: "short".to_string(),
                first_name: None,
                last_name: None,
                company: None,
                phone: None,
                role: Role::Admin,
                status: UserStatus::Active,
            })
            .await;

        let Err(RegistrationError::Invalid(violations)) = result else {
            panic!("expected validation failure, got {result:?}");
        };

        assert_eq!(violations.fields().collect::<Vec<_>>(), vec!["password"]);
    }

    #[tokio::test]
    async fn storage_errors_propagate() {
        let mut users = MockUsersService::new();

        users
            .expect_find_user_by_email()
            .once()
            .return_once(|_| Err(UsersServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let auth = LocalAuthenticator::new(Arc::new(users));

        assert!(matches!(
            auth.login("a@b.com", "longenough1!").await,
            Err(CustomerLoginError::Users(UsersServiceError::Sql(_)))
        ));
    }
}
