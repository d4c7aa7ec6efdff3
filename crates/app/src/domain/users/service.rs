//! Users service.

use async_trait::async_trait;
use mockall::automock;
use portal::roles::UserStatus;
use sqlx::PgPool;

use crate::domain::users::{
    data::{NewUser, UserUpdate},
    errors::UsersServiceError,
    records::{UserId, UserRecord},
    repository::PgUsersRepository,
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgUsersRepository::new(pool),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn get_user(&self, user: UserId) -> Result<UserRecord, UsersServiceError> {
        self.repository.get_user(user).await.map_err(Into::into)
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, UsersServiceError> {
        self.repository
            .find_user_by_username(username)
            .await
            .map_err(Into::into)
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserRecord>, UsersServiceError> {
        self.repository
            .find_user_by_email(email)
            .await
            .map_err(Into::into)
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        self.repository.create_user(user).await.map_err(Into::into)
    }

    async fn update_user(
        &self,
        user: UserId,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        self.repository
            .update_user(user, update)
            .await
            .map_err(Into::into)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError> {
        self.repository.list_users().await.map_err(Into::into)
    }

    async fn list_users_by_status(
        &self,
        status: UserStatus,
    ) -> Result<Vec<UserRecord>, UsersServiceError> {
        self.repository
            .list_users_by_status(status)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// User persistence operations.
pub trait UsersService: Send + Sync {
    /// Retrieve a single user.
    async fn get_user(&self, user: UserId) -> Result<UserRecord, UsersServiceError>;

    /// Find a user by username, ignoring case.
    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, UsersServiceError>;

    /// Find a user by email, ignoring case.
    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserRecord>, UsersServiceError>;

    /// Create a user. Username and email must be unique ignoring case.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Merge the provided fields onto an existing user.
    async fn update_user(
        &self,
        user: UserId,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// All users, oldest first.
    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError>;

    /// Users in the given state, oldest first.
    async fn list_users_by_status(
        &self,
        status: UserStatus,
    ) -> Result<Vec<UserRecord>, UsersServiceError>;
}
