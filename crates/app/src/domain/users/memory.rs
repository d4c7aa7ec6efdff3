//! In-memory users store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use jiff::Timestamp;
use portal::roles::UserStatus;
use tokio::sync::RwLock;

use crate::domain::users::{
    UsersService,
    data::{NewUser, UserUpdate},
    errors::UsersServiceError,
    records::{UserId, UserRecord},
};

/// Case-insensitive equality with the full Unicode folding `lower()` uses.
fn same_folded(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}

#[derive(Debug, Default)]
struct Users {
    last_id: i64,
    rows: BTreeMap<UserId, UserRecord>,
}

impl Users {
    fn taken(
        &self,
        except: Option<UserId>,
        username: Option<&str>,
        email: Option<&str>,
    ) -> bool {
        self.rows
            .values()
            .filter(|row| Some(row.id) != except)
            .any(|row| {
                username.is_some_and(|name| same_folded(&row.username, name))
                    || email.is_some_and(|email| same_folded(&row.email, email))
            })
    }
}

/// Users kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryUsersService {
    users: RwLock<Users>,
}

impl MemoryUsersService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UsersService for MemoryUsersService {
    async fn get_user(&self, user: UserId) -> Result<UserRecord, UsersServiceError> {
        self.users
            .read()
            .await
            .rows
            .get(&user)
            .cloned()
            .ok_or(UsersServiceError::NotFound)
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, UsersServiceError> {
        Ok(self
            .users
            .read()
            .await
            .rows
            .values()
            .find(|row| same_folded(&row.username, username))
            .cloned())
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserRecord>, UsersServiceError> {
        Ok(self
            .users
            .read()
            .await
            .rows
            .values()
            .find(|row| same_folded(&row.email, email))
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let mut users = self.users.write().await;

        if users.taken(None, Some(&user.username), Some(&user.email)) {
            return Err(UsersServiceError::AlreadyExists);
        }

        users.last_id += 1;

        let record = UserRecord {
            id: UserId::from_i64(users.last_id),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            company: user.company,
            phone: user.phone,
            role: user.role,
            status: user.status,
            is_directory_user: user.is_directory_user,
            created_at: Timestamp::now(),
        };

        users.rows.insert(record.id, record.clone());

        Ok(record)
    }

    async fn update_user(
        &self,
        user: UserId,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut users = self.users.write().await;

        if !users.rows.contains_key(&user) {
            return Err(UsersServiceError::NotFound);
        }

        if users.taken(Some(user), None, update.email.as_deref()) {
            return Err(UsersServiceError::AlreadyExists);
        }

        let row = users.rows.get_mut(&user).ok_or(UsersServiceError::NotFound)?;

        if let Some(email) = update.email {
            row.email = email;
        }
        if let Some(first_name) = update.first_name {
            row.first_name = Some(first_name);
        }
        if let Some(last_name) = update.last_name {
            row.last_name = Some(last_name);
        }
        if let Some(company) = update.company {
            row.company = Some(company);
        }
        if let Some(phone) = update.phone {
            row.phone = Some(phone);
        }
        if let Some(password_hash) = update.password_hash {
            row.password_hash = Some(password_hash);
        }
        if let Some(role) = update.role {
            row.role = role;
        }
        if let Some(status) = update.status {
            row.status = status;
        }

        Ok(row.clone())
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError> {
        Ok(self.users.read().await.rows.values().cloned().collect())
    }

    async fn list_users_by_status(
        &self,
        status: UserStatus,
    ) -> Result<Vec<UserRecord>, UsersServiceError> {
        Ok(self
            .users
            .read()
            .await
            .rows
            .values()
            .filter(|row| row.status == status)
            .cloned()
            .collect())
    }
}
