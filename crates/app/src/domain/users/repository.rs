//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use portal::roles::UserStatus;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::domain::{
    columns::parse_column,
    users::{
        data::{NewUser, UserUpdate},
        records::{UserId, UserRecord},
    },
};

const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const FIND_USER_BY_USERNAME_SQL: &str = include_str!("sql/find_user_by_username.sql");
const FIND_USER_BY_EMAIL_SQL: &str = include_str!("sql/find_user_by_email.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const UPDATE_USER_SQL: &str = include_str!("sql/update_user.sql");
const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");
const LIST_USERS_BY_STATUS_SQL: &str = include_str!("sql/list_users_by_status.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn get_user(&self, user: UserId) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_i64())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(FIND_USER_BY_USERNAME_SQL)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(FIND_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn create_user(&self, user: NewUser) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.username)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.first_name)
            .bind(user.last_name)
            .bind(user.company)
            .bind(user.phone)
            .bind(user.role.as_str())
            .bind(user.status.as_str())
            .bind(user.is_directory_user)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn update_user(
        &self,
        user: UserId,
        update: UserUpdate,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(UPDATE_USER_SQL)
            .bind(user.into_i64())
            .bind(update.email)
            .bind(update.first_name)
            .bind(update.last_name)
            .bind(update.company)
            .bind(update.phone)
            .bind(update.password_hash)
            .bind(update.role.map(|role| role.as_str()))
            .bind(update.status.map(|status| status.as_str()))
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn list_users(&self) -> Result<Vec<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(LIST_USERS_SQL)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn list_users_by_status(
        &self,
        status: UserStatus,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(LIST_USERS_BY_STATUS_SQL)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: UserId::from_i64(row.try_get("id")?),
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            company: row.try_get("company")?,
            phone: row.try_get("phone")?,
            role: parse_column(row, "role")?,
            status: parse_column(row, "status")?,
            is_directory_user: row.try_get("is_directory_user")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
