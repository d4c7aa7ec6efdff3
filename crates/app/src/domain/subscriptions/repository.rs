//! Subscriptions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::domain::{
    subscriptions::{
        data::NewSubscription,
        records::{SubscriptionId, SubscriptionRecord},
    },
    users::records::UserId,
};

const GET_SUBSCRIPTION_SQL: &str = include_str!("sql/get_subscription.sql");
const LIST_SUBSCRIPTIONS_BY_USER_SQL: &str = include_str!("sql/list_subscriptions_by_user.sql");
const CREATE_SUBSCRIPTION_SQL: &str = include_str!("sql/create_subscription.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgSubscriptionsRepository {
    pool: PgPool,
}

impl PgSubscriptionsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn get_subscription(
        &self,
        subscription: SubscriptionId,
    ) -> Result<SubscriptionRecord, sqlx::Error> {
        query_as::<Postgres, SubscriptionRecord>(GET_SUBSCRIPTION_SQL)
            .bind(subscription.into_i64())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn list_subscriptions_by_user(
        &self,
        user: UserId,
    ) -> Result<Vec<SubscriptionRecord>, sqlx::Error> {
        query_as::<Postgres, SubscriptionRecord>(LIST_SUBSCRIPTIONS_BY_USER_SQL)
            .bind(user.into_i64())
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn create_subscription(
        &self,
        subscription: NewSubscription,
    ) -> Result<SubscriptionRecord, sqlx::Error> {
        query_as::<Postgres, SubscriptionRecord>(CREATE_SUBSCRIPTION_SQL)
            .bind(subscription.user_id.into_i64())
            .bind(subscription.name)
            .bind(subscription.description)
            .bind(subscription.status)
            .bind(subscription.renewal_date.map(SqlxTimestamp::from))
            .fetch_one(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for SubscriptionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: SubscriptionId::from_i64(row.try_get("id")?),
            user_id: UserId::from_i64(row.try_get("user_id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            status: row.try_get("status")?,
            renewal_date: row
                .try_get::<Option<SqlxTimestamp>, _>("renewal_date")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
