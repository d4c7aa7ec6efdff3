//! Subscriptions service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::domain::{
    subscriptions::{
        data::NewSubscription,
        errors::SubscriptionsServiceError,
        records::{SubscriptionId, SubscriptionRecord},
        repository::PgSubscriptionsRepository,
    },
    users::records::UserId,
};

#[derive(Debug, Clone)]
pub struct PgSubscriptionsService {
    repository: PgSubscriptionsRepository,
}

impl PgSubscriptionsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgSubscriptionsRepository::new(pool),
        }
    }
}

#[async_trait]
impl SubscriptionsService for PgSubscriptionsService {
    async fn get_subscription(
        &self,
        subscription: SubscriptionId,
    ) -> Result<SubscriptionRecord, SubscriptionsServiceError> {
        self.repository
            .get_subscription(subscription)
            .await
            .map_err(Into::into)
    }

    async fn list_subscriptions_by_user(
        &self,
        user: UserId,
    ) -> Result<Vec<SubscriptionRecord>, SubscriptionsServiceError> {
        self.repository
            .list_subscriptions_by_user(user)
            .await
            .map_err(Into::into)
    }

    async fn create_subscription(
        &self,
        subscription: NewSubscription,
    ) -> Result<SubscriptionRecord, SubscriptionsServiceError> {
        self.repository
            .create_subscription(subscription)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
pub trait SubscriptionsService: Send + Sync {
    async fn get_subscription(
        &self,
        subscription: SubscriptionId,
    ) -> Result<SubscriptionRecord, SubscriptionsServiceError>;

    /// Subscriptions owned by a user, oldest first.
    async fn list_subscriptions_by_user(
        &self,
        user: UserId,
    ) -> Result<Vec<SubscriptionRecord>, SubscriptionsServiceError>;

    async fn create_subscription(
        &self,
        subscription: NewSubscription,
    ) -> Result<SubscriptionRecord, SubscriptionsServiceError>;
}
