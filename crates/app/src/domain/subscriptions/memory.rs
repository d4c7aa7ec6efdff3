//! In-memory subscriptions store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::RwLock;

use crate::domain::{
    subscriptions::{
        SubscriptionsService,
        data::NewSubscription,
        errors::SubscriptionsServiceError,
        records::{SubscriptionId, SubscriptionRecord},
    },
    users::records::UserId,
};

#[derive(Debug, Default)]
struct Subscriptions {
    last_id: i64,
    rows: BTreeMap<SubscriptionId, SubscriptionRecord>,
}

/// Subscriptions kept in process memory.
#[derive(Debug, Default)]
pub struct MemorySubscriptionsService {
    subscriptions: RwLock<Subscriptions>,
}

impl MemorySubscriptionsService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionsService for MemorySubscriptionsService {
    async fn get_subscription(
        &self,
        subscription: SubscriptionId,
    ) -> Result<SubscriptionRecord, SubscriptionsServiceError> {
        self.subscriptions
            .read()
            .await
            .rows
            .get(&subscription)
            .cloned()
            .ok_or(SubscriptionsServiceError::NotFound)
    }

    async fn list_subscriptions_by_user(
        &self,
        user: UserId,
    ) -> Result<Vec<SubscriptionRecord>, SubscriptionsServiceError> {
        Ok(self
            .subscriptions
            .read()
            .await
            .rows
            .values()
            .filter(|row| row.user_id == user)
            .cloned()
            .collect())
    }

    async fn create_subscription(
        &self,
        subscription: NewSubscription,
    ) -> Result<SubscriptionRecord, SubscriptionsServiceError> {
        let mut subscriptions = self.subscriptions.write().await;

        subscriptions.last_id += 1;

        let record = SubscriptionRecord {
            id: SubscriptionId::from_i64(subscriptions.last_id),
            user_id: subscription.user_id,
            name: subscription.name,
            description: subscription.description,
            status: subscription.status,
            renewal_date: subscription.renewal_date,
            created_at: Timestamp::now(),
        };

        subscriptions.rows.insert(record.id, record.clone());

        Ok(record)
    }
}
