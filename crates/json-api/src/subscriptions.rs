//! Subscriptions

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;

use portal_app::domain::subscriptions::{
    SubscriptionsServiceError, records::SubscriptionRecord,
};

use crate::{error::ApiError, extensions::*};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubscriptionResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub renewal_date: Option<String>,
    pub created_at: String,
}

impl From<SubscriptionRecord> for SubscriptionResponse {
    fn from(subscription: SubscriptionRecord) -> Self {
        Self {
            id: subscription.id.into_i64(),
            name: subscription.name,
            description: subscription.description,
            status: subscription.status,
            renewal_date: subscription.renewal_date.map(|date| date.to_string()),
            created_at: subscription.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscriptionsResponse {
    pub subscriptions: Vec<SubscriptionResponse>,
}

/// My Subscriptions Handler
#[endpoint(tags("subscriptions"), summary = "List my subscriptions")]
pub(crate) async fn mine(depot: &mut Depot) -> Result<Json<SubscriptionsResponse>, ApiError> {
    let state = depot.state()?;
    let caller = depot.request_context()?;

    let subscriptions = state
        .app
        .subscriptions
        .list_subscriptions_by_user(caller.user.id)
        .await
        .map_err(|source: SubscriptionsServiceError| {
            error!(user_id = %caller.user.id, "failed to list subscriptions: {source}");

            ApiError::internal()
        })?;

    Ok(Json(SubscriptionsResponse {
        subscriptions: subscriptions.into_iter().map(Into::into).collect(),
    }))
}
