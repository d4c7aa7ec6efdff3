//! Subscription Records

use jiff::Timestamp;

use crate::{domain::users::records::UserId, ids::TypedId};

/// Subscription ID
pub type SubscriptionId = TypedId<SubscriptionRecord>;

/// Subscription Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRecord {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,

    /// Free-text status, e.g. "active" or "expired".
    pub status: String,

    pub renewal_date: Option<Timestamp>,
    pub created_at: Timestamp,
}
