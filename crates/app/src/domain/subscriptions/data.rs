//! Subscription Data

use jiff::Timestamp;

use crate::domain::users::records::UserId;

/// New Subscription Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub renewal_date: Option<Timestamp>,
}
