//! Helpdesk payloads

use serde::{Deserialize, Serialize};

/// Customer role id in the helpdesk.
pub const CUSTOMER_ROLE_ID: i64 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpdeskCustomerDraft {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub organization: String,
    pub phone: String,
    pub role_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HelpdeskCustomer {
    pub id: i64,

    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpdeskTicketDraft {
    pub title: String,
    pub group_id: i64,
    pub customer_id: i64,
    pub state_id: i64,
    pub priority_id: i64,
    pub article: HelpdeskArticleDraft,
}

/// Article (comment) payload. `ticket_id` is omitted when the article is
/// embedded in a new ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpdeskArticleDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<i64>,

    pub subject: String,
    pub body: String,
    pub content_type: String,
    pub internal: bool,
}

impl HelpdeskArticleDraft {
    /// Customer-visible plain text article.
    #[must_use]
    pub fn plain(ticket_id: Option<i64>, subject: &str, body: &str) -> Self {
        Self {
            ticket_id,
            subject: subject.to_string(),
            body: body.to_string(),
            content_type: "text/plain".to_string(),
            internal: false,
        }
    }
}

/// Partial ticket update. Absent fields are left untouched by the helpdesk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HelpdeskTicketPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HelpdeskTicket {
    pub id: i64,

    /// Human-facing ticket number.
    #[serde(default)]
    pub number: Option<String>,

    #[serde(default)]
    pub title: String,

    pub state_id: i64,
    pub priority_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HelpdeskArticle {
    pub id: i64,

    #[serde(default)]
    pub body: String,
}
