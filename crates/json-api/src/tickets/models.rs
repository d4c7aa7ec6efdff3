//! Ticket Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use portal_app::domain::tickets::records::{CommentRecord, TicketRecord};

/// A ticket as exposed over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TicketResponse {
    pub id: i64,

    /// Human-facing reference such as `CUS-7Q2K9ZPA`, or the helpdesk number.
    pub external_id: String,

    pub helpdesk_id: Option<i64>,
    pub subject: String,
    pub description: String,

    /// `open`, `in_progress`, `resolved` or `closed`
    pub status: String,

    /// `low`, `medium` or `high`
    pub priority: String,

    /// Owner of the ticket.
    pub user_id: i64,

    pub assigned_to_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<TicketRecord> for TicketResponse {
    fn from(ticket: TicketRecord) -> Self {
        Self {
            id: ticket.id.into_i64(),
            external_id: ticket.external_id,
            helpdesk_id: ticket.helpdesk_id,
            subject: ticket.subject,
            description: ticket.description,
            status: ticket.status.to_string(),
            priority: ticket.priority.to_string(),
            user_id: ticket.user_id.into_i64(),
            assigned_to_id: ticket.assigned_to_id.map(|user| user.into_i64()),
            created_at: ticket.created_at.to_string(),
            updated_at: ticket.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct TicketEnvelope {
    pub ticket: TicketResponse,
}

impl From<TicketRecord> for TicketEnvelope {
    fn from(ticket: TicketRecord) -> Self {
        Self {
            ticket: ticket.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct TicketsResponse {
    pub tickets: Vec<TicketResponse>,
}

impl FromIterator<TicketRecord> for TicketsResponse {
    fn from_iter<I: IntoIterator<Item = TicketRecord>>(tickets: I) -> Self {
        Self {
            tickets: tickets.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentResponse {
    pub id: i64,
    pub ticket_id: i64,

    /// Author of the comment.
    pub user_id: i64,

    pub comment: String,
    pub created_at: String,
}

impl From<CommentRecord> for CommentResponse {
    fn from(comment: CommentRecord) -> Self {
        Self {
            id: comment.id.into_i64(),
            ticket_id: comment.ticket_id.into_i64(),
            user_id: comment.user_id.into_i64(),
            comment: comment.comment,
            created_at: comment.created_at.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct CommentEnvelope {
    pub comment: CommentResponse,
}

/// A ticket with its conversation, oldest comment first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct TicketDetailResponse {
    pub ticket: TicketResponse,
    pub comments: Vec<CommentResponse>,
}

/// Dashboard counters over tickets that are not closed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TicketStats {
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub total: usize,

    /// Staff only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_priority: Option<usize>,

    /// Staff only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_me: Option<usize>,
}
