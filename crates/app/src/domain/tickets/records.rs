//! Ticket Records

use jiff::Timestamp;
use portal::tickets::{TicketPriority, TicketStatus};

use crate::{domain::users::records::UserId, ids::TypedId};

/// Ticket ID
pub type TicketId = TypedId<TicketRecord>;

/// Ticket Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRecord {
    pub id: TicketId,

    /// Human-facing reference, or the helpdesk number for mirrored tickets.
    pub external_id: String,

    /// Helpdesk ticket id when the ticket is mirrored.
    pub helpdesk_id: Option<i64>,

    pub subject: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,

    /// Submitter and owner.
    pub user_id: UserId,

    pub assigned_to_id: Option<UserId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Ticket Comment ID
pub type CommentId = TypedId<CommentRecord>;

/// Ticket Comment Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub id: CommentId,
    pub ticket_id: TicketId,
    pub user_id: UserId,
    pub comment: String,
    pub created_at: Timestamp,
}
