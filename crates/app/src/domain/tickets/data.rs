//! Ticket Data

use portal::tickets::{TicketOrigin, TicketPriority, TicketStatus};

use crate::domain::{tickets::records::TicketId, users::records::UserId};

/// New Ticket Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    /// Reference to store; generated from `origin` when `None`.
    pub external_id: Option<String>,
    pub helpdesk_id: Option<i64>,
    pub subject: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub user_id: UserId,
    pub assigned_to_id: Option<UserId>,
    pub origin: TicketOrigin,
}

impl NewTicket {
    /// An open, medium priority ticket with a generated reference.
    #[must_use]
    pub fn new(
        subject: String,
        description: String,
        user_id: UserId,
        origin: TicketOrigin,
    ) -> Self {
        Self {
            external_id: None,
            helpdesk_id: None,
            subject,
            description,
            status: TicketStatus::default(),
            priority: TicketPriority::default(),
            user_id,
            assigned_to_id: None,
            origin,
        }
    }
}

/// Ticket Update Data
///
/// `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketUpdate {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub assigned_to_id: Option<UserId>,
    pub helpdesk_id: Option<i64>,
}

impl TicketUpdate {
    /// Whether the update changes anything the helpdesk mirrors.
    #[must_use]
    pub fn touches_helpdesk_fields(&self) -> bool {
        self.subject.is_some() || self.status.is_some() || self.priority.is_some()
    }
}

/// New Comment Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub ticket_id: TicketId,
    pub user_id: UserId,
    pub comment: String,
}
