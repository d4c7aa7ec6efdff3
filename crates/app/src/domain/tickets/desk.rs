//! Ticket desk: the ticket store plus the optional helpdesk mirror.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    domain::{
        tickets::{
            TicketsService,
            data::{NewComment, NewTicket, TicketUpdate},
            errors::TicketsServiceError,
            records::{CommentRecord, TicketId, TicketRecord},
        },
        users::records::UserRecord,
    },
    helpdesk::{HelpdeskAdapter, HelpdeskError},
};

#[derive(Debug, Error)]
pub enum TicketDeskError {
    #[error(transparent)]
    Tickets(#[from] TicketsServiceError),

    #[error("helpdesk request failed")]
    Helpdesk(#[from] HelpdeskError),

    #[error("ticket is not linked to the helpdesk")]
    NotLinked,
}

/// Ticket workflows that keep the helpdesk in step with the local store.
#[derive(Clone)]
pub struct TicketDesk {
    tickets: Arc<dyn TicketsService>,
    helpdesk: Option<HelpdeskAdapter>,
}

impl std::fmt::Debug for TicketDesk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketDesk")
            .field("helpdesk", &self.helpdesk)
            .finish_non_exhaustive()
    }
}

impl TicketDesk {
    #[must_use]
    pub fn new(tickets: Arc<dyn TicketsService>, helpdesk: Option<HelpdeskAdapter>) -> Self {
        Self { tickets, helpdesk }
    }

    /// Whether tickets are mirrored into a helpdesk.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.helpdesk.is_some()
    }

    /// Create a ticket. With a helpdesk configured the ticket is filed there
    /// first and nothing is stored locally if that fails.
    ///
    /// # Errors
    ///
    /// Returns an error when the helpdesk or the store rejects the ticket.
    pub async fn open_ticket(
        &self,
        mut ticket: NewTicket,
        submitter: &UserRecord,
    ) -> Result<TicketRecord, TicketDeskError> {
        if let Some(helpdesk) = &self.helpdesk {
            let filed = helpdesk.submit(&ticket, submitter).await?;

            info!(helpdesk_id = filed.id, "ticket filed in helpdesk");

            ticket.external_id = Some(filed.number.unwrap_or_else(|| filed.id.to_string()));
            ticket.helpdesk_id = Some(filed.id);
        }

        Ok(self.tickets.create_ticket(ticket).await?)
    }

    /// Apply an update locally, then mirror it when the ticket is linked.
    ///
    /// # Errors
    ///
    /// Returns an error when the store update fails, or when mirroring fails
    /// after the local update was applied.
    pub async fn revise_ticket(
        &self,
        ticket: TicketId,
        update: TicketUpdate,
    ) -> Result<TicketRecord, TicketDeskError> {
        let mirrored = update.touches_helpdesk_fields();
        let updated = self.tickets.update_ticket(ticket, update).await?;

        if let (true, Some(helpdesk), Some(helpdesk_id)) =
            (mirrored, &self.helpdesk, updated.helpdesk_id)
        {
            helpdesk.push_update(helpdesk_id, &updated).await?;
        }

        Ok(updated)
    }

    /// Store a comment, then mirror it as an article when the ticket is
    /// linked.
    ///
    /// # Errors
    ///
    /// Returns an error when the store rejects the comment, or when
    /// mirroring fails after it was stored.
    pub async fn comment_on_ticket(
        &self,
        ticket: &TicketRecord,
        author: &UserRecord,
        comment: String,
    ) -> Result<CommentRecord, TicketDeskError> {
        let stored = self
            .tickets
            .add_comment(NewComment {
                ticket_id: ticket.id,
                user_id: author.id,
                comment,
            })
            .await?;

        if let (Some(helpdesk), Some(helpdesk_id)) = (&self.helpdesk, ticket.helpdesk_id) {
            helpdesk
                .push_comment(helpdesk_id, &ticket.subject, &stored.comment)
                .await?;
        }

        Ok(stored)
    }

    /// Merge the helpdesk's view of a ticket into the local record.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDeskError::NotLinked`] when there is no helpdesk or
    /// the ticket was never mirrored.
    pub async fn sync_ticket(&self, ticket: TicketId) -> Result<TicketRecord, TicketDeskError> {
        let helpdesk = self.helpdesk.as_ref().ok_or(TicketDeskError::NotLinked)?;
        let local = self.tickets.get_ticket(ticket).await?;
        let helpdesk_id = local.helpdesk_id.ok_or(TicketDeskError::NotLinked)?;

        let update = helpdesk.fetch(helpdesk_id).await?;

        Ok(self.tickets.update_ticket(ticket, update).await?)
    }
}
