//! Tickets service.

use async_trait::async_trait;
use mockall::automock;
use portal::tickets::TicketStatus;
use sqlx::PgPool;
use tracing::warn;

use crate::domain::{
    tickets::{
        data::{NewComment, NewTicket, TicketUpdate},
        errors::TicketsServiceError,
        records::{CommentRecord, TicketId, TicketRecord},
        reference::{MAX_REFERENCE_ATTEMPTS, generate_reference},
        repository::PgTicketsRepository,
    },
    users::records::UserId,
};

#[derive(Debug, Clone)]
pub struct PgTicketsService {
    repository: PgTicketsRepository,
}

impl PgTicketsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgTicketsRepository::new(pool),
        }
    }
}

#[async_trait]
impl TicketsService for PgTicketsService {
    async fn create_ticket(&self, ticket: NewTicket) -> Result<TicketRecord, TicketsServiceError> {
        if let Some(external_id) = ticket.external_id.as_deref() {
            return self
                .repository
                .create_ticket(&ticket, external_id)
                .await
                .map_err(Into::into);
        }

        let mut attempt = 1;

        loop {
            let reference = generate_reference(ticket.origin);

            match self.repository.create_ticket(&ticket, &reference).await {
                Err(error) => match TicketsServiceError::from(error) {
                    TicketsServiceError::AlreadyExists if attempt < MAX_REFERENCE_ATTEMPTS => {
                        warn!(reference, attempt, "ticket reference collision, retrying");

                        attempt += 1;
                    }
                    error => return Err(error),
                },
                Ok(created) => return Ok(created),
            }
        }
    }

    async fn get_ticket(&self, ticket: TicketId) -> Result<TicketRecord, TicketsServiceError> {
        self.repository.get_ticket(ticket).await.map_err(Into::into)
    }

    async fn update_ticket(
        &self,
        ticket: TicketId,
        update: TicketUpdate,
    ) -> Result<TicketRecord, TicketsServiceError> {
        self.repository
            .update_ticket(ticket, update)
            .await
            .map_err(Into::into)
    }

    async fn add_comment(&self, comment: NewComment) -> Result<CommentRecord, TicketsServiceError> {
        self.repository.add_comment(comment).await.map_err(Into::into)
    }

    async fn list_comments(
        &self,
        ticket: TicketId,
    ) -> Result<Vec<CommentRecord>, TicketsServiceError> {
        self.repository
            .list_comments(ticket)
            .await
            .map_err(Into::into)
    }

    async fn list_tickets_by_owner(
        &self,
        user: UserId,
    ) -> Result<Vec<TicketRecord>, TicketsServiceError> {
        self.repository
            .list_tickets_by_owner(user)
            .await
            .map_err(Into::into)
    }

    async fn list_open_tickets(&self) -> Result<Vec<TicketRecord>, TicketsServiceError> {
        self.repository.list_open_tickets().await.map_err(Into::into)
    }

    async fn list_tickets_by_status(
        &self,
        status: TicketStatus,
    ) -> Result<Vec<TicketRecord>, TicketsServiceError> {
        self.repository
            .list_tickets_by_status(status)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// Ticket and comment persistence operations.
///
/// No access control happens here; callers check ownership.
pub trait TicketsService: Send + Sync {
    /// Persist a ticket, generating a unique reference when none is given.
    async fn create_ticket(&self, ticket: NewTicket) -> Result<TicketRecord, TicketsServiceError>;

    /// Retrieve a single ticket.
    async fn get_ticket(&self, ticket: TicketId) -> Result<TicketRecord, TicketsServiceError>;

    /// Merge the provided fields and refresh `updated_at`.
    async fn update_ticket(
        &self,
        ticket: TicketId,
        update: TicketUpdate,
    ) -> Result<TicketRecord, TicketsServiceError>;

    /// Store a comment and refresh the parent ticket's `updated_at`.
    async fn add_comment(&self, comment: NewComment) -> Result<CommentRecord, TicketsServiceError>;

    /// Comments on a ticket, oldest first.
    async fn list_comments(
        &self,
        ticket: TicketId,
    ) -> Result<Vec<CommentRecord>, TicketsServiceError>;

    /// Tickets owned by a user, newest first.
    async fn list_tickets_by_owner(
        &self,
        user: UserId,
    ) -> Result<Vec<TicketRecord>, TicketsServiceError>;

    /// Tickets that are not closed, newest first.
    async fn list_open_tickets(&self) -> Result<Vec<TicketRecord>, TicketsServiceError>;

    /// Tickets in the given state, newest first.
    async fn list_tickets_by_status(
        &self,
        status: TicketStatus,
    ) -> Result<Vec<TicketRecord>, TicketsServiceError>;
}

#[cfg(test)]
mod tests {
    use portal::tickets::{TicketOrigin, TicketPriority};
    use testresult::TestResult;

    use crate::domain::users::UsersService;
    use crate::test::{TestContext, helpers::new_customer};

    use super::*;

    #[tokio::test]
    #[ignore = "requires a container runtime for PostgreSQL"]
    async fn create_ticket_generates_reference() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.users.create_user(new_customer("ada", "ada@example.com")).await?;

        let ticket = ctx
            .tickets
            .create_ticket(NewTicket {
                priority: TicketPriority::High,
                ..NewTicket::new(
                    "Printer down".to_string(),
                    "Third floor".to_string(),
                    owner.id,
                    TicketOrigin::Customer,
                )
            })
            .await?;

        assert!(ticket.external_id.starts_with("CUS-"), "got {}", ticket.external_id);
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.priority, TicketPriority::High);
        assert_eq!(ticket.user_id, owner.id);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime for PostgreSQL"]
    async fn create_ticket_for_unknown_owner_is_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .tickets
            .create_ticket(NewTicket::new(
                "Subject".to_string(),
                "Body".to_string(),
                UserId::from_i64(404),
                TicketOrigin::Staff,
            ))
            .await;

        assert!(
            matches!(result, Err(TicketsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires a container runtime for PostgreSQL"]
    async fn add_comment_bumps_updated_at() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.users.create_user(new_customer("ada", "ada@example.com")).await?;

        let ticket = ctx
            .tickets
            .create_ticket(NewTicket::new(
                "Subject".to_string(),
                "Body".to_string(),
                owner.id,
                TicketOrigin::Customer,
            ))
            .await?;

        let comment = ctx
            .tickets
            .add_comment(NewComment {
                ticket_id: ticket.id,
                user_id: owner.id,
                comment: "Any news?".to_string(),
            })
            .await?;

        let reloaded = ctx.tickets.get_ticket(ticket.id).await?;

        assert!(reloaded.updated_at >= comment.created_at);
        assert_eq!(ctx.tickets.list_comments(ticket.id).await?, vec![comment]);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime for PostgreSQL"]
    async fn add_comment_to_unknown_ticket_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.users.create_user(new_customer("ada", "ada@example.com")).await?;

        let result = ctx
            .tickets
            .add_comment(NewComment {
                ticket_id: TicketId::from_i64(404),
                user_id: owner.id,
                comment: "Hello".to_string(),
            })
            .await;

        assert!(
            matches!(result, Err(TicketsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime for PostgreSQL"]
    async fn open_tickets_exclude_closed() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.users.create_user(new_customer("ada", "ada@example.com")).await?;

        let open = ctx
            .tickets
            .create_ticket(NewTicket::new(
                "Open".to_string(),
                "Body".to_string(),
                owner.id,
                TicketOrigin::Customer,
            ))
            .await?;

        let closed = ctx
            .tickets
            .create_ticket(NewTicket::new(
                "Closed".to_string(),
                "Body".to_string(),
                owner.id,
                TicketOrigin::Customer,
            ))
            .await?;

        ctx.tickets
            .update_ticket(
                closed.id,
                TicketUpdate {
                    status: Some(TicketStatus::Closed),
                    ..TicketUpdate::default()
                },
            )
            .await?;

        let ids: Vec<_> = ctx
            .tickets
            .list_open_tickets()
            .await?
            .into_iter()
            .map(|ticket| ticket.id)
            .collect();

        assert_eq!(ids, vec![open.id]);

        let closed_ids: Vec<_> = ctx
            .tickets
            .list_tickets_by_status(TicketStatus::Closed)
            .await?
            .into_iter()
            .map(|ticket| ticket.id)
            .collect();

        assert_eq!(closed_ids, vec![closed.id]);

        Ok(())
    }
}
