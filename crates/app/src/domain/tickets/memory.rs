//! In-memory tickets store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use jiff::Timestamp;
use portal::tickets::TicketStatus;
use tokio::sync::RwLock;
use tracing::warn;

use crate::domain::{
    tickets::{
        TicketsService,
        data::{NewComment, NewTicket, TicketUpdate},
        errors::TicketsServiceError,
        records::{CommentId, CommentRecord, TicketId, TicketRecord},
        reference::{MAX_REFERENCE_ATTEMPTS, generate_reference},
    },
    users::records::UserId,
};

#[derive(Debug, Default)]
struct Tickets {
    last_ticket_id: i64,
    last_comment_id: i64,
    rows: BTreeMap<TicketId, TicketRecord>,
    comments: BTreeMap<CommentId, CommentRecord>,
}

impl Tickets {
    fn reference_taken(&self, reference: &str) -> bool {
        self.rows.values().any(|row| row.external_id == reference)
    }

    fn newest_first<F>(&self, filter: F) -> Vec<TicketRecord>
    where
        F: Fn(&TicketRecord) -> bool,
    {
        let mut rows: Vec<_> = self.rows.values().filter(|row| filter(row)).cloned().collect();

        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        rows
    }
}

/// Tickets and comments kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryTicketsService {
    tickets: RwLock<Tickets>,
}

impl MemoryTicketsService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketsService for MemoryTicketsService {
    async fn create_ticket(&self, ticket: NewTicket) -> Result<TicketRecord, TicketsServiceError> {
        let mut tickets = self.tickets.write().await;

        let external_id = match ticket.external_id {
            Some(external_id) if tickets.reference_taken(&external_id) => {
                return Err(TicketsServiceError::AlreadyExists);
            }
            Some(external_id) => external_id,
            None => {
                let mut attempt = 1;

                loop {
                    let reference = generate_reference(ticket.origin);

                    if !tickets.reference_taken(&reference) {
                        break reference;
                    }

                    if attempt >= MAX_REFERENCE_ATTEMPTS {
                        return Err(TicketsServiceError::AlreadyExists);
                    }

                    warn!(reference, attempt, "ticket reference collision, retrying");

                    attempt += 1;
                }
            }
        };

        tickets.last_ticket_id += 1;

        let now = Timestamp::now();

        let record = TicketRecord {
            id: TicketId::from_i64(tickets.last_ticket_id),
            external_id,
            helpdesk_id: ticket.helpdesk_id,
            subject: ticket.subject,
            description: ticket.description,
            status: ticket.status,
            priority: ticket.priority,
            user_id: ticket.user_id,
            assigned_to_id: ticket.assigned_to_id,
            created_at: now,
            updated_at: now,
        };

        tickets.rows.insert(record.id, record.clone());

        Ok(record)
    }

    async fn get_ticket(&self, ticket: TicketId) -> Result<TicketRecord, TicketsServiceError> {
        self.tickets
            .read()
            .await
            .rows
            .get(&ticket)
            .cloned()
            .ok_or(TicketsServiceError::NotFound)
    }

    async fn update_ticket(
        &self,
        ticket: TicketId,
        update: TicketUpdate,
    ) -> Result<TicketRecord, TicketsServiceError> {
        let mut tickets = self.tickets.write().await;

        let row = tickets
            .rows
            .get_mut(&ticket)
            .ok_or(TicketsServiceError::NotFound)?;

        if let Some(subject) = update.subject {
            row.subject = subject;
        }
        if let Some(description) = update.description {
            row.description = description;
        }
        if let Some(status) = update.status {
            row.status = status;
        }
        if let Some(priority) = update.priority {
            row.priority = priority;
        }
        if let Some(assigned_to_id) = update.assigned_to_id {
            row.assigned_to_id = Some(assigned_to_id);
        }
        if let Some(helpdesk_id) = update.helpdesk_id {
            row.helpdesk_id = Some(helpdesk_id);
        }

        row.updated_at = Timestamp::now();

        Ok(row.clone())
    }

    async fn add_comment(&self, comment: NewComment) -> Result<CommentRecord, TicketsServiceError> {
        let mut tickets = self.tickets.write().await;

        let now = Timestamp::now();

        tickets
            .rows
            .get_mut(&comment.ticket_id)
            .ok_or(TicketsServiceError::NotFound)?
            .updated_at = now;

        tickets.last_comment_id += 1;

        let record = CommentRecord {
            id: CommentId::from_i64(tickets.last_comment_id),
            ticket_id: comment.ticket_id,
            user_id: comment.user_id,
            comment: comment.comment,
            created_at: now,
        };

        tickets.comments.insert(record.id, record.clone());

        Ok(record)
    }

    async fn list_comments(
        &self,
        ticket: TicketId,
    ) -> Result<Vec<CommentRecord>, TicketsServiceError> {
        Ok(self
            .tickets
            .read()
            .await
            .comments
            .values()
            .filter(|comment| comment.ticket_id == ticket)
            .cloned()
            .collect())
    }

    async fn list_tickets_by_owner(
        &self,
        user: UserId,
    ) -> Result<Vec<TicketRecord>, TicketsServiceError> {
        Ok(self
            .tickets
            .read()
            .await
            .newest_first(|row| row.user_id == user))
    }

    async fn list_open_tickets(&self) -> Result<Vec<TicketRecord>, TicketsServiceError> {
        Ok(self
            .tickets
            .read()
            .await
            .newest_first(|row| row.status != TicketStatus::Closed))
    }

    async fn list_tickets_by_status(
        &self,
        status: TicketStatus,
    ) -> Result<Vec<TicketRecord>, TicketsServiceError> {
        Ok(self
            .tickets
            .read()
            .await
            .newest_first(|row| row.status == status))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use portal::tickets::{TicketOrigin, TicketPriority};
    use testresult::TestResult;

    use super::*;

    fn new_ticket(subject: &str, owner: i64) -> NewTicket {
        NewTicket::new(
            subject.to_string(),
            format!("{subject} body"),
            UserId::from_i64(owner),
            TicketOrigin::Customer,
        )
    }

    #[tokio::test]
    async fn generated_references_are_unique() -> TestResult {
        let tickets = MemoryTicketsService::new();
        let mut seen = HashSet::new();

        for n in 0..50 {
            let ticket = tickets.create_ticket(new_ticket(&format!("T{n}"), 1)).await?;

            assert!(ticket.external_id.starts_with("CUS-"));
            assert!(seen.insert(ticket.external_id), "duplicate reference");
        }

        Ok(())
    }

    #[tokio::test]
    async fn explicit_reference_is_kept_and_must_be_unique() -> TestResult {
        let tickets = MemoryTicketsService::new();

        let created = tickets
            .create_ticket(NewTicket {
                external_id: Some("40017".to_string()),
                helpdesk_id: Some(17),
                ..new_ticket("Mirrored", 1)
            })
            .await?;

        assert_eq!(created.external_id, "40017");
        assert_eq!(created.helpdesk_id, Some(17));

        let duplicate = tickets
            .create_ticket(NewTicket {
                external_id: Some("40017".to_string()),
                ..new_ticket("Again", 1)
            })
            .await;

        assert!(matches!(duplicate, Err(TicketsServiceError::AlreadyExists)));

        Ok(())
    }

    #[tokio::test]
    async fn new_tickets_default_to_open_medium() -> TestResult {
        let tickets = MemoryTicketsService::new();

        let ticket = tickets.create_ticket(new_ticket("Defaults", 1)).await?;

        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.priority, TicketPriority::Medium);
        assert_eq!(ticket.created_at, ticket.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn comment_refreshes_ticket_updated_at() -> TestResult {
        let tickets = MemoryTicketsService::new();

        let ticket = tickets.create_ticket(new_ticket("Subject", 1)).await?;

        let comment = tickets
            .add_comment(NewComment {
                ticket_id: ticket.id,
                user_id: UserId::from_i64(1),
                comment: "Any news?".to_string(),
            })
            .await?;

        let reloaded = tickets.get_ticket(ticket.id).await?;

        assert!(reloaded.updated_at >= comment.created_at);
        assert!(reloaded.updated_at >= ticket.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn comment_on_missing_ticket_is_not_found() {
        let tickets = MemoryTicketsService::new();

        let result = tickets
            .add_comment(NewComment {
                ticket_id: TicketId::from_i64(9),
                user_id: UserId::from_i64(1),
                comment: "Hello".to_string(),
            })
            .await;

        assert!(matches!(result, Err(TicketsServiceError::NotFound)));
    }

    #[tokio::test]
    async fn comments_are_listed_oldest_first_per_ticket() -> TestResult {
        let tickets = MemoryTicketsService::new();

        let first = tickets.create_ticket(new_ticket("First", 1)).await?;
        let second = tickets.create_ticket(new_ticket("Second", 1)).await?;

        for (ticket, text) in [(first.id, "a"), (second.id, "b"), (first.id, "c")] {
            tickets
                .add_comment(NewComment {
                    ticket_id: ticket,
                    user_id: UserId::from_i64(1),
                    comment: text.to_string(),
                })
                .await?;
        }

        let texts: Vec<_> = tickets
            .list_comments(first.id)
            .await?
            .into_iter()
            .map(|comment| comment.comment)
            .collect();

        assert_eq!(texts, vec!["a", "c"]);

        Ok(())
    }

    #[tokio::test]
    async fn listings_are_newest_first_and_filtered() -> TestResult {
        let tickets = MemoryTicketsService::new();

        let older = tickets.create_ticket(new_ticket("Older", 1)).await?;
        let other = tickets.create_ticket(new_ticket("Other owner", 2)).await?;
        let newer = tickets.create_ticket(new_ticket("Newer", 1)).await?;

        tickets
            .update_ticket(
                other.id,
                TicketUpdate {
                    status: Some(TicketStatus::Closed),
                    ..TicketUpdate::default()
                },
            )
            .await?;

        let owned: Vec<_> = tickets
            .list_tickets_by_owner(UserId::from_i64(1))
            .await?
            .into_iter()
            .map(|ticket| ticket.id)
            .collect();

        assert_eq!(owned, vec![newer.id, older.id]);

        let open: Vec<_> = tickets
            .list_open_tickets()
            .await?
            .into_iter()
            .map(|ticket| ticket.id)
            .collect();

        assert_eq!(open, vec![newer.id, older.id]);

        let closed: Vec<_> = tickets
            .list_tickets_by_status(TicketStatus::Closed)
            .await?
            .into_iter()
            .map(|ticket| ticket.id)
            .collect();

        assert_eq!(closed, vec![other.id]);

        Ok(())
    }

    #[tokio::test]
    async fn update_merges_and_touches() -> TestResult {
        let tickets = MemoryTicketsService::new();

        let ticket = tickets.create_ticket(new_ticket("Subject", 1)).await?;

        let updated = tickets
            .update_ticket(
                ticket.id,
                TicketUpdate {
                    priority: Some(TicketPriority::High),
                    assigned_to_id: Some(UserId::from_i64(5)),
                    ..TicketUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.subject, "Subject");
        assert_eq!(updated.priority, TicketPriority::High);
        assert_eq!(updated.assigned_to_id, Some(UserId::from_i64(5)));
        assert!(updated.updated_at >= ticket.updated_at);

        Ok(())
    }
}
