//! Tickets Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use portal::tickets::TicketStatus;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::domain::{
    columns::parse_column,
    tickets::{
        data::{NewComment, NewTicket, TicketUpdate},
        records::{CommentId, CommentRecord, TicketId, TicketRecord},
    },
    users::records::UserId,
};

const GET_TICKET_SQL: &str = include_str!("sql/get_ticket.sql");
const CREATE_TICKET_SQL: &str = include_str!("sql/create_ticket.sql");
const UPDATE_TICKET_SQL: &str = include_str!("sql/update_ticket.sql");
const TOUCH_TICKET_SQL: &str = include_str!("sql/touch_ticket.sql");
const CREATE_COMMENT_SQL: &str = include_str!("sql/create_comment.sql");
const LIST_COMMENTS_SQL: &str = include_str!("sql/list_comments.sql");
const LIST_TICKETS_BY_OWNER_SQL: &str = include_str!("sql/list_tickets_by_owner.sql");
const LIST_OPEN_TICKETS_SQL: &str = include_str!("sql/list_open_tickets.sql");
const LIST_TICKETS_BY_STATUS_SQL: &str = include_str!("sql/list_tickets_by_status.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgTicketsRepository {
    pool: PgPool,
}

impl PgTicketsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn get_ticket(&self, ticket: TicketId) -> Result<TicketRecord, sqlx::Error> {
        query_as::<Postgres, TicketRecord>(GET_TICKET_SQL)
            .bind(ticket.into_i64())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn create_ticket(
        &self,
        ticket: &NewTicket,
        external_id: &str,
    ) -> Result<TicketRecord, sqlx::Error> {
        query_as::<Postgres, TicketRecord>(CREATE_TICKET_SQL)
            .bind(external_id)
            .bind(ticket.helpdesk_id)
            .bind(&ticket.subject)
            .bind(&ticket.description)
            .bind(ticket.status.as_str())
            .bind(ticket.priority.as_str())
            .bind(ticket.user_id.into_i64())
            .bind(ticket.assigned_to_id.map(UserId::into_i64))
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn update_ticket(
        &self,
        ticket: TicketId,
        update: TicketUpdate,
    ) -> Result<TicketRecord, sqlx::Error> {
        query_as::<Postgres, TicketRecord>(UPDATE_TICKET_SQL)
            .bind(ticket.into_i64())
            .bind(update.subject)
            .bind(update.description)
            .bind(update.status.map(TicketStatus::as_str))
            .bind(update.priority.map(|priority| priority.as_str()))
            .bind(update.assigned_to_id.map(UserId::into_i64))
            .bind(update.helpdesk_id)
            .fetch_one(&self.pool)
            .await
    }

    /// Touch the parent ticket and insert the comment in one transaction, so
    /// both share the transaction timestamp.
    pub(crate) async fn add_comment(
        &self,
        comment: NewComment,
    ) -> Result<CommentRecord, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let touched = query(TOUCH_TICKET_SQL)
            .bind(comment.ticket_id.into_i64())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if touched == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        let created = query_as::<Postgres, CommentRecord>(CREATE_COMMENT_SQL)
            .bind(comment.ticket_id.into_i64())
            .bind(comment.user_id.into_i64())
            .bind(comment.comment)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    pub(crate) async fn list_comments(
        &self,
        ticket: TicketId,
    ) -> Result<Vec<CommentRecord>, sqlx::Error> {
        query_as::<Postgres, CommentRecord>(LIST_COMMENTS_SQL)
            .bind(ticket.into_i64())
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn list_tickets_by_owner(
        &self,
        user: UserId,
    ) -> Result<Vec<TicketRecord>, sqlx::Error> {
        query_as::<Postgres, TicketRecord>(LIST_TICKETS_BY_OWNER_SQL)
            .bind(user.into_i64())
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn list_open_tickets(&self) -> Result<Vec<TicketRecord>, sqlx::Error> {
        query_as::<Postgres, TicketRecord>(LIST_OPEN_TICKETS_SQL)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn list_tickets_by_status(
        &self,
        status: TicketStatus,
    ) -> Result<Vec<TicketRecord>, sqlx::Error> {
        query_as::<Postgres, TicketRecord>(LIST_TICKETS_BY_STATUS_SQL)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for TicketRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: TicketId::from_i64(row.try_get("id")?),
            external_id: row.try_get("external_id")?,
            helpdesk_id: row.try_get("helpdesk_id")?,
            subject: row.try_get("subject")?,
            description: row.try_get("description")?,
            status: parse_column(row, "status")?,
            priority: parse_column(row, "priority")?,
            user_id: UserId::from_i64(row.try_get("user_id")?),
            assigned_to_id: row
                .try_get::<Option<i64>, _>("assigned_to_id")?
                .map(UserId::from_i64),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CommentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CommentId::from_i64(row.try_get("id")?),
            ticket_id: TicketId::from_i64(row.try_get("ticket_id")?),
            user_id: UserId::from_i64(row.try_get("user_id")?),
            comment: row.try_get("comment")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
