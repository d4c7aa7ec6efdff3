//! Create Ticket Handler

use portal::tickets::{TicketOrigin, TicketPriority, TicketStatus};
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use portal_app::domain::{
    tickets::data::NewTicket,
    users::{UsersServiceError, records::UserId},
};

use crate::{
    auth::RequestContext,
    error::ApiError,
    extensions::*,
    observability::record_ticket_created,
    tickets::{errors::desk_error, handlers::check_assignee, models::TicketEnvelope},
    users::errors::into_api_error as user_error,
};

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct CreateTicketRequest {
    pub subject: String,
    pub description: String,

    /// `low`, `medium` or `high`; defaults to `medium`
    pub priority: Option<String>,

    /// Staff only. Defaults to `open`.
    pub status: Option<String>,

    /// Staff only. Owner to file the ticket for; defaults to the caller.
    pub user_id: Option<i64>,

    /// Staff only.
    pub assigned_to_id: Option<i64>,
}

pub(crate) fn parse_priority(
    priority: Option<&str>,
) -> Result<Option<TicketPriority>, ApiError> {
    priority
        .map(str::parse::<TicketPriority>)
        .transpose()
        .map_err(|_err| {
            ApiError::bad_request("Invalid priority").with_field("priority", "Unknown priority")
        })
}

pub(crate) fn parse_status(status: Option<&str>) -> Result<Option<TicketStatus>, ApiError> {
    status
        .map(str::parse::<TicketStatus>)
        .transpose()
        .map_err(|_err| {
            ApiError::bad_request("Invalid status").with_field("status", "Unknown status")
        })
}

impl CreateTicketRequest {
    fn check_required(&self) -> Result<(), ApiError> {
        let mut error = ApiError::bad_request("Validation failed");
        let mut failed = false;

        if self.subject.trim().is_empty() {
            error = error.with_field("subject", "Subject is required");
            failed = true;
        }

        if self.description.trim().is_empty() {
            error = error.with_field("description", "Description is required");
            failed = true;
        }

        if failed { Err(error) } else { Ok(()) }
    }

    /// Build the ticket for `caller`. Customer submissions always belong to
    /// the customer and start open.
    fn into_new_ticket(
        self,
        caller: &RequestContext,
        owner: UserId,
    ) -> Result<NewTicket, ApiError> {
        self.check_required()?;

        let priority = parse_priority(self.priority.as_deref())?.unwrap_or_default();
        let mut ticket = NewTicket {
            priority,
            ..NewTicket::new(
                self.subject.trim().to_string(),
                self.description.trim().to_string(),
                owner,
                TicketOrigin::for_role(caller.user.role),
            )
        };

        if caller.is_staff() {
            ticket.status = parse_status(self.status.as_deref())?.unwrap_or_default();
            ticket.assigned_to_id = self.assigned_to_id.map(UserId::from_i64);
        }

        Ok(ticket)
    }
}

/// Create Ticket Handler
///
/// With a helpdesk configured the ticket is filed there first; nothing is
/// stored when the helpdesk refuses it.
#[endpoint(
    tags("tickets"),
    summary = "Create a ticket",
    responses(
        (status_code = StatusCode::CREATED, description = "Ticket created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid payload"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Helpdesk request failed"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateTicketRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TicketEnvelope>, ApiError> {
    let state = depot.state()?;
    let caller = depot.request_context()?;
    let request = json.into_inner();

    let owner = match request.user_id {
        Some(user_id) if caller.is_staff() => state
            .app
            .users
            .get_user(UserId::from_i64(user_id))
            .await
            .map_err(|error| match error {
                UsersServiceError::NotFound => ApiError::bad_request("Validation failed")
                    .with_field("userId", "Unknown user"),
                other => user_error(other),
            })?,
        _ => caller.user.clone(),
    };

    if caller.is_staff() {
        check_assignee(state, request.assigned_to_id).await?;
    }

    let ticket = request.into_new_ticket(caller, owner.id)?;
    let origin = ticket.origin;

    let created = state
        .app
        .desk
        .open_ticket(ticket, &owner)
        .await
        .map_err(desk_error)?;

    info!(
        ticket_id = %created.id,
        external_id = %created.external_id,
        filed_by = %caller.user.id,
        "ticket created"
    );

    record_ticket_created(origin);

    res.status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}
