//! List Tickets Handler

use portal::tickets::TicketStatus;
use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    error::ApiError,
    extensions::*,
    tickets::{errors::into_api_error, models::TicketsResponse},
};

/// List Tickets Handler
///
/// Tickets that are not closed, or every ticket in `status` when given.
#[endpoint(
    tags("tickets"),
    summary = "List tickets",
    responses(
        (status_code = StatusCode::OK, description = "Tickets, newest first"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<TicketsResponse>, ApiError> {
    let state = depot.state()?;

    let status = status
        .into_inner()
        .map(|status| status.parse::<TicketStatus>())
        .transpose()
        .map_err(|_err| {
            ApiError::bad_request("Invalid status").with_field("status", "Unknown status")
        })?;

    let tickets = match status {
        Some(status) => state.app.tickets.list_tickets_by_status(status).await,
        None => state.app.tickets.list_open_tickets().await,
    }
    .map_err(into_api_error)?;

    Ok(Json(tickets.into_iter().collect()))
}
