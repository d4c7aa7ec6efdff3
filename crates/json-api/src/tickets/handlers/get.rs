//! Get Ticket Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    error::ApiError,
    extensions::*,
    tickets::{
        errors::into_api_error,
        handlers::visible_ticket,
        models::TicketDetailResponse,
    },
};

/// Get Ticket Handler
///
/// A ticket and its comments. Customers may only open their own tickets.
#[endpoint(
    tags("tickets"),
    summary = "Get a ticket",
    responses(
        (status_code = StatusCode::OK, description = "Ticket with comments"),
        (status_code = StatusCode::FORBIDDEN, description = "Ticket belongs to someone else"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown ticket"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<TicketDetailResponse>, ApiError> {
    let state = depot.state()?;
    let caller = depot.request_context()?;

    let ticket = visible_ticket(state, caller, id.into_inner()).await?;

    let comments = state
        .app
        .tickets
        .list_comments(ticket.id)
        .await
        .map_err(into_api_error)?;

    Ok(Json(TicketDetailResponse {
        ticket: ticket.into(),
        comments: comments.into_iter().map(Into::into).collect(),
    }))
}
