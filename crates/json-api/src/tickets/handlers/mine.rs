//! My Tickets Handler

use salvo::prelude::*;

use crate::{
    error::ApiError,
    extensions::*,
    tickets::{errors::into_api_error, models::TicketsResponse},
};

/// My Tickets Handler
///
/// Tickets owned by the caller, closed ones included.
#[endpoint(tags("tickets"), summary = "List my tickets")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<TicketsResponse>, ApiError> {
    let state = depot.state()?;
    let caller = depot.request_context()?;

    let tickets = state
        .app
        .tickets
        .list_tickets_by_owner(caller.user.id)
        .await
        .map_err(into_api_error)?;

    Ok(Json(tickets.into_iter().collect()))
}
