//! Ticket Handlers

use portal_app::domain::{
    tickets::records::{TicketId, TicketRecord},
    users::{UsersServiceError, records::UserId},
};

use crate::{
    auth::RequestContext, error::ApiError, state::State, tickets::errors::into_api_error,
    users::errors::into_api_error as user_error,
};

pub(crate) mod comment;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod mine;
pub(crate) mod stats;
pub(crate) mod sync;
pub(crate) mod update;

/// Load a ticket the caller may see: staff see every ticket, customers only
/// their own.
pub(crate) async fn visible_ticket(
    state: &State,
    caller: &RequestContext,
    id: i64,
) -> Result<TicketRecord, ApiError> {
    let ticket = state
        .app
        .tickets
        .get_ticket(TicketId::from_i64(id))
        .await
        .map_err(into_api_error)?;

    if !caller.is_staff() && ticket.user_id != caller.user.id {
        return Err(ApiError::access_denied());
    }

    Ok(ticket)
}

/// `assignedToId` has to name an existing staff account.
pub(crate) async fn check_assignee(state: &State, assignee: Option<i64>) -> Result<(), ApiError> {
    let Some(id) = assignee else {
        return Ok(());
    };

    match state.app.users.get_user(UserId::from_i64(id)).await {
        Ok(user) if user.role.is_staff() => Ok(()),
        Ok(_) | Err(UsersServiceError::NotFound) => {
            Err(ApiError::bad_request("Validation failed")
                .with_field("assignedToId", "Assignee must be an employee or admin"))
        }
        Err(other) => Err(user_error(other)),
    }
}
