//! Ticket Errors

use tracing::{error, warn};

use portal_app::domain::tickets::{TicketDeskError, TicketsServiceError};

use crate::{error::ApiError, observability::record_helpdesk_failure};

pub(crate) fn into_api_error(error: TicketsServiceError) -> ApiError {
    match error {
        TicketsServiceError::NotFound => ApiError::not_found("Ticket not found"),
        TicketsServiceError::AlreadyExists => {
            ApiError::conflict("Ticket reference already exists")
        }
        TicketsServiceError::InvalidReference => {
            ApiError::bad_request("Referenced user does not exist")
        }
        TicketsServiceError::InvalidData => ApiError::bad_request("Invalid ticket data"),
        TicketsServiceError::Sql(source) => {
            error!("ticket storage failed: {source}");

            ApiError::internal()
        }
    }
}

pub(crate) fn desk_error(error: TicketDeskError) -> ApiError {
    match error {
        TicketDeskError::Tickets(source) => into_api_error(source),
        TicketDeskError::Helpdesk(source) => {
            warn!("helpdesk request failed: {source}");
            record_helpdesk_failure();

            ApiError::external_service("Helpdesk request failed")
        }
        TicketDeskError::NotLinked => {
            ApiError::bad_request("Ticket is not linked to the helpdesk")
        }
    }
}

#[cfg(test)]
mod tests {
    use portal_app::helpdesk::HelpdeskError;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn helpdesk_failures_are_flagged_server_errors() {
        let error = desk_error(TicketDeskError::Helpdesk(HelpdeskError::UnexpectedResponse(
            "503".to_string(),
        )));

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.body().message, "Helpdesk request failed");
        assert_eq!(error.body().network_error, Some(true));
    }

    #[test]
    fn missing_tickets_are_not_found() {
        let error = desk_error(TicketDeskError::Tickets(TicketsServiceError::NotFound));

        assert_eq!(error.status(), StatusCode::NOT_FOUND);
    }
}
