//! Ticket Stats Handler

use portal::tickets::{TicketPriority, TicketStatus};
use salvo::prelude::*;

use portal_app::domain::{tickets::records::TicketRecord, users::records::UserId};

use crate::{
    error::ApiError,
    extensions::*,
    tickets::{errors::into_api_error, models::TicketStats},
};

impl TicketStats {
    /// Count `tickets`, skipping closed ones. `staff` adds the priority and
    /// assignment counters.
    fn tally(tickets: &[TicketRecord], staff: Option<UserId>) -> Self {
        let live = || tickets.iter().filter(|ticket| !ticket.status.is_closed());
        let with_status = |status: TicketStatus| {
            live().filter(|ticket| ticket.status == status).count()
        };

        Self {
            open: with_status(TicketStatus::Open),
            in_progress: with_status(TicketStatus::InProgress),
            resolved: with_status(TicketStatus::Resolved),
            total: live().count(),
            high_priority: staff.map(|_staff| {
                live()
                    .filter(|ticket| ticket.priority == TicketPriority::High)
                    .count()
            }),
            assigned_to_me: staff.map(|staff| {
                live()
                    .filter(|ticket| ticket.assigned_to_id == Some(staff))
                    .count()
            }),
        }
    }
}

/// Ticket Stats Handler
///
/// Customers get counters over their own tickets, staff over every ticket.
#[endpoint(tags("tickets"), summary = "Ticket counters")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<TicketStats>, ApiError> {
    let state = depot.state()?;
    let caller = depot.request_context()?;

    let (tickets, staff) = if caller.is_staff() {
        (state.app.tickets.list_open_tickets().await, Some(caller.user.id))
    } else {
        (
            state.app.tickets.list_tickets_by_owner(caller.user.id).await,
            None,
        )
    };

    let tickets = tickets.map_err(into_api_error)?;

    Ok(Json(TicketStats::tally(&tickets, staff)))
}

#[cfg(test)]
mod tests {
    use portal::{
        roles::{Role, UserStatus},
        tickets::TicketOrigin,
    };
    use salvo::{
        http::StatusCode,
        test::{ResponseExt, TestClient},
    };
    use serde_json::Value;
    use testresult::TestResult;

    use portal_app::domain::tickets::data::NewTicket;

    use crate::test_helpers::TestApp;

    use super::*;

    async fn file(
        app: &TestApp,
        owner: UserId,
        status: TicketStatus,
        priority: TicketPriority,
        assignee: Option<UserId>,
    ) -> TestResult {
        app.context
            .tickets
            .create_ticket(NewTicket {
                status,
                priority,
                assigned_to_id: assignee,
                ..NewTicket::new(
                    "Subject".to_string(),
                    "Description".to_string(),
                    owner,
                    TicketOrigin::Customer,
                )
            })
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn customers_count_only_their_live_tickets() -> TestResult {
        let app = TestApp::new().await;
        let ada = app.customer("ada@example.com", UserStatus::Active).await?;
        let bob = app.customer("bob@example.com", UserStatus::Active).await?;

        file(&app, ada.id, TicketStatus::Open, TicketPriority::High, None).await?;
        file(&app, ada.id, TicketStatus::Resolved, TicketPriority::Low, None).await?;
        file(&app, ada.id, TicketStatus::Closed, TicketPriority::Low, None).await?;
        file(&app, bob.id, TicketStatus::Open, TicketPriority::Medium, None).await?;

        let cookie = app.sign_in(&ada).await?;

        let mut res = TestClient::get("http://example.com/api/tickets/stats")
            .add_header("cookie", cookie, true)
            .send(&app.api())
            .await;
        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.get("open"), Some(&Value::from(1)));
        assert_eq!(body.get("resolved"), Some(&Value::from(1)));
        assert_eq!(body.get("total"), Some(&Value::from(2)));
        assert_eq!(body.get("highPriority"), None);

        Ok(())
    }

    #[tokio::test]
    async fn staff_see_priority_and_assignment_counters() -> TestResult {
        let app = TestApp::new().await;
        let grace = app
            .user_with_role("grace", "grace@example.com", Role::Employee, UserStatus::Active)
            .await?;
        let ada = app.customer("ada@example.com", UserStatus::Active).await?;

        file(&app, ada.id, TicketStatus::Open, TicketPriority::High, Some(grace.id)).await?;
        file(&app, ada.id, TicketStatus::InProgress, TicketPriority::High, None).await?;
        file(&app, ada.id, TicketStatus::Closed, TicketPriority::High, Some(grace.id)).await?;

        let cookie = app.sign_in(&grace).await?;

        let mut res = TestClient::get("http://example.com/api/tickets/stats")
            .add_header("cookie", cookie, true)
            .send(&app.api())
            .await;
        let body: Value = res.take_json().await?;

        assert_eq!(body.get("inProgress"), Some(&Value::from(1)));
        assert_eq!(body.get("total"), Some(&Value::from(2)));
        assert_eq!(body.get("highPriority"), Some(&Value::from(2)));
        assert_eq!(body.get("assignedToMe"), Some(&Value::from(1)));

        Ok(())
    }
}
