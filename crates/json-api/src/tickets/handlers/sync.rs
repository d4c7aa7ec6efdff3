//! Sync Ticket Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;

use portal_app::domain::tickets::records::TicketId;

use crate::{
    error::ApiError,
    extensions::*,
    tickets::{errors::desk_error, models::TicketEnvelope},
};

/// Sync Ticket Handler
///
/// Pulls title, state, priority and description from the helpdesk.
#[endpoint(
    tags("tickets"),
    summary = "Sync a ticket from the helpdesk",
    responses(
        (status_code = StatusCode::OK, description = "Ticket refreshed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Ticket is not linked"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown ticket"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Helpdesk request failed"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<TicketEnvelope>, ApiError> {
    let state = depot.state()?;

    let synced = state
        .app
        .desk
        .sync_ticket(TicketId::from_i64(id.into_inner()))
        .await
        .map_err(desk_error)?;

    info!(ticket_id = %synced.id, status = %synced.status, "ticket synced from helpdesk");

    Ok(Json(synced.into()))
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
    use serde_json::{Value, json};
    use testresult::TestResult;

    use portal_app::{
        domain::tickets::data::NewTicket,
        helpdesk::{
            MockHelpdeskApi,
            models::{HelpdeskArticle, HelpdeskCustomer, HelpdeskTicket},
        },
    };

    use crate::test_helpers::TestApp;

    fn helpdesk_ticket(state_id: i64) -> HelpdeskTicket {
        HelpdeskTicket {
            id: 17,
            number: Some("40017".to_string()),
            title: "Printer down".to_string(),
            state_id,
            priority_id: 3,
        }
    }

    #[tokio::test]
    async fn local_tickets_are_not_linked() -> TestResult {
        let app = TestApp::new().await;
        let grace = app
            .user_with_role("grace", "grace@example.com", Role::Employee, UserStatus::Active)
            .await?;
        let ticket = app
            .context
            .tickets
            .create_ticket(NewTicket::new(
                "Printer down".to_string(),
                "Third floor".to_string(),
                grace.id,
                TicketOrigin::Staff,
            ))
            .await?;

        let mut res = TestClient::post(format!("http://example.com/api/tickets/{}/sync", ticket.id))
            .add_header("cookie", app.sign_in(&grace).await?, true)
            .send(&app.api())
            .await;
        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            body.get("message"),
            Some(&Value::from("Ticket is not linked to the helpdesk"))
        );

        Ok(())
    }

    #[tokio::test]
    async fn linked_ticket_takes_the_helpdesk_state() -> TestResult {
        let mut helpdesk = MockHelpdeskApi::new();

        helpdesk
            .expect_find_customer()
            .return_once(|_| Ok(Some(HelpdeskCustomer { id: 5, email: None })));
        helpdesk
            .expect_create_ticket()
            .once()
            .return_once(|_| Ok(helpdesk_ticket(1)));
        helpdesk
            .expect_get_ticket()
            .once()
            .withf(|id| *id == 17)
            .return_once(|_| Ok(helpdesk_ticket(4)));
        helpdesk.expect_list_articles().once().return_once(|_| {
            Ok(vec![HelpdeskArticle {
                id: 1,
                body: "Third floor, by the lifts".to_string(),
            }])
        });

        let app = TestApp::with_helpdesk(helpdesk);
        let ada = app.customer("ada@example.com", UserStatus::Active).await?;
        let grace = app
            .user_with_role("grace", "grace@example.com", Role::Employee, UserStatus::Active)
            .await?;

        let mut res = TestClient::post("http://example.com/api/tickets")
            .add_header("cookie", app.sign_in(&ada).await?, true)
            .json(&json!({ "subject": "Printer down", "description": "Third floor" }))
            .send(&app.api())
            .await;
        let created: Value = res.take_json().await?;
        let id = created
            .pointer("/ticket/id")
            .and_then(Value::as_i64)
            .unwrap_or_default();

        assert_eq!(created.pointer("/ticket/externalId"), Some(&Value::from("40017")));

        let mut res = TestClient::post(format!("http://example.com/api/tickets/{id}/sync"))
            .add_header("cookie", app.sign_in(&grace).await?, true)
            .send(&app.api())
            .await;
        let synced: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(synced.pointer("/ticket/status"), Some(&Value::from("resolved")));
        assert_eq!(synced.pointer("/ticket/priority"), Some(&Value::from("high")));
        assert_eq!(
            synced.pointer("/ticket/description"),
            Some(&Value::from("Third floor, by the lifts"))
        );

        Ok(())
    }

    #[tokio::test]
    async fn customers_cannot_sync() -> TestResult {
        let app = TestApp::new().await;
        let ada = app.customer("ada@example.com", UserStatus::Active).await?;

        let res = TestClient::post("http://example.com/api/tickets/1/sync")
            .add_header("cookie", app.sign_in(&ada).await?, true)
            .send(&app.api())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
