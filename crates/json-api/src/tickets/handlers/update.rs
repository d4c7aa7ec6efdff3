//! Update Ticket Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use portal_app::domain::{tickets::data::TicketUpdate, users::records::UserId};

use crate::{
    error::ApiError,
    extensions::*,
    tickets::{
        errors::desk_error,
        handlers::{
            check_assignee,
            create::{parse_priority, parse_status},
            visible_ticket,
        },
        models::TicketEnvelope,
    },
};

/// Ticket changes. Absent fields are left as they are.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct UpdateTicketRequest {
    pub subject: Option<String>,
    pub description: Option<String>,

    /// Staff only.
    pub status: Option<String>,

    /// Staff only.
    pub priority: Option<String>,

    /// Staff only.
    pub assigned_to_id: Option<i64>,
}

impl UpdateTicketRequest {
    fn touches_staff_fields(&self) -> bool {
        self.status.is_some() || self.priority.is_some() || self.assigned_to_id.is_some()
    }

    fn into_update(self) -> Result<TicketUpdate, ApiError> {
        let subject = self.subject.map(|subject| subject.trim().to_string());

        if subject.as_deref().is_some_and(str::is_empty) {
            return Err(ApiError::bad_request("Validation failed")
                .with_field("subject", "Subject is required"));
        }

        Ok(TicketUpdate {
            subject,
            description: self.description,
            status: parse_status(self.status.as_deref())?,
            priority: parse_priority(self.priority.as_deref())?,
            assigned_to_id: self.assigned_to_id.map(UserId::from_i64),
            helpdesk_id: None,
        })
    }
}

/// Update Ticket Handler
///
/// Owners may edit the subject and description; staff may also move the
/// ticket through its workflow. Linked tickets are mirrored to the helpdesk.
#[endpoint(
    tags("tickets"),
    summary = "Update a ticket",
    responses(
        (status_code = StatusCode::OK, description = "Ticket updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid field or assignee"),
        (status_code = StatusCode::FORBIDDEN, description = "Not allowed"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown ticket"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Helpdesk mirror failed"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<UpdateTicketRequest>,
    depot: &mut Depot,
) -> Result<Json<TicketEnvelope>, ApiError> {
    let state = depot.state()?;
    let caller = depot.request_context()?;
    let request = json.into_inner();

    let ticket = visible_ticket(state, caller, id.into_inner()).await?;

    if !caller.is_staff() && request.touches_staff_fields() {
        return Err(ApiError::access_denied());
    }

    check_assignee(state, request.assigned_to_id).await?;

    let updated = state
        .app
        .desk
        .revise_ticket(ticket.id, request.into_update()?)
        .await
        .map_err(desk_error)?;

    info!(ticket_id = %updated.id, updated_by = %caller.user.id, "ticket updated");

    Ok(Json(updated.into()))
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

    use portal_app::domain::{
        tickets::{data::NewTicket, records::TicketRecord},
        users::records::UserRecord,
    };

    use crate::test_helpers::TestApp;

    async fn ticket_for(app: &TestApp, owner: &UserRecord) -> TestResult<TicketRecord> {
        let ticket = app
            .context
            .tickets
            .create_ticket(NewTicket::new(
                "Printer down".to_string(),
                "Third floor".to_string(),
                owner.id,
                TicketOrigin::Customer,
            ))
            .await?;

        Ok(ticket)
    }

    #[tokio::test]
    async fn owner_edits_the_description() -> TestResult {
        let app = TestApp::new().await;
        let ada = app.customer("ada@example.com", UserStatus::Active).await?;
        let ticket = ticket_for(&app, &ada).await?;

        let mut res = TestClient::patch(format!("http://example.com/api/tickets/{}", ticket.id))
            .add_header("cookie", app.sign_in(&ada).await?, true)
            .json(&json!({ "description": "Fourth floor" }))
            .send(&app.api())
            .await;
        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.pointer("/ticket/description"), Some(&Value::from("Fourth floor")));

        Ok(())
    }

    #[tokio::test]
    async fn owner_cannot_change_status() -> TestResult {
        let app = TestApp::new().await;
        let ada = app.customer("ada@example.com", UserStatus::Active).await?;
        let ticket = ticket_for(&app, &ada).await?;

        let res = TestClient::patch(format!("http://example.com/api/tickets/{}", ticket.id))
            .add_header("cookie", app.sign_in(&ada).await?, true)
            .json(&json!({ "status": "closed" }))
            .send(&app.api())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn staff_assign_and_resolve() -> TestResult {
        let app = TestApp::new().await;
        let ada = app.customer("ada@example.com", UserStatus::Active).await?;
        let grace = app
            .user_with_role("grace", "grace@example.com", Role::Employee, UserStatus::Active)
            .await?;
        let ticket = ticket_for(&app, &ada).await?;

        let mut res = TestClient::patch(format!("http://example.com/api/tickets/{}", ticket.id))
            .add_header("cookie", app.sign_in(&grace).await?, true)
            .json(&json!({
                "status": "resolved",
                "priority": "low",
                "assignedToId": grace.id.into_i64(),
            }))
            .send(&app.api())
            .await;
        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.pointer("/ticket/status"), Some(&Value::from("resolved")));
        assert_eq!(body.pointer("/ticket/priority"), Some(&Value::from("low")));
        assert_eq!(
            body.pointer("/ticket/assignedToId"),
            Some(&Value::from(grace.id.into_i64()))
        );

        Ok(())
    }

    #[tokio::test]
    async fn customers_and_unknown_ids_cannot_be_assigned() -> TestResult {
        let app = TestApp::new().await;
        let ada = app.customer("ada@example.com", UserStatus::Active).await?;
        let grace = app
            .user_with_role("grace", "grace@example.com", Role::Employee, UserStatus::Active)
            .await?;
        let ticket = ticket_for(&app, &ada).await?;
        let cookie = app.sign_in(&grace).await?;

        for assignee in [ada.id.into_i64(), 9999] {
            let mut res =
                TestClient::patch(format!("http://example.com/api/tickets/{}", ticket.id))
                    .add_header("cookie", cookie.clone(), true)
                    .json(&json!({ "assignedToId": assignee }))
                    .send(&app.api())
                    .await;
            let body: Value = res.take_json().await?;

            assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
            assert_eq!(body.pointer("/errors/0/field"), Some(&Value::from("assignedToId")));
        }

        let stored = app.context.tickets.get_ticket(ticket.id).await?;

        assert_eq!(stored.assigned_to_id, None);

        Ok(())
    }

    #[tokio::test]
    async fn other_customers_cannot_edit() -> TestResult {
        let app = TestApp::new().await;
        let ada = app.customer("ada@example.com", UserStatus::Active).await?;
        let bob = app.customer("bob@example.com", UserStatus::Active).await?;
        let ticket = ticket_for(&app, &ada).await?;

        let res = TestClient::patch(format!("http://example.com/api/tickets/{}", ticket.id))
            .add_header("cookie", app.sign_in(&bob).await?, true)
            .json(&json!({ "subject": "Mine now" }))
            .send(&app.api())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
