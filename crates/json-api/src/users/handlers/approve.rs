//! Approve User Handler

use portal::roles::UserStatus;
use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;

use portal_app::domain::users::{data::UserUpdate, records::UserId};

use crate::{
    error::ApiError,
    extensions::*,
    users::{errors::into_api_error, models::UserEnvelope},
};

/// Approve User Handler
///
/// Activates a pending registration.
#[endpoint(
    tags("users"),
    summary = "Approve a pending user",
    responses(
        (status_code = StatusCode::OK, description = "User activated"),
        (status_code = StatusCode::BAD_REQUEST, description = "User is not pending"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown user"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<UserEnvelope>, ApiError> {
    let state = depot.state()?;
    let approver = depot.request_context()?.user.id;
    let user = UserId::from_i64(id.into_inner());

    let current = state.app.users.get_user(user).await.map_err(into_api_error)?;

    if current.status != UserStatus::Pending {
        return Err(ApiError::bad_request("User is not pending approval"));
    }

    let approved = state
        .app
        .users
        .update_user(
            user,
            UserUpdate {
                status: Some(UserStatus::Active),
                ..UserUpdate::default()
            },
        )
        .await
        .map_err(into_api_error)?;

    info!(user_id = %approved.id, approved_by = %approver, "user approved");

    Ok(Json(approved.into()))
}
