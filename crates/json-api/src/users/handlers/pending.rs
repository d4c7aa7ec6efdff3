//! Pending Users Handler

use portal::roles::UserStatus;
use salvo::prelude::*;

use crate::{
    error::ApiError,
    extensions::*,
    users::{errors::into_api_error, handlers::UsersResponse},
};

/// Pending Users Handler
///
/// Registrations awaiting approval.
#[endpoint(tags("users"), summary = "List users awaiting approval")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UsersResponse>, ApiError> {
    let state = depot.state()?;

    let users = state
        .app
        .users
        .list_users_by_status(UserStatus::Pending)
        .await
        .map_err(into_api_error)?;

    Ok(Json(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}
