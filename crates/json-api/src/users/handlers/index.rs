//! List Users Handler

use salvo::prelude::*;

use crate::{
    error::ApiError,
    extensions::*,
    users::{errors::into_api_error, handlers::UsersResponse},
};

/// List Users Handler
///
/// Every account, oldest first.
#[endpoint(tags("users"), summary = "List users")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UsersResponse>, ApiError> {
    let state = depot.state()?;

    let users = state
        .app
        .users
        .list_users()
        .await
        .map_err(into_api_error)?;

    Ok(Json(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}
