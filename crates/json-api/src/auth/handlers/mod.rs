//! Auth Handlers

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use portal_app::domain::users::records::UserRecord;

use crate::{
    auth::errors::sessions_error, error::ApiError, state::State, users::models::UserEnvelope,
};

pub(crate) mod customer_login;
pub(crate) mod employee_login;
pub(crate) mod logout;
pub(crate) mod me;
pub(crate) mod register;

/// Issue a session for a freshly authenticated user and set the cookie.
async fn start_session(
    state: &Arc<State>,
    res: &mut Response,
    user: UserRecord,
) -> Result<Json<UserEnvelope>, ApiError> {
    let issued = state
        .app
        .sessions
        .issue_session(user.id)
        .await
        .map_err(sessions_error)?;

    state.cookies.issue(res, &issued.token);

    info!(
        user_id = %user.id,
        role = %user.role,
        expires_at = %issued.expires_at,
        "session started"
    );

    Ok(Json(user.into()))
}
