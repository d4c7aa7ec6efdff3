//! Session middleware.

use salvo::prelude::*;
use tracing::{debug, error};

use portal_app::domain::{sessions::SessionsService, users::UsersServiceError};

use crate::{
    auth::{RequestContext, errors::sessions_error},
    error::ApiError,
    extensions::*,
};

/// Resolve the session cookie into a [`RequestContext`]. Requests without
/// a live session for an active user stop here with 401.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let token = depot.state().map(|state| state.cookies.read(req));

    match resolve(token, depot).await {
        Ok(context) => {
            depot.inject(context);
            ctrl.call_next(req, depot, res).await;
        }
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();
        }
    }
}

async fn resolve(
    token: Result<Option<String>, ApiError>,
    depot: &Depot,
) -> Result<RequestContext, ApiError> {
    let token = token?.ok_or_else(ApiError::not_authenticated)?;
    let state = depot.state()?;

    let session = state
        .app
        .sessions
        .resolve_session(&token)
        .await
        .map_err(sessions_error)?
        .ok_or_else(ApiError::not_authenticated)?;

    let user = match state.app.users.get_user(session.user_id).await {
        Ok(user) => user,
        Err(UsersServiceError::NotFound) => {
            debug!(user_id = %session.user_id, "session user no longer exists");
            revoke(state.app.sessions.as_ref(), &token).await;

            return Err(ApiError::not_authenticated());
        }
        Err(source) => {
            error!("failed to load session user: {source}");

            return Err(ApiError::internal());
        }
    };

    if !user.status.can_sign_in() {
        debug!(user_id = %user.id, status = %user.status, "session user is no longer active");
        revoke(state.app.sessions.as_ref(), &token).await;

        return Err(ApiError::not_authenticated());
    }

    Ok(RequestContext { user, session })
}

async fn revoke(sessions: &dyn SessionsService, token: &str) {
    if let Err(source) = sessions.revoke_session(token).await {
        error!("failed to revoke stale session: {source}");
    }
}
