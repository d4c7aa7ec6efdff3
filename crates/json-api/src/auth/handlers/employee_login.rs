//! Employee Login Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{errors::employee_login_error, handlers::start_session},
    error::ApiError,
    extensions::*,
    observability::{LoginMethod, record_login},
    users::models::UserEnvelope,
};

/// Directory credentials.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EmployeeLoginRequest {
    /// Account name, `user@domain` or `DOMAIN\user`
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

/// Employee Login Handler
///
/// Authenticates against the directory. The first successful sign-in
/// creates the local employee account.
#[endpoint(
    tags("auth"),
    summary = "Employee sign-in",
    responses(
        (status_code = StatusCode::OK, description = "Signed in; session cookie set"),
        (status_code = StatusCode::BAD_REQUEST, description = "Username or password missing"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Refused or directory unavailable"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<EmployeeLoginRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserEnvelope>, ApiError> {
    let state = depot.state()?.clone();
    let request = json.into_inner();

    if request.username.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    let user = state
        .app
        .employees
        .login(&request.username, &request.password)
        .await;

    record_login(LoginMethod::Directory, user.is_ok());

    let user = user.map_err(employee_login_error)?;

    start_session(&state, res, user).await
}
