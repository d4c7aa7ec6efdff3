//! Customer Login Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{errors::customer_login_error, handlers::start_session},
    error::ApiError,
    extensions::*,
    observability::{LoginMethod, record_login},
    users::models::UserEnvelope,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerLoginRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

/// Customer Login Handler
///
/// Password sign-in for customers and admins. Unknown addresses, wrong
/// passwords and accounts that are not active all get the same answer.
#[endpoint(
    tags("auth"),
    summary = "Customer sign-in",
    responses(
        (status_code = StatusCode::OK, description = "Signed in; session cookie set"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid email or password"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CustomerLoginRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserEnvelope>, ApiError> {
    let state = depot.state()?.clone();
    let request = json.into_inner();

    let user = state
        .app
        .customers
        .login(&request.email, &request.password)
        .await;

    record_login(LoginMethod::Local, user.is_ok());

    let user = user.map_err(customer_login_error)?;

    start_session(&state, res, user).await
}
