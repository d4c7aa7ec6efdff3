//! Current User Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extensions::*, users::models::UserResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MeResponse {
    pub user: UserResponse,
    pub session_expires_at: String,
}

/// Current User Handler
///
/// The signed-in user, as currently stored.
#[endpoint(tags("auth"), summary = "Current user")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<MeResponse>, ApiError> {
    let context = depot.request_context()?;

    Ok(Json(MeResponse {
        user: context.user.clone().into(),
        session_expires_at: context.session.expires_at.to_string(),
    }))
}
