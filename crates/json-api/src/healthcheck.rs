//! Healthcheck Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extensions::*};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    /// Always `ok` while the process serves requests
    pub status: String,

    /// Which optional integrations are configured
    pub integrations: Integrations,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct Integrations {
    pub directory: bool,
    pub helpdesk: bool,
}

/// Healthcheck handler
///
/// Does not contact the directory or the helpdesk.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, ApiError> {
    let state = depot.state()?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        integrations: Integrations {
            directory: state.app.employees.is_configured(),
            helpdesk: state.app.desk.is_linked(),
        },
    }))
}
