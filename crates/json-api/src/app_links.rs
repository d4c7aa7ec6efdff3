//! Application Links

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;

use portal_app::domain::app_links::{AppLinksServiceError, records::AppLinkRecord};

use crate::{error::ApiError, extensions::*};

/// A shortcut to an internal application shown on the staff dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AppLinkResponse {
    pub id: i64,
    pub name: String,
    pub url: String,

    /// Icon name understood by the dashboard
    pub icon: String,

    pub description: Option<String>,
    pub sort_order: i32,
}

impl From<AppLinkRecord> for AppLinkResponse {
    fn from(link: AppLinkRecord) -> Self {
        Self {
            id: link.id.into_i64(),
            name: link.name,
            url: link.url,
            icon: link.icon,
            description: link.description,
            sort_order: link.sort_order,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AppLinksResponse {
    pub app_links: Vec<AppLinkResponse>,
}

/// List Application Links Handler
///
/// Active links in display order.
#[endpoint(tags("app-links"), summary = "List application links")]
pub(crate) async fn index(depot: &mut Depot) -> Result<Json<AppLinksResponse>, ApiError> {
    let state = depot.state()?;

    let links = state
        .app
        .app_links
        .list_app_links()
        .await
        .map_err(|source: AppLinksServiceError| {
            error!("failed to list application links: {source}");

            ApiError::internal()
        })?;

    Ok(Json(AppLinksResponse {
        app_links: links.into_iter().map(Into::into).collect(),
    }))
}
