//! Comment On Ticket Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    extensions::*,
    tickets::{
        errors::desk_error,
        handlers::visible_ticket,
        models::CommentEnvelope,
    },
};

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CommentRequest {
    pub comment: String,
}

/// Comment On Ticket Handler
#[endpoint(
    tags("tickets"),
    summary = "Comment on a ticket",
    responses(
        (status_code = StatusCode::CREATED, description = "Comment stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty comment"),
        (status_code = StatusCode::FORBIDDEN, description = "Ticket belongs to someone else"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown ticket"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<CommentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CommentEnvelope>, ApiError> {
    let state = depot.state()?;
    let caller = depot.request_context()?;
    let comment = json.into_inner().comment.trim().to_string();

    if comment.is_empty() {
        return Err(ApiError::bad_request("Validation failed")
            .with_field("comment", "Comment is required"));
    }

    let ticket = visible_ticket(state, caller, id.into_inner()).await?;

    let stored = state
        .app
        .desk
        .comment_on_ticket(&ticket, &caller.user, comment)
        .await
        .map_err(desk_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(CommentEnvelope {
        comment: stored.into(),
    }))
}
