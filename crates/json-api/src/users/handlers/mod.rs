//! User Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use crate::users::models::UserResponse;

pub(crate) mod approve;
pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod pending;
pub(crate) mod update;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    pub users: Vec<UserResponse>,
}
