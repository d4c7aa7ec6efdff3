//! Update User Handler

use portal::{
    registration::{Violations, check_password, is_valid_email},
    roles::{Role, UserStatus},
};
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use portal_app::{
    auth::password::hash_password,
    domain::users::{
        data::UserUpdate,
        records::{UserId, UserRecord},
    },
};

use crate::{
    auth::RequestContext,
    error::ApiError,
    extensions::*,
    users::{errors::into_api_error, models::UserEnvelope},
};

/// Profile changes. Absent fields are left as they are.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,

    /// Admin only.
    pub company: Option<String>,

    /// Admin only.
    pub email: Option<String>,

    /// Admin only.
    pub role: Option<String>,

    /// Admin only.
    pub status: Option<String>,
}

impl UpdateUserRequest {
    fn touches_admin_fields(&self) -> bool {
        self.company.is_some()
            || self.email.is_some()
            || self.role.is_some()
            || self.status.is_some()
    }

    fn into_update(self) -> Result<UserUpdate, ApiError> {
        let email = self
            .email
            .map(|email| email.trim().to_lowercase())
            .map(|email| {
                if is_valid_email(&email) {
                    Ok(email)
                } else {
                    Err(ApiError::bad_request("Validation failed")
                        .with_field("email", "Invalid email address"))
                }
            })
            .transpose()?;

        let password_hash = self
            .password
            .map(|password| {
                if let Some(violation) = check_password(&password) {
                    return Err(ApiError::validation(&Violations::from(violation)));
                }

                hash_password(&password).map_err(|source| {
                    error!("failed to hash password: {source}");

                    ApiError::internal()
                })
            })
            .transpose()?;

        let role = self
            .role
            .as_deref()
            .map(str::parse::<Role>)
            .transpose()
            .map_err(|_err| {
                ApiError::bad_request("Invalid role").with_field("role", "Unknown role")
            })?;

        let status = self
            .status
            .as_deref()
            .map(str::parse::<UserStatus>)
            .transpose()
            .map_err(|_err| {
                ApiError::bad_request("Invalid status").with_field("status", "Unknown status")
            })?;

        Ok(UserUpdate {
            email,
            first_name: self.first_name,
            last_name: self.last_name,
            company: self.company,
            phone: self.phone,
            password_hash,
            role,
            status,
        })
    }
}

fn authorize(
    caller: &RequestContext,
    target: UserId,
    request: &UpdateUserRequest,
) -> Result<(), ApiError> {
    if caller.is_admin() {
        return Ok(());
    }

    if caller.user.id != target || request.touches_admin_fields() {
        return Err(ApiError::access_denied());
    }

    Ok(())
}

/// Directory accounts authenticate against the directory only.
fn check_password_source(
    target: &UserRecord,
    request: &UpdateUserRequest,
) -> Result<(), ApiError> {
    if target.is_directory_user && request.password.is_some() {
        return Err(ApiError::bad_request("Validation failed").with_field(
            "password",
            "Directory accounts change their password in the directory",
        ));
    }

    Ok(())
}

/// Update User Handler
///
/// Users edit their own name, phone and password; admins may also change
/// company, email, role and status of any account.
#[endpoint(
    tags("users"),
    summary = "Update a user",
    responses(
        (status_code = StatusCode::OK, description = "User updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid field"),
        (status_code = StatusCode::FORBIDDEN, description = "Not allowed"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown user"),
        (status_code = StatusCode::CONFLICT, description = "Email already in use"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<UpdateUserRequest>,
    depot: &mut Depot,
) -> Result<Json<UserEnvelope>, ApiError> {
    let state = depot.state()?;
    let caller = depot.request_context()?;
    let target = UserId::from_i64(id.into_inner());
    let request = json.into_inner();

    authorize(caller, target, &request)?;

    let existing = state
        .app
        .users
        .get_user(target)
        .await
        .map_err(into_api_error)?;

    check_password_source(&existing, &request)?;

    let updated = state
        .app
        .users
        .update_user(target, request.into_update()?)
        .await
        .map_err(into_api_error)?;

    info!(user_id = %updated.id, updated_by = %caller.user.id, "user updated");

    Ok(Json(updated.into()))
}
