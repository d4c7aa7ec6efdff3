//! User Errors

use tracing::error;

use portal_app::{auth::RegistrationError, domain::users::UsersServiceError};

use crate::error::ApiError;

pub(crate) fn into_api_error(error: UsersServiceError) -> ApiError {
    match error {
        UsersServiceError::NotFound => ApiError::not_found("User not found"),
        UsersServiceError::AlreadyExists => {
            ApiError::conflict("Username or email is already in use")
        }
        UsersServiceError::InvalidData => ApiError::bad_request("Invalid user data"),
        UsersServiceError::Sql(source) => {
            error!("user storage failed: {source}");

            ApiError::internal()
        }
    }
}

pub(crate) fn account_error(error: RegistrationError) -> ApiError {
    match error {
        RegistrationError::Invalid(violations) => ApiError::validation(&violations),
        RegistrationError::Conflict => ApiError::conflict("Username or email is already in use"),
        RegistrationError::Users(source) => into_api_error(source),
        RegistrationError::Password(source) => {
            error!("failed to hash password: {source}");

            ApiError::internal()
        }
    }
}
