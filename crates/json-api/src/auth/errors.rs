//! Auth Errors

use portal_app::{
    auth::{
        CustomerLoginError, EmployeeLoginError, RegistrationError, directory::DirectoryAuthError,
    },
    domain::{sessions::errors::SessionsServiceError, users::UsersServiceError},
};
use tracing::{error, warn};

use crate::error::ApiError;

const INVALID_USERNAME_OR_PASSWORD: &str = "Invalid username or password";
const INVALID_EMAIL_OR_PASSWORD: &str = "Invalid email or password";

pub(crate) fn employee_login_error(error: EmployeeLoginError) -> ApiError {
    match error {
        EmployeeLoginError::Directory(DirectoryAuthError::InvalidCredentials)
        | EmployeeLoginError::Inactive => ApiError::unauthorized(INVALID_USERNAME_OR_PASSWORD),
        EmployeeLoginError::Directory(
            DirectoryAuthError::Unreachable | DirectoryAuthError::Unavailable,
        ) => ApiError::unauthorized("Unable to reach the directory service").with_network_error(),
        EmployeeLoginError::AccountConflict => {
            warn!("directory sign-in collides with a local account");

            ApiError::conflict("This username belongs to a non-directory account")
        }
        EmployeeLoginError::Users(source) => users_error("employee sign-in", &source),
        EmployeeLoginError::Password(source) => {
            error!("failed to provision directory account: {source}");

            ApiError::internal()
        }
    }
}

pub(crate) fn customer_login_error(error: CustomerLoginError) -> ApiError {
    match error {
        CustomerLoginError::InvalidCredentials => ApiError::unauthorized(INVALID_EMAIL_OR_PASSWORD),
        CustomerLoginError::Users(source) => users_error("customer sign-in", &source),
    }
}

pub(crate) fn registration_error(error: RegistrationError) -> ApiError {
    match error {
        RegistrationError::Invalid(violations) => ApiError::validation(&violations),
        RegistrationError::Conflict => {
            ApiError::conflict("An account with this email address already exists")
        }
        RegistrationError::Users(source) => users_error("registration", &source),
        RegistrationError::Password(source) => {
            error!("failed to hash password: {source}");

            ApiError::internal()
        }
    }
}

pub(crate) fn sessions_error(error: SessionsServiceError) -> ApiError {
    match error {
        SessionsServiceError::MalformedToken => ApiError::not_authenticated(),
        SessionsServiceError::Expiry(source) => {
            error!("failed to compute session expiry: {source}");

            ApiError::internal()
        }
    }
}

fn users_error(context: &str, error: &UsersServiceError) -> ApiError {
    error!("{context} failed: {error}");

    ApiError::internal()
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn directory_outage_is_flagged_as_network_error() {
        let error = employee_login_error(EmployeeLoginError::Directory(
            DirectoryAuthError::Unreachable,
        ));

        assert_eq!(error.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error.body().network_error, Some(true));
    }

    #[test]
    fn inactive_employee_gets_the_generic_message() {
        let inactive = employee_login_error(EmployeeLoginError::Inactive);
        let wrong = employee_login_error(EmployeeLoginError::Directory(
            DirectoryAuthError::InvalidCredentials,
        ));

        assert_eq!(inactive, wrong);
    }

    #[test]
    fn registration_conflict_is_409() {
        assert_eq!(
            registration_error(RegistrationError::Conflict).status(),
            StatusCode::CONFLICT
        );
    }
}
