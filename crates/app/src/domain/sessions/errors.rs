//! Sessions service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionsServiceError {
    #[error("session token format is invalid")]
    MalformedToken,

    #[error("session expiry is out of range")]
    Expiry(#[from] jiff::Error),
}
