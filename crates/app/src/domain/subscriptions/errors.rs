//! Subscriptions service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubscriptionsServiceError {
    #[error("subscription not found")]
    NotFound,

    #[error("related user not found")]
    InvalidReference,

    #[error("invalid subscription data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for SubscriptionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::UniqueViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            SubscriptionsServiceError::from(Error::RowNotFound),
            SubscriptionsServiceError::NotFound
        ));
    }

    #[test]
    fn other_errors_map_to_sql() {
        assert!(matches!(
            SubscriptionsServiceError::from(Error::PoolTimedOut),
            SubscriptionsServiceError::Sql(_)
        ));
    }
}
