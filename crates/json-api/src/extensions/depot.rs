//! Depot helper extensions.

use std::{any::Any, sync::Arc};

use salvo::prelude::Depot;
use tracing::error;

use crate::{auth::RequestContext, error::ApiError, state::State};

/// Typed access to what the hoops put in the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    fn state(&self) -> Result<&Arc<State>, ApiError> {
        self.obtain_or_500::<Arc<State>>()
    }

    /// The signed-in caller; 401 when the session hoop did not run.
    fn request_context(&self) -> Result<&RequestContext, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_ignored| {
            error!(
                "depot is missing {}",
                std::any::type_name::<T>()
            );

            ApiError::internal()
        })
    }

    fn request_context(&self) -> Result<&RequestContext, ApiError> {
        self.obtain::<RequestContext>()
            .map_err(|_ignored| ApiError::not_authenticated())
    }
}
