//! Application links service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::domain::app_links::{
    data::NewAppLink, errors::AppLinksServiceError, records::AppLinkRecord,
    repository::PgAppLinksRepository,
};

#[derive(Debug, Clone)]
pub struct PgAppLinksService {
    repository: PgAppLinksRepository,
}

impl PgAppLinksService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAppLinksRepository::new(pool),
        }
    }
}

#[async_trait]
impl AppLinksService for PgAppLinksService {
    async fn list_app_links(&self) -> Result<Vec<AppLinkRecord>, AppLinksServiceError> {
        self.repository.list_app_links().await.map_err(Into::into)
    }

    async fn create_app_link(
        &self,
        link: NewAppLink,
    ) -> Result<AppLinkRecord, AppLinksServiceError> {
        self.repository.create_app_link(link).await.map_err(Into::into)
    }

    async fn is_empty(&self) -> Result<bool, AppLinksServiceError> {
        Ok(self.repository.count_app_links().await? == 0)
    }
}

#[automock]
#[async_trait]
/// Directory of internal tools shown to staff.
pub trait AppLinksService: Send + Sync {
    /// Active links ordered by sort order, then name.
    async fn list_app_links(&self) -> Result<Vec<AppLinkRecord>, AppLinksServiceError>;

    async fn create_app_link(
        &self,
        link: NewAppLink,
    ) -> Result<AppLinkRecord, AppLinksServiceError>;

    /// Whether no link, active or not, has been stored yet.
    async fn is_empty(&self) -> Result<bool, AppLinksServiceError>;
}
