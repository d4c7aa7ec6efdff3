//! In-memory application links store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::app_links::{
    AppLinksService,
    data::NewAppLink,
    errors::AppLinksServiceError,
    records::{AppLinkId, AppLinkRecord},
};

#[derive(Debug, Default)]
struct AppLinks {
    last_id: i64,
    rows: BTreeMap<AppLinkId, AppLinkRecord>,
}

/// Application links kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryAppLinksService {
    links: RwLock<AppLinks>,
}

impl MemoryAppLinksService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppLinksService for MemoryAppLinksService {
    async fn list_app_links(&self) -> Result<Vec<AppLinkRecord>, AppLinksServiceError> {
        let mut links: Vec<_> = self
            .links
            .read()
            .await
            .rows
            .values()
            .filter(|link| link.is_active)
            .cloned()
            .collect();

        links.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));

        Ok(links)
    }

    async fn create_app_link(
        &self,
        link: NewAppLink,
    ) -> Result<AppLinkRecord, AppLinksServiceError> {
        let mut links = self.links.write().await;

        links.last_id += 1;

        let record = AppLinkRecord {
            id: AppLinkId::from_i64(links.last_id),
            name: link.name,
            url: link.url,
            icon: link.icon,
            description: link.description,
            is_active: link.is_active,
            sort_order: link.sort_order,
        };

        links.rows.insert(record.id, record.clone());

        Ok(record)
    }

    async fn is_empty(&self) -> Result<bool, AppLinksServiceError> {
        Ok(self.links.read().await.rows.is_empty())
    }
}
