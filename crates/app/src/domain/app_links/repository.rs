//! Application Links Repository

use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as, query_scalar};

use crate::domain::app_links::{
    data::NewAppLink,
    records::{AppLinkId, AppLinkRecord},
};

const LIST_APP_LINKS_SQL: &str = include_str!("sql/list_app_links.sql");
const COUNT_APP_LINKS_SQL: &str = include_str!("sql/count_app_links.sql");
const CREATE_APP_LINK_SQL: &str = include_str!("sql/create_app_link.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAppLinksRepository {
    pool: PgPool,
}

impl PgAppLinksRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn list_app_links(&self) -> Result<Vec<AppLinkRecord>, sqlx::Error> {
        query_as::<Postgres, AppLinkRecord>(LIST_APP_LINKS_SQL)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn count_app_links(&self) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_APP_LINKS_SQL)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn create_app_link(
        &self,
        link: NewAppLink,
    ) -> Result<AppLinkRecord, sqlx::Error> {
        query_as::<Postgres, AppLinkRecord>(CREATE_APP_LINK_SQL)
            .bind(link.name)
            .bind(link.url)
            .bind(link.icon)
            .bind(link.description)
            .bind(link.is_active)
            .bind(link.sort_order)
            .fetch_one(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AppLinkRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: AppLinkId::from_i64(row.try_get("id")?),
            name: row.try_get("name")?,
            url: row.try_get("url")?,
            icon: row.try_get("icon")?,
            description: row.try_get("description")?,
            is_active: row.try_get("is_active")?,
            sort_order: row.try_get("sort_order")?,
        })
    }
}
