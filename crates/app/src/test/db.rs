//! Throwaway PostgreSQL databases for repository tests.
//!
//! One container is started lazily for the whole test binary. Every
//! [`TestDb`] gets its own freshly migrated database inside it; databases are
//! never dropped explicitly and disappear with the container.

use std::{
    process,
    sync::atomic::{AtomicU32, Ordering},
};

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

const ROLE: &str = "portal_test";

static SERVER: Lazy<OnceCell<Server>> = Lazy::new(OnceCell::new);

static NEXT_DATABASE: AtomicU32 = AtomicU32::new(0);

struct Server {
    _container: ContainerAsync<Postgres>,
    host: String,
    port: u16,
}

impl Server {
    async fn start() -> Self {
        let container = Postgres::default()
            .with_user(ROLE)
            .with_password(ROLE)
            .with_db_name(ROLE)
            .start()
            .await
            .expect("PostgreSQL container should start");

        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("container should expose 5432");

        let host = std::env::var("TESTCONTAINERS_HOST_OVERRIDE")
            .unwrap_or_else(|_| "localhost".to_string());

        Self {
            _container: container,
            host,
            port,
        }
    }

    fn url(&self, database: &str) -> String {
        format!(
            "postgresql://{ROLE}:{ROLE}@{}:{}/{database}",
            self.host, self.port
        )
    }
}

/// A migrated database of its own.
#[derive(Debug, Clone)]
pub struct TestDb {
    pool: PgPool,
}

impl TestDb {
    pub async fn new() -> Self {
        let server = SERVER.get_or_init(Server::start).await;

        // Only digits and underscores, so the name is safe to splice into DDL.
        let name = format!(
            "portal_{}_{}",
            process::id(),
            NEXT_DATABASE.fetch_add(1, Ordering::Relaxed)
        );

        let mut admin = PgConnection::connect(&server.url(ROLE))
            .await
            .expect("admin connection should open");

        sqlx::query(&format!("CREATE DATABASE {name}"))
            .execute(&mut admin)
            .await
            .expect("test database should be created");

        admin.close().await.expect("admin connection should close");

        let pool = PgPool::connect(&server.url(&name))
            .await
            .expect("test database should accept connections");

        crate::database::migrate(&pool)
            .await
            .expect("migrations should apply");

        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires a container runtime for PostgreSQL"]
    async fn every_table_exists_after_migration() {
        let db = TestDb::new().await;

        let tables: i64 = sqlx::query_scalar(
            "SELECT count(*) FROM information_schema.tables WHERE table_name IN \
             ('users', 'tickets', 'ticket_comments', 'subscriptions', 'app_links')",
        )
        .fetch_one(db.pool())
        .await
        .expect("schema query should succeed");

        assert_eq!(tables, 5);
    }

    #[tokio::test]
    #[ignore = "requires a container runtime for PostgreSQL"]
    async fn databases_are_isolated() {
        let first = TestDb::new().await;
        let second = TestDb::new().await;

        let first_name: String = sqlx::query_scalar("SELECT current_database()")
            .fetch_one(first.pool())
            .await
            .expect("query should succeed");
        let second_name: String = sqlx::query_scalar("SELECT current_database()")
            .fetch_one(second.pool())
            .await
            .expect("query should succeed");

        assert_ne!(first_name, second_name);
    }
}
