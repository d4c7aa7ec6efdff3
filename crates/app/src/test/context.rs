//! Test context for service-level integration tests.

use crate::domain::{
    app_links::PgAppLinksService, subscriptions::PgSubscriptionsService,
    tickets::PgTicketsService, users::PgUsersService,
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub users: PgUsersService,
    pub tickets: PgTicketsService,
    pub subscriptions: PgSubscriptionsService,
    pub app_links: PgAppLinksService,
}

impl TestContext {
    pub async fn new() -> Self {
        let db = TestDb::new().await;
        let pool = db.pool().clone();

        Self {
            users: PgUsersService::new(pool.clone()),
            tickets: PgTicketsService::new(pool.clone()),
            subscriptions: PgSubscriptionsService::new(pool.clone()),
            app_links: PgAppLinksService::new(pool),
            db,
        }
    }
}
