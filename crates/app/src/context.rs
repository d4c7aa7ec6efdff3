//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use sqlx::{PgPool, migrate::MigrateError};
use thiserror::Error;
use tracing::info;

use crate::{
    auth::{
        EmployeeAuthenticator, LocalAuthenticator,
        directory::{DirectoryAuthenticator, DirectorySettings},
    },
    database,
    domain::{
        app_links::{
            AppLinksService, AppLinksServiceError, MemoryAppLinksService, PgAppLinksService,
            default_app_links,
        },
        sessions::{MemorySessionsService, SessionsService},
        subscriptions::{MemorySubscriptionsService, PgSubscriptionsService, SubscriptionsService},
        tickets::{MemoryTicketsService, PgTicketsService, TicketDesk, TicketsService},
        users::{MemoryUsersService, PgUsersService, UsersService},
    },
    helpdesk::{HelpdeskAdapter, HelpdeskClient, HelpdeskError, HelpdeskSettings},
};

/// Default session lifetime.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_hours(24);

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] MigrateError),

    #[error("failed to seed application links")]
    Seed(#[source] AppLinksServiceError),

    #[error("failed to initialise helpdesk client")]
    Helpdesk(#[source] HelpdeskError),
}

/// Optional integrations and session policy.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub directory: Option<DirectorySettings>,
    pub helpdesk: Option<HelpdeskSettings>,
    pub session_ttl: SignedDuration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            directory: None,
            helpdesk: None,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

/// Storage backends the context is assembled from.
#[derive(Clone)]
pub struct AppServices {
    pub users: Arc<dyn UsersService>,
    pub tickets: Arc<dyn TicketsService>,
    pub subscriptions: Arc<dyn SubscriptionsService>,
    pub app_links: Arc<dyn AppLinksService>,
    pub sessions: Arc<dyn SessionsService>,
}

impl AppServices {
    /// Every store kept in process memory.
    #[must_use]
    pub fn in_memory(session_ttl: SignedDuration) -> Self {
        Self {
            users: Arc::new(MemoryUsersService::new()),
            tickets: Arc::new(MemoryTicketsService::new()),
            subscriptions: Arc::new(MemorySubscriptionsService::new()),
            app_links: Arc::new(MemoryAppLinksService::new()),
            sessions: Arc::new(MemorySessionsService::new(session_ttl)),
        }
    }

    /// PostgreSQL-backed stores. Sessions stay in memory.
    #[must_use]
    pub fn postgres(pool: &PgPool, session_ttl: SignedDuration) -> Self {
        Self {
            users: Arc::new(PgUsersService::new(pool.clone())),
            tickets: Arc::new(PgTicketsService::new(pool.clone())),
            subscriptions: Arc::new(PgSubscriptionsService::new(pool.clone())),
            app_links: Arc::new(PgAppLinksService::new(pool.clone())),
            sessions: Arc::new(MemorySessionsService::new(session_ttl)),
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub tickets: Arc<dyn TicketsService>,
    pub subscriptions: Arc<dyn SubscriptionsService>,
    pub app_links: Arc<dyn AppLinksService>,
    pub sessions: Arc<dyn SessionsService>,
    pub customers: LocalAuthenticator,
    pub employees: EmployeeAuthenticator,
    pub desk: TicketDesk,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("employees", &self.employees)
            .field("desk", &self.desk)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Wire authenticators and the ticket desk around the given stores.
    #[must_use]
    pub fn assemble(
        services: AppServices,
        directory: Option<DirectoryAuthenticator>,
        helpdesk: Option<HelpdeskAdapter>,
    ) -> Self {
        Self {
            customers: LocalAuthenticator::new(services.users.clone()),
            employees: EmployeeAuthenticator::new(directory, services.users.clone()),
            desk: TicketDesk::new(services.tickets.clone(), helpdesk),
            users: services.users,
            tickets: services.tickets,
            subscriptions: services.subscriptions,
            app_links: services.app_links,
            sessions: services.sessions,
        }
    }

    /// Build application context with in-memory stores.
    ///
    /// # Errors
    ///
    /// Returns an error when an integration cannot be initialised.
    pub async fn in_memory(settings: AppSettings) -> Result<Self, AppInitError> {
        let services = AppServices::in_memory(settings.session_ttl);

        Self::with_integrations(services, settings).await
    }

    /// Build application context from a database URL, applying migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting, migrating or seeding fails.
    pub async fn from_database_url(url: &str, settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        let services = AppServices::postgres(&pool, settings.session_ttl);

        Self::with_integrations(services, settings).await
    }

    async fn with_integrations(
        services: AppServices,
        settings: AppSettings,
    ) -> Result<Self, AppInitError> {
        let directory = settings.directory.map(DirectoryAuthenticator::from_settings);

        let helpdesk = settings
            .helpdesk
            .map(|helpdesk| {
                HelpdeskClient::new(&helpdesk).map(|client| {
                    HelpdeskAdapter::new(
                        Arc::new(client),
                        helpdesk.group_id,
                        helpdesk.default_customer_id,
                    )
                })
            })
            .transpose()
            .map_err(AppInitError::Helpdesk)?;

        info!(
            directory = directory.is_some(),
            helpdesk = helpdesk.is_some(),
            "integrations configured"
        );

        let context = Self::assemble(services, directory, helpdesk);

        context.seed_app_links().await.map_err(AppInitError::Seed)?;

        Ok(context)
    }

    /// Store the default application links when none exist yet. Returns
    /// how many were created.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub async fn seed_app_links(&self) -> Result<usize, AppLinksServiceError> {
        if !self.app_links.is_empty().await? {
            return Ok(0);
        }

        let mut seeded = 0;

        for link in default_app_links() {
            self.app_links.create_app_link(link).await?;
            seeded += 1;
        }

        info!(seeded, "seeded default application links");

        Ok(seeded)
    }
}
