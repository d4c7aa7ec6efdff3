//! Server configuration module

use std::net::SocketAddr;

use clap::Parser;
use portal_app::context::AppSettings;

use crate::config::{
    directory::DirectoryConfig,
    helpdesk::HelpdeskConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    sessions::SessionConfig,
    storage::StorageConfig,
};

pub(crate) mod directory;
pub(crate) mod helpdesk;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod sessions;
pub(crate) mod storage;

/// Portal JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "portal-json", about = "Portal JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Persistence settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Session cookie settings.
    #[command(flatten)]
    pub sessions: SessionConfig,

    /// Employee directory settings.
    #[command(flatten)]
    pub directory: DirectoryConfig,

    /// External helpdesk settings.
    #[command(flatten)]
    pub helpdesk: HelpdeskConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        self.server.socket_addr()
    }

    /// Integration and session settings for the application context.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            directory: self.directory.settings(),
            helpdesk: self.helpdesk.settings(),
            session_ttl: self.sessions.ttl(),
        }
    }
}
