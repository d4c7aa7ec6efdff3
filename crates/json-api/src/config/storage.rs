//! Storage Config

use clap::Args;

/// Persistence settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// `PostgreSQL` connection string; in-memory stores are used when unset
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}
