//! Directory transport seam.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

/// Attributes read for a signed-in account. Every field is optional because
/// directories differ in what they populate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryProfile {
    pub mail: Option<String>,
    pub user_principal_name: Option<String>,
    pub display_name: Option<String>,
    pub common_name: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub manager: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindOutcome {
    /// The bind succeeded. The profile is `None` when the lookup after the
    /// bind found nothing or failed.
    Accepted(Option<DirectoryProfile>),

    /// The directory refused the credentials.
    Rejected,
}

#[derive(Debug, Error)]
pub enum DirectoryTransportError {
    /// Connection, TLS or timeout failure.
    #[error("directory unreachable: {0}")]
    Unreachable(String),

    /// The directory answered with an unexpected result.
    #[error("directory protocol error: {0}")]
    Protocol(String),
}

#[automock]
#[async_trait]
/// One bind attempt against the directory.
pub trait DirectoryTransport: Send + Sync {
    /// Bind as `principal` and, when accepted, read the profile of
    /// `account`.
    async fn authenticate(
        &self,
        principal: &str,
        password: &str,
        account: &str,
    ) -> Result<BindOutcome, DirectoryTransportError>;
}
