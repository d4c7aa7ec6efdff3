//! Two-format directory sign-in.

use std::{sync::Arc, time::Duration};

use portal::directory::{DirectoryPrincipals, fallback_email};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::auth::directory::{
    ldap::LdapTransport,
    transport::{BindOutcome, DirectoryProfile, DirectoryTransport, DirectoryTransportError},
};

/// How typed usernames map to directory principals and email addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNaming {
    /// User principal suffix, e.g. `@corp.example`.
    pub username_suffix: Option<String>,

    /// Down-level domain, e.g. `CORP`. Derived from the suffix when absent.
    pub domain: Option<String>,

    /// Suffix for synthesized email addresses.
    pub email_suffix: String,
}

/// Connection settings for the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySettings {
    pub url: String,
    pub base_dn: String,
    pub naming: DirectoryNaming,
    pub connect_timeout: Duration,
    pub operation_timeout: Duration,
}

/// Normalised identity of a directory account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryIdentity {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub department: Option<String>,
    pub title: Option<String>,
    pub manager: Option<String>,
}

impl DirectoryIdentity {
    fn from_profile(account: &str, profile: Option<DirectoryProfile>, email_suffix: &str) -> Self {
        let profile = profile.unwrap_or_default();

        let email = profile
            .mail
            .or(profile.user_principal_name)
            .map_or_else(|| fallback_email(account, email_suffix), |email| email.to_lowercase());

        Self {
            username: account.to_string(),
            email,
            full_name: profile
                .display_name
                .or(profile.common_name)
                .unwrap_or_else(|| account.to_string()),
            department: profile.department,
            title: profile.title,
            manager: profile.manager,
        }
    }
}

#[derive(Debug, Error)]
pub enum DirectoryAuthError {
    /// Refused by the directory, or not a usable username/password.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("directory is unreachable")]
    Unreachable,

    #[error("directory sign-in is not configured")]
    Unavailable,
}

/// Validates employee credentials against the directory.
#[derive(Clone)]
pub struct DirectoryAuthenticator {
    transport: Arc<dyn DirectoryTransport>,
    naming: DirectoryNaming,
}

impl std::fmt::Debug for DirectoryAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryAuthenticator")
            .field("naming", &self.naming)
            .finish_non_exhaustive()
    }
}

impl DirectoryAuthenticator {
    #[must_use]
    pub fn new(transport: Arc<dyn DirectoryTransport>, naming: DirectoryNaming) -> Self {
        Self { transport, naming }
    }

    /// Authenticator talking LDAP to the configured server.
    #[must_use]
    pub fn from_settings(settings: DirectorySettings) -> Self {
        let transport = LdapTransport::new(
            settings.url,
            settings.base_dn,
            settings.connect_timeout,
            settings.operation_timeout,
        );

        Self::new(Arc::new(transport), settings.naming)
    }

    /// Try the user principal form, then the down-level form.
    ///
    /// A refusal moves on to the next form; a connectivity failure stops
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryAuthError::InvalidCredentials`] when every form is
    /// refused and [`DirectoryAuthError::Unreachable`] when the directory
    /// cannot be reached.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<DirectoryIdentity, DirectoryAuthError> {
        if password.is_empty() {
            return Err(DirectoryAuthError::InvalidCredentials);
        }

        let principals = DirectoryPrincipals::resolve(
            username,
            self.naming.username_suffix.as_deref(),
            self.naming.domain.as_deref(),
        )
        .ok_or(DirectoryAuthError::InvalidCredentials)?;

        for principal in principals.candidates() {
            match self
                .transport
                .authenticate(principal, password, &principals.account)
                .await
            {
                Ok(BindOutcome::Accepted(profile)) => {
                    info!(principal, "directory sign-in accepted");

                    return Ok(DirectoryIdentity::from_profile(
                        &principals.account,
                        profile,
                        &self.naming.email_suffix,
                    ));
                }
                Ok(BindOutcome::Rejected) => {
                    debug!(principal, "directory refused principal, trying next form");
                }
                Err(DirectoryTransportError::Protocol(message)) => {
                    warn!(principal, message, "directory protocol error, trying next form");
                }
                Err(DirectoryTransportError::Unreachable(message)) => {
                    warn!(principal, message, "directory unreachable");

                    return Err(DirectoryAuthError::Unreachable);
                }
            }
        }

        warn!(account = %principals.account, "directory sign-in refused");

        Err(DirectoryAuthError::InvalidCredentials)
    }
}
