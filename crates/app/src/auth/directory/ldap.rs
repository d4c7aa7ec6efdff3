//! LDAP transport.

use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use ldap3::{Ldap, LdapConnAsync, LdapConnSettings, LdapError, Scope, SearchEntry, ldap_escape};
use tracing::{debug, warn};

use crate::auth::directory::transport::{
    BindOutcome, DirectoryProfile, DirectoryTransport, DirectoryTransportError,
};

/// LDAP result code for refused credentials.
const INVALID_CREDENTIALS: u32 = 49;

/// busy, unavailable and unwillingToPerform: the server is up but not serving.
const SERVER_NOT_SERVING: [u32; 3] = [51, 52, 53];

const PROFILE_ATTRIBUTES: [&str; 7] = [
    "mail",
    "userPrincipalName",
    "displayName",
    "cn",
    "department",
    "title",
    "manager",
];

/// Simple-bind transport backed by `ldap3`.
#[derive(Debug, Clone)]
pub struct LdapTransport {
    url: String,
    base_dn: String,
    connect_timeout: Duration,
    operation_timeout: Duration,
}

impl LdapTransport {
    #[must_use]
    pub fn new(
        url: String,
        base_dn: String,
        connect_timeout: Duration,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            url,
            base_dn,
            connect_timeout,
            operation_timeout,
        }
    }

    async fn lookup(
        &self,
        ldap: &mut Ldap,
        account: &str,
    ) -> Result<Option<DirectoryProfile>, LdapError> {
        let filter = format!("(sAMAccountName={})", ldap_escape(account));

        let (entries, _) = ldap
            .with_timeout(self.operation_timeout)
            .search(&self.base_dn, Scope::Subtree, &filter, PROFILE_ATTRIBUTES)
            .await?
            .success()?;

        Ok(entries
            .into_iter()
            .next()
            .map(|entry| profile_from_attributes(&SearchEntry::construct(entry).attrs)))
    }
}

#[async_trait]
impl DirectoryTransport for LdapTransport {
    async fn authenticate(
        &self,
        principal: &str,
        password: &str,
        account: &str,
    ) -> Result<BindOutcome, DirectoryTransportError> {
        let settings = LdapConnSettings::new().set_conn_timeout(self.connect_timeout);

        let (conn, mut ldap) = LdapConnAsync::with_settings(settings, &self.url)
            .await
            .map_err(|error| DirectoryTransportError::Unreachable(error.to_string()))?;

        ldap3::drive!(conn);

        let bind = ldap
            .with_timeout(self.operation_timeout)
            .simple_bind(principal, password)
            .await
            .map_err(|error| DirectoryTransportError::Unreachable(error.to_string()))?;

        if bind.rc != 0 {
            debug!(principal, rc = bind.rc, "directory bind refused");

            return refused_bind(bind.rc, &bind.text);
        }

        let profile = match self.lookup(&mut ldap, account).await {
            Ok(profile) => profile,
            Err(error) => {
                warn!(account, %error, "directory profile lookup failed");

                None
            }
        };

        if let Err(error) = ldap.unbind().await {
            debug!(%error, "directory unbind failed");
        }

        Ok(BindOutcome::Accepted(profile))
    }
}

fn refused_bind(rc: u32, text: &str) -> Result<BindOutcome, DirectoryTransportError> {
    match rc {
        INVALID_CREDENTIALS => Ok(BindOutcome::Rejected),
        rc if SERVER_NOT_SERVING.contains(&rc) => Err(DirectoryTransportError::Unreachable(
            format!("bind returned result code {rc}: {text}"),
        )),
        rc => Err(DirectoryTransportError::Protocol(format!(
            "bind returned result code {rc}: {text}"
        ))),
    }
}

fn profile_from_attributes(attributes: &HashMap<String, Vec<String>>) -> DirectoryProfile {
    let first = |name: &str| {
        attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .and_then(|(_, values)| values.first())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    DirectoryProfile {
        mail: first("mail"),
        user_principal_name: first("userPrincipalName"),
        display_name: first("displayName"),
        common_name: first("cn"),
        department: first("department"),
        title: first("title"),
        manager: first("manager"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refused_binds_are_classified_by_result_code() {
        assert!(matches!(refused_bind(49, ""), Ok(BindOutcome::Rejected)));

        for rc in [51, 52, 53] {
            assert!(
                matches!(
                    refused_bind(rc, "busy"),
                    Err(DirectoryTransportError::Unreachable(_))
                ),
                "rc {rc} should count as unreachable"
            );
        }

        assert!(matches!(
            refused_bind(50, "insufficient access"),
            Err(DirectoryTransportError::Protocol(_))
        ));
    }

    #[test]
    fn profile_reads_first_values_ignoring_attribute_case() {
        let attributes = HashMap::from([
            ("mail".to_string(), vec!["jdoe@corp.example".to_string()]),
            ("displayname".to_string(), vec!["Jane Doe".to_string()]),
            ("CN".to_string(), vec!["jdoe".to_string(), "other".to_string()]),
            ("title".to_string(), vec!["  ".to_string()]),
            ("department".to_string(), Vec::new()),
        ]);

        let profile = profile_from_attributes(&attributes);

        assert_eq!(profile.mail.as_deref(), Some("jdoe@corp.example"));
        assert_eq!(profile.display_name.as_deref(), Some("Jane Doe"));
        assert_eq!(profile.common_name.as_deref(), Some("jdoe"));
        assert_eq!(profile.title, None);
        assert_eq!(profile.department, None);
        assert_eq!(profile.user_principal_name, None);
    }
}
