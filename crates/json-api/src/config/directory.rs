//! Directory Config

use std::time::Duration;

use clap::Args;
use portal_app::auth::directory::{DirectoryNaming, DirectorySettings};

/// Employee directory settings. Directory sign-in is disabled without a URL.
#[derive(Debug, Clone, Args)]
pub struct DirectoryConfig {
    /// Directory server URL, e.g. `ldap://dc.corp.local:389`
    #[arg(long, env = "DIRECTORY_URL")]
    pub directory_url: Option<String>,

    /// Base DN searched for account profiles
    #[arg(long, env = "DIRECTORY_BASE_DN", default_value = "")]
    pub directory_base_dn: String,

    /// User principal suffix, e.g. `@corp.local`
    #[arg(long, env = "DIRECTORY_USERNAME_SUFFIX")]
    pub directory_username_suffix: Option<String>,

    /// Down-level domain name; derived from the suffix when unset
    #[arg(long, env = "DIRECTORY_DOMAIN")]
    pub directory_domain: Option<String>,

    /// Suffix for email addresses of accounts without one
    #[arg(long, env = "DIRECTORY_EMAIL_SUFFIX", default_value = "@example.com")]
    pub directory_email_suffix: String,

    /// Connection timeout in seconds
    #[arg(long, env = "DIRECTORY_CONNECT_TIMEOUT_SECONDS", default_value_t = 15_u64)]
    pub directory_connect_timeout_seconds: u64,

    /// Bind and search timeout in seconds
    #[arg(long, env = "DIRECTORY_OPERATION_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub directory_operation_timeout_seconds: u64,
}

impl DirectoryConfig {
    /// Directory settings, or `None` when no URL is configured.
    #[must_use]
    pub fn settings(&self) -> Option<DirectorySettings> {
        let url = self
            .directory_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())?;

        Some(DirectorySettings {
            url: url.to_string(),
            base_dn: self.directory_base_dn.clone(),
            naming: DirectoryNaming {
                username_suffix: non_blank(self.directory_username_suffix.as_deref()),
                domain: non_blank(self.directory_domain.as_deref()),
                email_suffix: self.directory_email_suffix.clone(),
            },
            connect_timeout: Duration::from_secs(self.directory_connect_timeout_seconds),
            operation_timeout: Duration::from_secs(self.directory_operation_timeout_seconds),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Wrapper {
        #[command(flatten)]
        directory: DirectoryConfig,
    }

    #[test]
    fn blank_suffix_and_domain_are_unset() -> TestResult {
        let wrapper = Wrapper::try_parse_from([
            "test",
            "--directory-url",
            "ldap://dc.corp.local:389",
            "--directory-username-suffix",
            " ",
        ])?;

        let settings = wrapper.directory.settings().ok_or("settings expected")?;

        assert_eq!(settings.url, "ldap://dc.corp.local:389");
        assert_eq!(settings.naming.username_suffix, None);
        assert_eq!(settings.naming.domain, None);
        assert_eq!(settings.connect_timeout, Duration::from_secs(15));
        assert_eq!(settings.operation_timeout, Duration::from_secs(10));

        Ok(())
    }
}
