//! Helpdesk Config

use clap::Args;
use portal_app::helpdesk::HelpdeskSettings;

/// External helpdesk settings. Tickets stay local without a URL.
#[derive(Debug, Clone, Args)]
pub struct HelpdeskConfig {
    /// REST API base URL, e.g. `https://helpdesk.example.com/api/v1`
    #[arg(long, env = "HELPDESK_URL")]
    pub helpdesk_url: Option<String>,

    /// API token
    #[arg(long, env = "HELPDESK_TOKEN", hide_env_values = true, default_value = "")]
    pub helpdesk_token: String,

    /// Customer id used when the submitter cannot be resolved
    #[arg(long, env = "HELPDESK_DEFAULT_CUSTOMER_ID", default_value_t = 2_i64)]
    pub helpdesk_default_customer_id: i64,

    /// Group new tickets are filed into
    #[arg(long, env = "HELPDESK_GROUP_ID", default_value_t = 1_i64)]
    pub helpdesk_group_id: i64,
}

impl HelpdeskConfig {
    /// Helpdesk settings, or `None` when no URL is configured.
    #[must_use]
    pub fn settings(&self) -> Option<HelpdeskSettings> {
        let base_url = self
            .helpdesk_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())?;

        Some(HelpdeskSettings {
            base_url: base_url.to_string(),
            token: self.helpdesk_token.clone(),
            group_id: self.helpdesk_group_id,
            default_customer_id: self.helpdesk_default_customer_id,
        })
    }
}
