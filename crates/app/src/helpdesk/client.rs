//! Helpdesk REST client.

use std::fmt;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::helpdesk::models::{
    HelpdeskArticle, HelpdeskArticleDraft, HelpdeskCustomer, HelpdeskCustomerDraft,
    HelpdeskTicket, HelpdeskTicketDraft, HelpdeskTicketPatch,
};

/// Connection settings for the helpdesk API.
#[derive(Clone)]
pub struct HelpdeskSettings {
    /// API base URL, e.g. `"https://helpdesk.example.com/api/v1"`.
    pub base_url: String,

    /// Bearer token.
    pub token: String,

    /// Group new tickets are filed into.
    pub group_id: i64,

    /// Customer used when the submitter cannot be found or created.
    pub default_customer_id: i64,
}

impl fmt::Debug for HelpdeskSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelpdeskSettings")
            .field("base_url", &self.base_url)
            .field("token", &"**redacted**")
            .field("group_id", &self.group_id)
            .field("default_customer_id", &self.default_customer_id)
            .finish()
    }
}

/// Errors that can occur when talking to the helpdesk.
#[derive(Debug, Error)]
pub enum HelpdeskError {
    /// An HTTP transport error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The helpdesk returned a non-2xx response or an unexpected body.
    #[error("unexpected response from helpdesk: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
/// Helpdesk operations used by the portal. One request per call, no retry.
pub trait HelpdeskApi: Send + Sync {
    /// Find a customer by email address.
    async fn find_customer(&self, email: &str) -> Result<Option<HelpdeskCustomer>, HelpdeskError>;

    async fn create_customer(
        &self,
        customer: HelpdeskCustomerDraft,
    ) -> Result<HelpdeskCustomer, HelpdeskError>;

    async fn create_ticket(
        &self,
        ticket: HelpdeskTicketDraft,
    ) -> Result<HelpdeskTicket, HelpdeskError>;

    async fn update_ticket(
        &self,
        ticket_id: i64,
        patch: HelpdeskTicketPatch,
    ) -> Result<HelpdeskTicket, HelpdeskError>;

    async fn get_ticket(&self, ticket_id: i64) -> Result<HelpdeskTicket, HelpdeskError>;

    /// Articles of a ticket, oldest first.
    async fn list_articles(&self, ticket_id: i64) -> Result<Vec<HelpdeskArticle>, HelpdeskError>;

    async fn add_article(
        &self,
        article: HelpdeskArticleDraft,
    ) -> Result<HelpdeskArticle, HelpdeskError>;
}

/// JSON-over-HTTP helpdesk client.
#[derive(Debug, Clone)]
pub struct HelpdeskClient {
    base_url: String,
    token: String,
    http: Client,
}

impl HelpdeskClient {
    /// Build a client for the configured helpdesk.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be initialised.
    pub fn new(settings: &HelpdeskSettings) -> Result<Self, HelpdeskError> {
        let http = Client::builder()
            .user_agent(concat!("portal/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> Result<T, HelpdeskError> {
        let response = request.bearer_auth(&self.token).send().await?;
        let status = response.status();

        debug!(action, %status, "helpdesk response");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(HelpdeskError::UnexpectedResponse(format!(
                "{action} failed with status {status}: {text}"
            )));
        }

        let text = response.text().await?;

        serde_json::from_str(&text).map_err(|error| {
            HelpdeskError::UnexpectedResponse(format!("{action} returned an invalid body: {error}"))
        })
    }
}

#[async_trait]
impl HelpdeskApi for HelpdeskClient {
    async fn find_customer(&self, email: &str) -> Result<Option<HelpdeskCustomer>, HelpdeskError> {
        let customers: Vec<HelpdeskCustomer> = self
            .send(
                self.http
                    .get(self.url("/users/search"))
                    .query(&[("query", email)]),
                "customer search",
            )
            .await?;

        Ok(matching_customer(customers, email))
    }

    async fn create_customer(
        &self,
        customer: HelpdeskCustomerDraft,
    ) -> Result<HelpdeskCustomer, HelpdeskError> {
        self.send(
            self.http.post(self.url("/users")).json(&customer),
            "customer creation",
        )
        .await
    }

    async fn create_ticket(
        &self,
        ticket: HelpdeskTicketDraft,
    ) -> Result<HelpdeskTicket, HelpdeskError> {
        self.send(
            self.http.post(self.url("/tickets")).json(&ticket),
            "ticket creation",
        )
        .await
    }

    async fn update_ticket(
        &self,
        ticket_id: i64,
        patch: HelpdeskTicketPatch,
    ) -> Result<HelpdeskTicket, HelpdeskError> {
        self.send(
            self.http
                .put(self.url(&format!("/tickets/{ticket_id}")))
                .json(&patch),
            "ticket update",
        )
        .await
    }

    async fn get_ticket(&self, ticket_id: i64) -> Result<HelpdeskTicket, HelpdeskError> {
        self.send(
            self.http.get(self.url(&format!("/tickets/{ticket_id}"))),
            "ticket lookup",
        )
        .await
    }

    async fn list_articles(&self, ticket_id: i64) -> Result<Vec<HelpdeskArticle>, HelpdeskError> {
        self.send(
            self.http
                .get(self.url(&format!("/ticket_articles/by_ticket/{ticket_id}"))),
            "article listing",
        )
        .await
    }

    async fn add_article(
        &self,
        article: HelpdeskArticleDraft,
    ) -> Result<HelpdeskArticle, HelpdeskError> {
        self.send(
            self.http.post(self.url("/ticket_articles")).json(&article),
            "article creation",
        )
        .await
    }
}

/// The search hit whose email is the submitter's. Hits without an email never
/// match.
fn matching_customer(customers: Vec<HelpdeskCustomer>, email: &str) -> Option<HelpdeskCustomer> {
    let wanted = email.to_lowercase();

    customers.into_iter().find(|customer| {
        customer
            .email
            .as_deref()
            .is_some_and(|found| found.to_lowercase() == wanted)
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn settings() -> HelpdeskSettings {
        HelpdeskSettings {
            base_url: "https://helpdesk.example.com/api/v1/".to_string(),
            token: "secret-token".to_string(),
            group_id: 1,
            default_customer_id: 2,
        }
    }

    #[test]
    fn settings_debug_redacts_token() {
        let debug = format!("{:?}", settings());

        assert!(!debug.contains("secret-token"), "token leaked: {debug}");
        assert!(debug.contains("**redacted**"));
    }

    fn customer(id: i64, email: Option<&str>) -> HelpdeskCustomer {
        HelpdeskCustomer {
            id,
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn search_hits_without_email_are_not_the_submitter() {
        let hits = vec![customer(3, None), customer(4, Some("Ada@Example.com"))];

        assert_eq!(
            matching_customer(hits, "ada@example.com").map(|found| found.id),
            Some(4)
        );
        assert_eq!(matching_customer(vec![customer(3, None)], "ada@example.com"), None);
    }

    #[test]
    fn urls_are_joined_without_double_slashes() -> TestResult {
        let client = HelpdeskClient::new(&settings())?;

        assert_eq!(
            client.url("/tickets/7"),
            "https://helpdesk.example.com/api/v1/tickets/7"
        );

        Ok(())
    }
}
