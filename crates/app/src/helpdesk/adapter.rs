//! Mapping between local tickets and helpdesk tickets.

use std::sync::Arc;

use portal::helpdesk::{priority_for_id, priority_id, state_id, status_for_state};
use tracing::{info, warn};

use crate::{
    domain::{
        tickets::{
            data::{NewTicket, TicketUpdate},
            records::TicketRecord,
        },
        users::records::UserRecord,
    },
    helpdesk::{
        client::{HelpdeskApi, HelpdeskError},
        models::{
            CUSTOMER_ROLE_ID, HelpdeskArticle, HelpdeskArticleDraft, HelpdeskCustomerDraft,
            HelpdeskTicket, HelpdeskTicketDraft, HelpdeskTicketPatch,
        },
    },
};

/// Translates local tickets to helpdesk payloads and back.
#[derive(Clone)]
pub struct HelpdeskAdapter {
    api: Arc<dyn HelpdeskApi>,
    group_id: i64,
    default_customer_id: i64,
}

impl std::fmt::Debug for HelpdeskAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelpdeskAdapter")
            .field("group_id", &self.group_id)
            .field("default_customer_id", &self.default_customer_id)
            .finish_non_exhaustive()
    }
}

impl HelpdeskAdapter {
    #[must_use]
    pub fn new(api: Arc<dyn HelpdeskApi>, group_id: i64, default_customer_id: i64) -> Self {
        Self {
            api,
            group_id,
            default_customer_id,
        }
    }

    /// Helpdesk customer id for the submitter.
    ///
    /// Looks the customer up by email and creates it when missing. Any
    /// failure falls back to the default customer so the ticket is still
    /// filed.
    pub async fn resolve_customer(&self, submitter: &UserRecord) -> i64 {
        let lookup = match self.api.find_customer(&submitter.email).await {
            Ok(Some(customer)) => return customer.id,
            Ok(None) => {
                self.api
                    .create_customer(HelpdeskCustomerDraft {
                        email: submitter.email.clone(),
                        firstname: submitter.first_name.clone().unwrap_or_default(),
                        lastname: submitter.last_name.clone().unwrap_or_default(),
                        organization: submitter.company.clone().unwrap_or_default(),
                        phone: submitter.phone.clone().unwrap_or_default(),
                        role_ids: vec![CUSTOMER_ROLE_ID],
                    })
                    .await
            }
            Err(error) => Err(error),
        };

        match lookup {
            Ok(customer) => {
                info!(
                    email = %submitter.email,
                    customer_id = customer.id,
                    "created helpdesk customer"
                );

                customer.id
            }
            Err(error) => {
                warn!(
                    email = %submitter.email,
                    fallback_customer_id = self.default_customer_id,
                    error = %error,
                    "helpdesk customer lookup failed, filing under the default customer"
                );

                self.default_customer_id
            }
        }
    }

    /// Helpdesk payload for a new ticket.
    pub async fn to_external(
        &self,
        ticket: &NewTicket,
        submitter: &UserRecord,
    ) -> HelpdeskTicketDraft {
        HelpdeskTicketDraft {
            title: ticket.subject.clone(),
            group_id: self.group_id,
            customer_id: self.resolve_customer(submitter).await,
            state_id: state_id(ticket.status),
            priority_id: priority_id(ticket.priority),
            article: HelpdeskArticleDraft::plain(None, &ticket.subject, &ticket.description),
        }
    }

    /// Local changes described by a helpdesk ticket. The description comes
    /// from the first article, when there is one.
    #[must_use]
    pub fn from_external(ticket: &HelpdeskTicket, articles: &[HelpdeskArticle]) -> TicketUpdate {
        TicketUpdate {
            subject: Some(ticket.title.clone()).filter(|title| !title.is_empty()),
            description: articles.first().map(|article| article.body.clone()),
            status: Some(status_for_state(ticket.state_id)),
            priority: Some(priority_for_id(ticket.priority_id)),
            ..TicketUpdate::default()
        }
    }

    /// File a new ticket in the helpdesk.
    ///
    /// # Errors
    ///
    /// Returns an error when the helpdesk rejects the ticket or cannot be
    /// reached.
    pub async fn submit(
        &self,
        ticket: &NewTicket,
        submitter: &UserRecord,
    ) -> Result<HelpdeskTicket, HelpdeskError> {
        let draft = self.to_external(ticket, submitter).await;

        self.api.create_ticket(draft).await
    }

    /// Mirror the title, state and priority of a local ticket.
    ///
    /// # Errors
    ///
    /// Returns an error when the helpdesk update fails.
    pub async fn push_update(
        &self,
        helpdesk_id: i64,
        ticket: &TicketRecord,
    ) -> Result<HelpdeskTicket, HelpdeskError> {
        self.api
            .update_ticket(
                helpdesk_id,
                HelpdeskTicketPatch {
                    title: Some(ticket.subject.clone()),
                    state_id: Some(state_id(ticket.status)),
                    priority_id: Some(priority_id(ticket.priority)),
                },
            )
            .await
    }

    /// Mirror a comment as a customer-visible article.
    ///
    /// # Errors
    ///
    /// Returns an error when the helpdesk rejects the article.
    pub async fn push_comment(
        &self,
        helpdesk_id: i64,
        subject: &str,
        body: &str,
    ) -> Result<HelpdeskArticle, HelpdeskError> {
        self.api
            .add_article(HelpdeskArticleDraft::plain(Some(helpdesk_id), subject, body))
            .await
    }

    /// Pull the current helpdesk state of a ticket as a local update.
    ///
    /// # Errors
    ///
    /// Returns an error when the ticket or its articles cannot be fetched.
    pub async fn fetch(&self, helpdesk_id: i64) -> Result<TicketUpdate, HelpdeskError> {
        let ticket = self.api.get_ticket(helpdesk_id).await?;
        let articles = self.api.list_articles(helpdesk_id).await?;

        Ok(Self::from_external(&ticket, &articles))
    }
}
