//! Test helpers.

use std::sync::Arc;

use portal::roles::{Role, UserStatus};
use salvo::{affix_state::inject, prelude::*};
use testresult::TestResult;

use portal_app::{
    auth::password::hash_password,
    context::{AppContext, AppServices, AppSettings, DEFAULT_SESSION_TTL},
    domain::users::{data::NewUser, records::UserRecord},
    helpdesk::{HelpdeskAdapter, MockHelpdeskApi},
};

use crate::{auth::cookies::SessionCookies, error, router, state::State};

pub(crate) const TEST_COOKIE: &str = "portal_session";
pub(crate) const TEST_PASSWORD: &str = "correct-horse-battery";

pub(crate) fn session_cookie(token: &str) -> String {
    format!("{TEST_COOKIE}={token}")
}

/// `Cookie` header value for the session cookie a response handed out.
pub(crate) fn issued_cookie(res: &Response) -> Option<String> {
    res.cookie(TEST_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|token| !token.is_empty())
        .map(session_cookie)
}

/// An in-memory application behind the real router.
pub(crate) struct TestApp {
    pub(crate) context: AppContext,
    state: Arc<State>,
}

impl TestApp {
    pub(crate) async fn new() -> Self {
        let context = AppContext::in_memory(AppSettings::default())
            .await
            .expect("in-memory context");

        Self::with_context(context)
    }

    /// In-memory stores with tickets mirrored into `helpdesk`.
    pub(crate) fn with_helpdesk(helpdesk: MockHelpdeskApi) -> Self {
        let context = AppContext::assemble(
            AppServices::in_memory(DEFAULT_SESSION_TTL),
            None,
            Some(HelpdeskAdapter::new(Arc::new(helpdesk), 1, 2)),
        );

        Self::with_context(context)
    }

    pub(crate) fn with_context(context: AppContext) -> Self {
        let state = State::shared(context.clone(), SessionCookies::new(TEST_COOKIE, false));

        Self { context, state }
    }

    /// Serve `router` with state and the JSON catcher installed.
    pub(crate) fn service(&self, router: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.state.clone())).push(router))
            .catcher(error::catcher())
    }

    /// The full API.
    pub(crate) fn api(&self) -> Service {
        self.service(router::app_router())
    }

    pub(crate) async fn user_with_role(
        &self,
        username: &str,
        email: &str,
        role: Role,
        status: UserStatus,
    ) -> TestResult<UserRecord> {
        let user = self
            .context
            .users
            .create_user(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: Some(hash_password(TEST_PASSWORD)?),
                first_name: Some("Test".to_string()),
                last_name: Some(role.to_string()),
                company: Some("Example Ltd".to_string()),
                phone: None,
                role,
                status,
                is_directory_user: role == Role::Employee,
            })
            .await?;

        Ok(user)
    }

    pub(crate) async fn customer(&self, email: &str, status: UserStatus) -> TestResult<UserRecord> {
        let username = email.split('@').next().unwrap_or(email);

        self.user_with_role(username, email, Role::Customer, status)
            .await
    }

    /// Start a session and return the matching `Cookie` header value.
    pub(crate) async fn sign_in(&self, user: &UserRecord) -> TestResult<String> {
        let issued = self.context.sessions.issue_session(user.id).await?;

        Ok(session_cookie(&issued.token))
    }
}
