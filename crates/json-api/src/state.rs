//! State

use std::sync::Arc;

use portal_app::context::AppContext;

use crate::auth::cookies::SessionCookies;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) cookies: SessionCookies,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, cookies: SessionCookies) -> Self {
        Self { app, cookies }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, cookies: SessionCookies) -> Arc<Self> {
        Arc::new(Self::new(app, cookies))
    }
}
