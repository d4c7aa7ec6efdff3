//! Request Context

use portal_app::domain::{sessions::records::SessionRecord, users::records::UserRecord};

/// The caller behind a live session, as loaded for this request.
#[derive(Debug, Clone)]
pub(crate) struct RequestContext {
    pub(crate) user: UserRecord,
    pub(crate) session: SessionRecord,
}

impl RequestContext {
    pub(crate) fn is_staff(&self) -> bool {
        self.user.role.is_staff()
    }

    pub(crate) fn is_admin(&self) -> bool {
        self.user.role.is_admin()
    }
}
