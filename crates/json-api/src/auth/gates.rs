//! Role gates.

use salvo::prelude::*;
use tracing::warn;

use crate::{error::ApiError, extensions::*};

/// Hoop that only lets callers with a qualifying role through. Must run
/// after the session middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RoleGate {
    /// Employees and admins.
    Staff,

    /// Admins only.
    Admin,
}

impl RoleGate {
    fn check(self, depot: &Depot) -> Result<(), ApiError> {
        let context = depot.request_context()?;

        let allowed = match self {
            Self::Staff => context.is_staff(),
            Self::Admin => context.is_admin(),
        };

        if allowed {
            return Ok(());
        }

        warn!(
            user_id = %context.user.id,
            role = %context.user.role,
            gate = ?self,
            "access denied by role gate"
        );

        Err(ApiError::access_denied())
    }
}

#[handler]
impl RoleGate {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        match self.check(depot) {
            Ok(()) => {
                ctrl.call_next(req, depot, res).await;
            }
            Err(error) => {
                res.render(error);
                ctrl.skip_rest();
            }
        }
    }
}
