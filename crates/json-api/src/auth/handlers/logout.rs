//! Logout Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{error::ApiError, extensions::*};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    pub message: String,
}

/// Logout Handler
///
/// Purges the server-side session, if any, and clears the cookie. Always
/// succeeds.
#[endpoint(tags("auth"), summary = "Sign out")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.state()?;

    if let Some(token) = state.cookies.read(req) {
        match state.app.sessions.revoke_session(&token).await {
            Ok(true) => info!("session ended"),
            Ok(false) => {}
            Err(source) => warn!("failed to revoke session on logout: {source}"),
        }
    }

    state.cookies.clear(res);

    Ok(Json(MessageResponse {
        message: "Logged out".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use portal::roles::UserStatus;
    use salvo::{http::StatusCode, test::TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_COOKIE, TestApp};

    #[tokio::test]
    async fn logout_ends_the_session() -> TestResult {
        let app = TestApp::new().await;
        let user = app.customer("ada@example.com", UserStatus::Active).await?;
        let cookie = app.sign_in(&user).await?;

        let res = TestClient::post("http://example.com/api/auth/logout")
            .add_header("cookie", cookie.clone(), true)
            .send(&app.api())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let res = TestClient::get("http://example.com/api/auth/me")
            .add_header("cookie", cookie, true)
            .send(&app.api())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn logout_without_session_succeeds() -> TestResult {
        let app = TestApp::new().await;

        let res = TestClient::post("http://example.com/api/auth/logout")
            .send(&app.api())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            res.cookie(TEST_COOKIE).map(|cookie| cookie.value().is_empty()),
            Some(true),
            "cookie should be cleared"
        );

        Ok(())
    }
}
