//! JSON error responses.
//!
//! Every failure leaves the server as `{"message": ..}` with optional
//! per-field `errors` and a `networkError` flag for upstream outages.

use portal::registration::Violations;
use salvo::{
    Scribe,
    catcher::Catcher,
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};

/// A failed check on one request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct FieldError {
    pub field: String,
    pub message: String,
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorBody {
    pub message: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,

    /// Set when an upstream service (directory, helpdesk) could not be reached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_error: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                message: message.into(),
                errors: Vec::new(),
                network_error: None,
            },
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// 500 flagged as an upstream outage.
    pub(crate) fn external_service(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message).with_network_error()
    }

    pub(crate) fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    /// No live session.
    pub(crate) fn not_authenticated() -> Self {
        Self::unauthorized("Not authenticated")
    }

    /// Signed in, but not allowed.
    pub(crate) fn access_denied() -> Self {
        Self::new(StatusCode::FORBIDDEN, "Access denied")
    }

    /// 400 listing every failed field.
    pub(crate) fn validation(violations: &Violations) -> Self {
        let mut error = Self::bad_request("Validation failed");

        error.body.errors = violations
            .as_slice()
            .iter()
            .map(|violation| FieldError {
                field: violation.field.to_string(),
                message: violation.message.to_string(),
            })
            .collect();

        error
    }

    pub(crate) fn with_field(mut self, field: &str, message: &str) -> Self {
        self.body.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });

        self
    }

    pub(crate) fn with_network_error(mut self) -> Self {
        self.body.network_error = Some(true);
        self
    }

    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }

    pub(crate) fn body(&self) -> &ErrorBody {
        &self.body
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(self.body));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Invalid request"),
            (StatusCode::UNAUTHORIZED, "Not authenticated"),
            (StatusCode::FORBIDDEN, "Access denied"),
            (StatusCode::NOT_FOUND, "Not found"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        ] {
            operation.responses.insert(
                status.as_str(),
                oapi::Response::new(description).add_content(
                    "application/json",
                    oapi::Content::new(ErrorBody::to_schema(components)),
                ),
            );
        }
    }
}

/// Rewrites framework errors (unknown routes, unreadable bodies, caught
/// panics) into the JSON error body.
#[handler]
pub(crate) async fn render_framework_error(res: &mut Response, ctrl: &mut FlowCtrl) {
    let status = res
        .status_code
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = match status {
        StatusCode::BAD_REQUEST => "Invalid request body",
        StatusCode::UNAUTHORIZED => "Not authenticated",
        StatusCode::FORBIDDEN => "Access denied",
        StatusCode::NOT_FOUND => "Not found",
        StatusCode::METHOD_NOT_ALLOWED => "Method not allowed",
        status if status.is_server_error() => "Internal server error",
        status => status.canonical_reason().unwrap_or("Request failed"),
    };

    ApiError::new(status, message).render(res);
    ctrl.skip_rest();
}

/// Catcher installed on the service.
pub(crate) fn catcher() -> Catcher {
    Catcher::default().hoop(render_framework_error)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn failing() -> Result<&'static str, ApiError> {
        Err(ApiError::unauthorized("Directory unavailable").with_network_error())
    }

    fn service() -> Service {
        Service::new(Router::new().push(Router::with_path("fail").get(failing))).catcher(catcher())
    }

    #[tokio::test]
    async fn api_errors_render_as_json() -> TestResult {
        let mut res = TestClient::get("http://example.com/fail")
            .send(&service())
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(
            body,
            json!({ "message": "Directory unavailable", "networkError": true })
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_routes_render_as_json() -> TestResult {
        let mut res = TestClient::get("http://example.com/missing")
            .send(&service())
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body, json!({ "message": "Not found" }));

        Ok(())
    }

    #[test]
    fn field_errors_are_listed() {
        let error =
            ApiError::bad_request("Validation failed").with_field("comment", "Comment is required");

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error.body().errors,
            vec![FieldError {
                field: "comment".to_string(),
                message: "Comment is required".to_string(),
            }]
        );
    }
}
