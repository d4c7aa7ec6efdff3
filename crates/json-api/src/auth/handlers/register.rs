//! Customer Registration Handler

use portal::registration::Registration;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::errors::registration_error, error::ApiError, extensions::*,
    users::models::UserResponse,
};

/// Self-service registration form.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub phone: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Registration {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            company: request.company,
            phone: request.phone,
            password: request.password,
            confirm_password: request.confirm_password,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisteredResponse {
    pub user: UserResponse,
    pub message: String,
}

/// Customer Registration Handler
///
/// Creates a pending customer account that an administrator must approve.
#[endpoint(
    tags("auth"),
    summary = "Register a customer account",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created, awaiting approval"),
        (status_code = StatusCode::BAD_REQUEST, description = "One or more fields are invalid"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RegisteredResponse>, ApiError> {
    let state = depot.state()?;

    let user = state
        .app
        .customers
        .register(json.into_inner().into())
        .await
        .map_err(registration_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(RegisteredResponse {
        user: user.into(),
        message: "Registration successful. Your account is awaiting approval.".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::StatusCode,
        test::{ResponseExt, TestClient},
    };
    use serde_json::{Value, json};
    use testresult::TestResult;

    use crate::test_helpers::{TestApp, issued_cookie};

    fn form(email: &str) -> Value {
        json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": email,
            "company": "Analytical Engines",
            "password": "difference-engine",
            "confirmPassword": "difference-engine",
        })
    }

    #[tokio::test]
    async fn registration_creates_a_pending_customer() -> TestResult {
        let app = TestApp::new().await;

        let mut res = TestClient::post("http://example.com/api/auth/customer/register")
            .json(&form("Ada@Example.com"))
            .send(&app.api())
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.pointer("/user/status"), Some(&Value::from("pending")));
        assert_eq!(body.pointer("/user/role"), Some(&Value::from("customer")));
        assert_eq!(body.pointer("/user/email"), Some(&Value::from("ada@example.com")));
        assert!(issued_cookie(&res).is_none(), "no session before approval");

        Ok(())
    }

    #[tokio::test]
    async fn every_invalid_field_is_reported() -> TestResult {
        let app = TestApp::new().await;

        let mut res = TestClient::post("http://example.com/api/auth/customer/register")
            .json(&json!({
                "firstName": "",
                "lastName": "Lovelace",
                "email": "not-an-email",
                "company": "Analytical Engines",
                "password": "short",
                "confirmPassword": "different",
            }))
            .send(&app.api())
            .await;

        let body: Value = res.take_json().await?;

        let fields: Vec<&str> = body
            .get("errors")
            .and_then(Value::as_array)
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|error| error.get("field").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default();

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(fields.contains(&"firstName"), "fields: {fields:?}");
        assert!(fields.contains(&"email"), "fields: {fields:?}");
        assert!(fields.contains(&"password"), "fields: {fields:?}");
        assert!(fields.contains(&"confirmPassword"), "fields: {fields:?}");

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_is_409() -> TestResult {
        let app = TestApp::new().await;

        TestClient::post("http://example.com/api/auth/customer/register")
            .json(&form("ada@example.com"))
            .send(&app.api())
            .await;

        let res = TestClient::post("http://example.com/api/auth/customer/register")
            .json(&form("ADA@example.com"))
            .send(&app.api())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
