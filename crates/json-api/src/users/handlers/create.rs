//! Create User Handler

use portal::roles::{Role, UserStatus};
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use portal_app::auth::NewAccount;

use crate::{
    error::ApiError,
    extensions::*,
    users::{errors::account_error, models::UserEnvelope},
};

/// Account created by an administrator.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,

    /// `employee`, `customer` or `admin`
    pub role: String,

    /// `pending`, `active` or `suspended`; defaults to `active`
    pub status: Option<String>,
}

impl TryFrom<CreateUserRequest> for NewAccount {
    type Error = ApiError;

    fn try_from(request: CreateUserRequest) -> Result<Self, Self::Error> {
        let role = request.role.parse::<Role>().map_err(|_err| {
            ApiError::bad_request("Invalid role").with_field("role", "Unknown role")
        })?;

        let status = request
            .status
            .as_deref()
            .map(str::parse::<UserStatus>)
            .transpose()
            .map_err(|_err| {
                ApiError::bad_request("Invalid status").with_field("status", "Unknown status")
            })?
            .unwrap_or(UserStatus::Active);

        Ok(NewAccount {
            username: request.username,
            email: request.email,
            password: request.password,
            first_name: request.first_name,
            last_name: request.last_name,
            company: request.company,
            phone: request.phone,
            role,
            status,
        })
    }
}

/// Create User Handler
#[endpoint(
    tags("users"),
    summary = "Create a user",
    responses(
        (status_code = StatusCode::CREATED, description = "User created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid payload"),
        (status_code = StatusCode::CONFLICT, description = "Username or email in use"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateUserRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserEnvelope>, ApiError> {
    let state = depot.state()?;
    let account = NewAccount::try_from(json.into_inner())?;

    let user = state
        .app
        .customers
        .create_account(account)
        .await
        .map_err(account_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use crate::test_helpers::TestApp;

    use super::*;

    async fn admin_cookie(app: &TestApp) -> TestResult<String> {
        let admin = app
            .user_with_role("root", "root@example.com", Role::Admin, UserStatus::Active)
            .await?;

        app.sign_in(&admin).await
    }

    #[tokio::test]
    async fn admin_creates_an_employee() -> TestResult {
        let app = TestApp::new().await;
        let cookie = admin_cookie(&app).await?;

        let mut res = TestClient::post("http://example.com/api/users")
            .add_header("cookie", cookie, true)
            .json(&json!({
                "username": "grace",
                "email": "grace@example.com",
                "password": "compiler-2024",
                "role": "employee",
            }))
            .send(&app.api())
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.pointer("/user/role"), Some(&Value::from("employee")));
        assert_eq!(body.pointer("/user/status"), Some(&Value::from("active")));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_role_is_400() -> TestResult {
        let app = TestApp::new().await;
        let cookie = admin_cookie(&app).await?;

        let res = TestClient::post("http://example.com/api/users")
            .add_header("cookie", cookie, true)
            .json(&json!({
                "username": "grace",
                "email": "grace@example.com",
                "password": "compiler-2024",
                "role": "superuser",
            }))
            .send(&app.api())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_is_409() -> TestResult {
        let app = TestApp::new().await;
        let cookie = admin_cookie(&app).await?;

        let res = TestClient::post("http://example.com/api/users")
            .add_header("cookie", cookie, true)
            .json(&json!({
                "username": "another",
                "email": "ROOT@example.com",
                "password": "compiler-2024",
                "role": "admin",
            }))
            .send(&app.api())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
