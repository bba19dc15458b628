//! Session handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"teacher","password":"password"}
//! POST /api/v1/logout
//! GET  /api/v1/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{LoginCredentials, LoginValidationError, Principal};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, PrincipalSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::login_validation_error;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "teacher")]
    pub username: String,
    #[schema(example = "password")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = PrincipalSchema,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Blank username or password", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["session"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<Principal>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(login_validation_error)?;
    let principal = state.login.authenticate(&credentials).await?;
    session.persist_principal(&principal)?;
    info!(user_id = %principal.user_id(), role = %principal.role(), "user signed in");
    Ok(web::Json(principal))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["session"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// The signed-in principal.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Current principal", body = PrincipalSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["session"],
    operation_id = "currentPrincipal"
)]
#[get("/me")]
pub async fn me(session: SessionContext) -> ApiResult<web::Json<Principal>> {
    Ok(web::Json(session.require_principal()?))
}
