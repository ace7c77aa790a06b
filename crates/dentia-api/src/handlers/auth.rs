//! Registration, login, and the authenticated account endpoints.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use dentia_core::models::{UpdateUserProfile, User, UserAdminResponse, UserPatientResponse};
use dentia_core::AppError;

use crate::auth::jwt::create_access_token;
use crate::auth::models::AuthContext;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Account representation depends on the caller's role: admins get the slim
/// shape, patients the full profile with decoded list fields.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum UserResponse {
    Admin(UserAdminResponse),
    Patient(UserPatientResponse),
}

impl UserResponse {
    pub fn for_role(user: &User, role: &str) -> Self {
        if role == "admin" {
            UserResponse::Admin(UserAdminResponse::from(user))
        } else {
            UserResponse::Patient(UserPatientResponse::from(user))
        }
    }
}

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered", body = MessageResponse),
        (status = 400, description = "Email already exists or invalid input", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    if state.users.email_exists(&req.email).await? {
        return Err(AppError::BadRequest("Email already exists".to_string()).into());
    }

    let password_hash = hash_password(&req.password)?;
    state
        .users
        .create_user(&req.email, &password_hash, &req.first_name, &req.last_name)
        .await?;

    Ok(Json(MessageResponse::new("User registered successfully")))
}

#[utoipa::path(
    post,
    path = "/auth/token",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, HttpAppError> {
    let user = state.users.get_by_email(&req.email).await?;

    // Same response whether the account is missing or the password is wrong.
    let user = match user {
        Some(user) if verify_password(&req.password, &user.password_hash) => user,
        _ => return Err(AppError::Unauthorized("Invalid credentials".to_string()).into()),
    };

    let token = create_access_token(
        &user.email,
        &user.role,
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
    )?;

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = UserResponse),
        (status = 401, description = "Invalid or expired token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn me(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<Json<UserResponse>, HttpAppError> {
    let user = state
        .users
        .get_by_email(&ctx.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::for_role(&user, &ctx.role)))
}

#[utoipa::path(
    put,
    path = "/auth/update",
    tag = "auth",
    security(("bearer_auth" = [])),
    request_body = UpdateUserProfile,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 400, description = "No fields provided", body = ErrorResponse),
        (status = 401, description = "Invalid or expired token", body = ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    ValidatedJson(update): ValidatedJson<UpdateUserProfile>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    crate::handlers::profile::apply_profile_update(&state, &ctx.email, update).await?;
    Ok(Json(MessageResponse::new(
        "User profile updated successfully",
    )))
}
