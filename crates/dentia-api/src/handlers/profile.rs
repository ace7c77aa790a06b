//! Profile read/update endpoints. `/auth/update` shares the same update
//! path so both routes behave identically.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use dentia_core::constants::BRUSHING_FREQUENCIES;
use dentia_core::models::UpdateUserProfile;
use dentia_core::AppError;

use crate::auth::models::AuthContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::auth::UserResponse;
use crate::handlers::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AvatarUpload {
    pub avatar_url: String,
}

/// Shared update path: rejects an empty patch, drops an unknown brushing
/// frequency value instead of failing the whole request.
pub(crate) async fn apply_profile_update(
    state: &AppState,
    email: &str,
    mut update: UpdateUserProfile,
) -> Result<(), AppError> {
    if let Some(ref freq) = update.brushing_frequency {
        if !BRUSHING_FREQUENCIES.contains(&freq.as_str()) {
            tracing::debug!(value = %freq, "ignoring unknown brushing_frequency");
            update.brushing_frequency = None;
        }
    }

    if update.is_empty() {
        return Err(AppError::BadRequest("No fields provided".to_string()));
    }

    state.users.update_profile(email, &update).await
}

#[utoipa::path(
    get,
    path = "/profile",
    tag = "profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current profile", body = UserResponse),
        (status = 401, description = "Invalid or expired token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_profile(
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
    path = "/profile",
    tag = "profile",
    security(("bearer_auth" = [])),
    request_body = UpdateUserProfile,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 400, description = "No fields provided", body = ErrorResponse),
        (status = 401, description = "Invalid or expired token", body = ErrorResponse)
    )
)]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    ValidatedJson(update): ValidatedJson<UpdateUserProfile>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    apply_profile_update(&state, &ctx.email, update).await?;
    Ok(Json(MessageResponse::new(
        "User profile updated successfully",
    )))
}

#[utoipa::path(
    post,
    path = "/profile/avatar",
    tag = "profile",
    security(("bearer_auth" = [])),
    request_body = AvatarUpload,
    responses(
        (status = 200, description = "Avatar saved", body = MessageResponse),
        (status = 401, description = "Invalid or expired token", body = ErrorResponse)
    )
)]
pub async fn upload_avatar(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    ValidatedJson(payload): ValidatedJson<AvatarUpload>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    state
        .users
        .set_avatar(&ctx.email, &payload.avatar_url)
        .await?;
    Ok(Json(MessageResponse::new("Avatar uploaded successfully")))
}
