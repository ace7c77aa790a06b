//! Doctor directory. Listing and lookup are public; mutations are
//! admin-only.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use dentia_core::models::{Doctor, DoctorInput};
use dentia_core::AppError;

use crate::auth::models::{require_admin, AuthContext};
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::MessageResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/doctors",
    tag = "doctors",
    responses(
        (status = 200, description = "All doctors", body = [Doctor])
    )
)]
pub async fn list_doctors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Doctor>>, HttpAppError> {
    let doctors = state.doctors.list().await?;
    Ok(Json(doctors))
}

#[utoipa::path(
    get,
    path = "/doctors/{doctor_id}",
    tag = "doctors",
    params(("doctor_id" = i64, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "Doctor", body = Doctor),
        (status = 404, description = "Doctor not found", body = ErrorResponse)
    )
)]
pub async fn get_doctor(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Doctor>, HttpAppError> {
    let doctor = state
        .doctors
        .get(doctor_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;
    Ok(Json(doctor))
}

#[utoipa::path(
    post,
    path = "/doctors",
    tag = "doctors",
    security(("bearer_auth" = [])),
    request_body = DoctorInput,
    responses(
        (status = 200, description = "Doctor added", body = MessageResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    )
)]
pub async fn add_doctor(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    ValidatedJson(input): ValidatedJson<DoctorInput>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    require_admin(&ctx)?;
    state.doctors.create(&input).await?;
    Ok(Json(MessageResponse::new("Doctor added successfully")))
}

#[utoipa::path(
    put,
    path = "/doctors/{doctor_id}",
    tag = "doctors",
    security(("bearer_auth" = [])),
    params(("doctor_id" = i64, Path, description = "Doctor id")),
    request_body = DoctorInput,
    responses(
        (status = 200, description = "Doctor updated", body = MessageResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Doctor not found", body = ErrorResponse)
    )
)]
pub async fn update_doctor(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(doctor_id): Path<i64>,
    ValidatedJson(input): ValidatedJson<DoctorInput>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    require_admin(&ctx)?;
    state.doctors.update(doctor_id, &input).await?;
    Ok(Json(MessageResponse::new("Doctor updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/doctors/{doctor_id}",
    tag = "doctors",
    security(("bearer_auth" = [])),
    params(("doctor_id" = i64, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "Doctor deleted", body = MessageResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    )
)]
pub async fn delete_doctor(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(doctor_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    require_admin(&ctx)?;
    state.doctors.delete(doctor_id).await?;
    Ok(Json(MessageResponse::new("Doctor deleted successfully")))
}
