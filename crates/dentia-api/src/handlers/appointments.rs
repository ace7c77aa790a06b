//! Appointment booking. Patients book and list their own appointments;
//! status changes are admin-only.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use dentia_core::constants::APPOINTMENT_STATUSES;
use dentia_core::models::AppointmentWithDoctor;
use dentia_core::AppError;

use crate::auth::models::{require_admin, AuthContext};
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::orders::StatusUpdate;
use crate::handlers::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AppointmentRequest {
    pub doctor_id: i64,
    pub appointment_time: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AppointmentsResponse {
    pub appointments: Vec<AppointmentWithDoctor>,
}

#[utoipa::path(
    post,
    path = "/appointments",
    tag = "appointments",
    security(("bearer_auth" = [])),
    request_body = AppointmentRequest,
    responses(
        (status = 200, description = "Appointment booked", body = MessageResponse),
        (status = 404, description = "User or doctor not found", body = ErrorResponse)
    )
)]
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    ValidatedJson(req): ValidatedJson<AppointmentRequest>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    let user = state
        .users
        .get_by_email(&ctx.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    state
        .doctors
        .get(req.doctor_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    state
        .appointments
        .create(user.id, req.doctor_id, req.appointment_time)
        .await?;

    Ok(Json(MessageResponse::new("Appointment booked successfully")))
}

#[utoipa::path(
    get,
    path = "/appointments",
    tag = "appointments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's appointments with doctor info", body = AppointmentsResponse),
        (status = 401, description = "Invalid or expired token", body = ErrorResponse)
    )
)]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<Json<AppointmentsResponse>, HttpAppError> {
    let user = state
        .users
        .get_by_email(&ctx.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let appointments = state.appointments.list_for_user(user.id).await?;
    Ok(Json(AppointmentsResponse { appointments }))
}

#[utoipa::path(
    put,
    path = "/appointments/{appointment_id}/status",
    tag = "appointments",
    security(("bearer_auth" = [])),
    params(("appointment_id" = i64, Path, description = "Appointment id")),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 400, description = "Invalid status", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    )
)]
pub async fn update_appointment_status(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(appointment_id): Path<i64>,
    ValidatedJson(update): ValidatedJson<StatusUpdate>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    require_admin(&ctx)?;

    if !APPOINTMENT_STATUSES.contains(&update.status.as_str()) {
        return Err(AppError::BadRequest("Invalid status".to_string()).into());
    }

    state
        .appointments
        .update_status(appointment_id, &update.status)
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "Appointment status updated to '{}'",
        update.status
    ))))
}
