//! Scan upload endpoint: multipart images in, public PDF report URL out.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};

use dentia_core::models::PatientProfile;
use dentia_core::AppError;
use dentia_report::{ScanReportSummary, UploadedScan};

use crate::auth::models::AuthContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/scans",
    tag = "scans",
    security(("bearer_auth" = [])),
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Report generated", body = ScanReportSummary),
        (status = 400, description = "No valid image files uploaded", body = ErrorResponse),
        (status = 401, description = "Invalid or expired token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Diagnosis or conversion failed", body = ErrorResponse)
    )
)]
pub async fn analyze_scan(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    mut multipart: Multipart,
) -> Result<Json<ScanReportSummary>, HttpAppError> {
    let user = state
        .users
        .get_by_email(&ctx.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let mut uploads = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        // Every file part is treated as a candidate scan regardless of its
        // field name; non-file parts are ignored.
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
        uploads.push(UploadedScan { filename, data });
    }

    tracing::info!(email = %ctx.email, uploads = uploads.len(), "scan analysis requested");

    let profile = PatientProfile::from(&user);
    let summary = state.pipeline.generate(&profile, uploads).await?;
    Ok(Json(summary))
}
