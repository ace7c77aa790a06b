//! HTTP error response conversion
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`.
//! Use `AppError` (or types that implement `Into<AppError>`) for errors and
//! `.map_err(Into::into)` so they become `HttpAppError` and render
//! consistently (status, body, logging).

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dentia_core::{AppError, ErrorMetadata, LogLevel};
use dentia_report::ReportError;
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            error_type: None,
            code: code.into(),
            recoverable: false,
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse.
/// Necessary because of Rust's orphan rules: we can't implement
/// IntoResponse (external trait) for AppError (external type from dentia-core).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

/// Pipeline failures map onto the HTTP error taxonomy. A batch with no
/// decodable image is the caller's fault; everything past that point is an
/// upstream or internal failure.
impl From<ReportError> for HttpAppError {
    fn from(err: ReportError) -> Self {
        let app = match err {
            ReportError::NoValidImages => AppError::BadRequest(err.to_string()),
            ReportError::Oracle { .. }
            | ReportError::Render(_)
            | ReportError::Convert { .. } => AppError::Upstream(err.to_string()),
            ReportError::Io(io) => AppError::from(io),
        };
        HttpAppError(app)
    }
}

/// Convert JSON body deserialization failures into a 400 with our
/// ErrorResponse format.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// JSON body extractor that deserializes, then runs the type's `Validate`
/// rules, returning our ErrorResponse format (400 + JSON) on either failure.
/// Use this instead of `Json<T>` when you want a consistent API error shape
/// for invalid bodies.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        inner.validate().map_err(AppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Hide details in production; in non-production, only show details
        // for non-sensitive errors.
        let body = if is_production_env() || app_error.is_sensitive() {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: None,
                error_type: None,
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
            })
        } else {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: Some(app_error.detailed_message()),
                error_type: Some(app_error.error_type().to_string()),
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
            })
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_valid_images_maps_to_bad_request() {
        let err = HttpAppError::from(ReportError::NoValidImages);
        assert_eq!(err.0.http_status_code(), 400);
        assert_eq!(err.0.client_message(), "No valid image files uploaded.");
    }

    #[test]
    fn oracle_failure_maps_to_upstream() {
        let err = HttpAppError::from(ReportError::Oracle {
            source: anyhow::anyhow!("model request failed with status 503"),
        });
        assert_eq!(err.0.error_code(), "UPSTREAM_ERROR");
        assert!(err.0.client_message().contains("503"));
    }

    #[derive(Debug, serde::Deserialize, Validate)]
    struct Signup {
        #[validate(email)]
        email: String,
    }

    fn json_request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(axum::body::Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn extractor_rejects_a_body_failing_field_rules() {
        let err = ValidatedJson::<Signup>::from_request(json_request(r#"{"email":"nope"}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.0.http_status_code(), 400);
        assert!(err.0.client_message().contains("Validation error"));
    }

    #[tokio::test]
    async fn extractor_accepts_a_body_passing_field_rules() {
        let ValidatedJson(signup) =
            ValidatedJson::<Signup>::from_request(json_request(r#"{"email":"a@b.com"}"#), &())
                .await
                .unwrap();
        assert_eq!(signup.email, "a@b.com");
    }
}
