use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use dentia_core::AppError;

use crate::error::ErrorResponse;

/// Authenticated caller identity extracted from the access token and stored
/// in request extensions by the auth middleware.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub email: String,
    pub role: String,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Guard for admin-only operations.
pub fn require_admin(ctx: &AuthContext) -> Result<(), AppError> {
    if ctx.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin access required".to_string()))
    }
}

// Implement FromRequestParts for AuthContext so it composes with Multipart:
// Extension cannot be used together with Multipart, so we extract directly
// from request parts.
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse::new(
                        "Missing authentication context",
                        "UNAUTHORIZED",
                    )),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_guard() {
        let admin = AuthContext {
            email: "root@example.com".to_string(),
            role: "admin".to_string(),
        };
        let patient = AuthContext {
            email: "amina@example.com".to_string(),
            role: "patient".to_string(),
        };
        assert!(require_admin(&admin).is_ok());
        assert!(matches!(
            require_admin(&patient),
            Err(AppError::Forbidden(_))
        ));
    }
}
