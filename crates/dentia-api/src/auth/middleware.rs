use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dentia_core::AppError;

use crate::auth::jwt::decode_token;
use crate::auth::models::AuthContext;
use crate::error::HttpAppError;

#[derive(Clone)]
pub struct AuthState {
    pub jwt_secret: String,
}

/// Bearer-token middleware for protected routes. On success an
/// [`AuthContext`] is inserted into request extensions; handlers pick it up
/// via `FromRequestParts`.
pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ))
            .into_response();
        }
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return HttpAppError(AppError::Unauthorized(
            "Invalid authorization header format. Expected 'Bearer <token>'".to_string(),
        ))
        .into_response();
    };

    let claims = match decode_token(token, &auth_state.jwt_secret) {
        Ok(claims) => claims,
        Err(err) => return HttpAppError(err).into_response(),
    };

    request.extensions_mut().insert(AuthContext {
        email: claims.sub,
        role: claims.role,
    });

    next.run(request).await
}
