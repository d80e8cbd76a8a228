use crate::auth::verify_access_token;
use crate::state::AppState;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bruger_common::models::auth::Claims;
use serde_json::json;
use std::sync::Arc;

/// Extractor that validates a JWT Bearer token and provides the claims.
/// Every rejection uses the same status and body: clients must not be able
/// to tell a missing header from a bad signature from an expired token.
#[derive(Debug)]
pub struct AuthUser(pub Claims);

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Unauthorized"})),
    )
        .into_response()
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        // The scheme is case-sensitive and exactly "Bearer <token>"; anything
        // else is rejected before the token service is consulted.
        let token = match auth_header {
            Some(val) => match val.strip_prefix("Bearer ") {
                Some(t) => t,
                None => return Err(unauthorized()),
            },
            None => return Err(unauthorized()),
        };

        match verify_access_token(token, &state.config.auth.jwt_secret) {
            Ok(claims) => Ok(AuthUser(claims)),
            Err(_) => Err(unauthorized()),
        }
    }
}
