use crate::auth::{issue_access_token, verify_password};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use bruger_db::UserRepo;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// POST /auth/login
#[tracing::instrument(skip(state, req))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    // Login normalizes the email (trim + lowercase); creation does not.
    // A user stored with a mixed-case email will not match here.
    let email = req
        .email
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    let password = req.password.as_deref().unwrap_or("");

    if email.is_empty() || password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "BadRequest", "detail": "email and password are required"})),
        )
            .into_response();
    }

    let user = match UserRepo::get_by_email(&state.pool, &email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Unauthorized", "detail": "Invalid email or password"})),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("DB error during login: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    };

    if !verify_password(password, &user.password_hash) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Unauthorized", "detail": "Invalid email or password"})),
        )
            .into_response();
    }

    let access_token = match issue_access_token(
        user.id,
        &user.email,
        &state.config.auth.jwt_secret,
        state.config.auth.token_ttl_minutes,
    ) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to create access token: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    };

    Json(TokenResponse {
        access_token,
        token_type: "Bearer",
    })
    .into_response()
}
